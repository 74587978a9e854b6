use crate::date::format_date;
use crate::query::{Search, TaskQuery};
use sqlx::{QueryBuilder, Sqlite};

/// Utility functions for building listing queries from a [`TaskQuery`]
pub struct SqlQueryBuilder;

impl SqlQueryBuilder {
    /// Build the full listing statement for a query
    pub fn build_list_query(query: &TaskQuery) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT id, date, title, comment, repeat FROM scheduler");

        if let Some(search) = &query.search {
            qb.push(" WHERE ");
            Self::build_search_clause(search, &mut qb);
        }

        qb.push(" ORDER BY date, id LIMIT ");
        qb.push_bind(query.limit);
        qb
    }

    fn build_search_clause(search: &Search, qb: &mut QueryBuilder<'static, Sqlite>) {
        match search {
            Search::Date(date) => {
                qb.push("date = ");
                qb.push_bind(format_date(*date));
            }
            Search::Text(text) => {
                let pattern = format!("%{}%", escape_like(text));
                qb.push("(title LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\' OR comment LIKE ");
                qb.push_bind(pattern);
                qb.push(" ESCAPE '\\')");
            }
        }
    }
}

/// Escapes the LIKE wildcards so search text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
