use chrono::NaiveDate;

/// Maximum number of tasks returned by one listing.
pub const TASK_LIST_LIMIT: i64 = 30;

/// Date format accepted by the search box.
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// Tasks scheduled on exactly this day.
    Date(NaiveDate),
    /// Tasks whose title or comment contains this text.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub search: Option<Search>,
    pub limit: i64,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            search: None,
            limit: TASK_LIST_LIMIT,
        }
    }
}

impl TaskQuery {
    /// Builds a query from the raw search string of a listing request.
    ///
    /// A `DD.MM.YYYY` value searches by date, anything else by text.
    /// A blank value lists everything.
    pub fn from_search(raw: Option<&str>) -> Self {
        let search = raw.map(str::trim).filter(|s| !s.is_empty()).map(|s| {
            NaiveDate::parse_from_str(s, SEARCH_DATE_FORMAT)
                .map(Search::Date)
                .unwrap_or_else(|_| Search::Text(s.to_string()))
        });
        Self {
            search,
            ..Default::default()
        }
    }
}
