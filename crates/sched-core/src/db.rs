use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

use crate::error::CoreError;

pub use sqlx::SqlitePool as DbPool;

/// Opens a connection pool to the SQLite database and runs migrations.
///
/// The database file and its parent directory are created when missing.
pub async fn establish_connection(db_path: impl AsRef<Path>) -> Result<DbPool, CoreError> {
    let db_path = db_path.as_ref();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!(path = %db_path.display(), "database ready");

    Ok(pool)
}
