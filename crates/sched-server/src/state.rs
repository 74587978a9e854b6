use std::sync::Arc;

use sched_core::date::Clock;
use sched_core::repository::SqliteRepository;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repository: SqliteRepository,
    /// Supplies "today" for task validation.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(repository: SqliteRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}
