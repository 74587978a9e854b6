use std::sync::Arc;

use async_trait::async_trait;

use crate::date::Clock;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, Task};
use crate::query::TaskQuery;

pub mod query_builder;
pub mod tasks;

/// Storage of scheduled tasks.
///
/// Tasks handed to `add_task` and `update_task` are expected to have been
/// validated already.
#[async_trait]
pub trait TaskRepository {
    /// Inserts a task and returns its new id.
    async fn add_task(&self, task: &Task) -> Result<i64, CoreError>;
    /// Lists tasks ordered by date, applying the query's search and limit.
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    /// Overwrites every field of the task identified by `task.id`.
    async fn update_task(&self, task: &Task) -> Result<(), CoreError>;
    /// Marks a task as done: one-off tasks are deleted, recurring tasks move
    /// to their next date.
    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

/// Task storage backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl SqliteRepository {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
