use crate::error::CoreError;
use crate::models::{CompletionResult, Task, TaskRecord};
use crate::query::TaskQuery;
use crate::recurrence::next_date;
use crate::repository::query_builder::SqlQueryBuilder;
use crate::repository::SqliteRepository;
use crate::validation::check_id;
use async_trait::async_trait;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, task: &Task) -> Result<i64, CoreError> {
        let result = sqlx::query(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, $3, $4)",
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(task_id = id, "task added");
        Ok(id)
    }

    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, CoreError> {
        let mut query_builder = SqlQueryBuilder::build_list_query(query);
        let records: Vec<TaskRecord> = query_builder
            .build_query_as()
            .fetch_all(self.pool())
            .await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let record: Option<TaskRecord> = sqlx::query_as(
            "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(record.map(Task::from))
    }

    async fn update_task(&self, task: &Task) -> Result<(), CoreError> {
        let id = check_id(&task.id).map_err(|e| CoreError::InvalidInput(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE scheduler SET date = $1, title = $2, comment = $3, repeat = $4 WHERE id = $5",
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(task_id = id, "task updated");
        Ok(())
    }

    async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task: Task = sqlx::query_as::<_, TaskRecord>(
            "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .map(Task::from)
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let result = if task.is_recurring() {
            let next = next_date(self.clock().today(), &task.date, &task.repeat)?;
            sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
                .bind(&next)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            CompletionResult::Rescheduled { id, next_date: next }
        } else {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            CompletionResult::Deleted { id }
        };

        tx.commit().await?;
        tracing::debug!(task_id = id, ?result, "task completed");
        Ok(result)
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(task_id = id, "task deleted");
        Ok(())
    }
}
