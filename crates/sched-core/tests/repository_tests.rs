use std::sync::Arc;

use chrono::NaiveDate;
use sched_core::date::FixedClock;
use sched_core::db::establish_connection;
use sched_core::error::CoreError;
use sched_core::models::{CompletionResult, Task};
use sched_core::query::TaskQuery;
use sched_core::repository::{SqliteRepository, TaskRepository};
use sched_core::validation::ValidationMode;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("data").join("scheduler.db");

    let pool = establish_connection(&db_path)
        .await
        .expect("Failed to establish test database connection");

    let repository = SqliteRepository::new(pool, Arc::new(FixedClock(today())));
    (repository, temp_dir)
}

/// Helper function to validate and store a task
async fn create_task(repo: &SqliteRepository, date: &str, title: &str, comment: &str, repeat: &str) -> i64 {
    let mut task = Task {
        date: date.to_string(),
        title: title.to_string(),
        comment: comment.to_string(),
        repeat: repeat.to_string(),
        ..Default::default()
    };
    task.validate(ValidationMode::Create, today())
        .expect("Failed to validate test task");
    repo.add_task(&task).await.expect("Failed to create test task")
}

#[tokio::test]
async fn test_basic_task_crud_workflow() {
    let (repo, _temp_dir) = setup_test_db().await;

    let id = create_task(&repo, "20240120", "Dentist", "bring card", "").await;
    assert!(id > 0);

    let task = repo.find_task_by_id(id).await.unwrap().expect("task should exist");
    assert_eq!(task.id, id.to_string());
    assert_eq!(task.date, "20240120");
    assert_eq!(task.comment, "bring card");

    let updated = Task {
        title: "Dentist (moved)".to_string(),
        date: "20240125".to_string(),
        ..task
    };
    repo.update_task(&updated).await.expect("Failed to update task");
    let task = repo.find_task_by_id(id).await.unwrap().unwrap();
    assert_eq!(task, updated);

    repo.delete_task(id).await.expect("Failed to delete task");
    assert!(repo.find_task_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_tasks_are_not_found() {
    let (repo, _temp_dir) = setup_test_db().await;

    assert!(matches!(repo.delete_task(99).await, Err(CoreError::NotFound(_))));
    assert!(matches!(repo.complete_task(99).await, Err(CoreError::NotFound(_))));

    let ghost = Task {
        id: "99".to_string(),
        date: "20240120".to_string(),
        title: "Ghost".to_string(),
        ..Default::default()
    };
    assert!(matches!(repo.update_task(&ghost).await, Err(CoreError::NotFound(_))));

    let unnamed = Task { id: String::new(), ..ghost };
    assert!(matches!(repo.update_task(&unnamed).await, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn test_complete_one_off_task_deletes_it() {
    let (repo, _temp_dir) = setup_test_db().await;
    let id = create_task(&repo, "20240115", "Call mom", "", "").await;

    let result = repo.complete_task(id).await.unwrap();
    assert_eq!(result, CompletionResult::Deleted { id });
    assert!(repo.find_task_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_complete_recurring_task_reschedules_it() {
    let (repo, _temp_dir) = setup_test_db().await;
    let id = create_task(&repo, "20240115", "Water plants", "", "d 3").await;

    let result = repo.complete_task(id).await.unwrap();
    assert_eq!(
        result,
        CompletionResult::Rescheduled {
            id,
            next_date: "20240118".to_string()
        }
    );

    repo.complete_task(id).await.unwrap();
    let task = repo.find_task_by_id(id).await.unwrap().unwrap();
    assert_eq!(task.date, "20240121");
}

#[tokio::test]
async fn test_complete_task_with_broken_rule_is_rejected() {
    let (repo, _temp_dir) = setup_test_db().await;
    let broken = Task {
        date: "20240115".to_string(),
        title: "Imported".to_string(),
        repeat: "w 1".to_string(),
        ..Default::default()
    };
    let id = repo.add_task(&broken).await.unwrap();

    assert!(matches!(repo.complete_task(id).await, Err(CoreError::NextDate(_))));
    let task = repo.find_task_by_id(id).await.unwrap().unwrap();
    assert_eq!(task.date, "20240115");
}

#[tokio::test]
async fn test_find_tasks_orders_by_date_and_limits() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_task(&repo, "20240301", "Later", "", "").await;
    create_task(&repo, "20240120", "Sooner", "", "").await;
    for day in 0..35 {
        create_task(&repo, &format!("202402{:02}", day % 28 + 1), "Filler", "", "").await;
    }

    let tasks = repo.find_tasks(&TaskQuery::default()).await.unwrap();
    assert_eq!(tasks.len(), 30);
    assert_eq!(tasks[0].title, "Sooner");
    assert!(tasks.windows(2).all(|w| w[0].date <= w[1].date));
    assert!(tasks.iter().all(|t| t.title != "Later"));
}

#[tokio::test]
async fn test_find_tasks_search() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_task(&repo, "20240208", "Gym", "", "").await;
    create_task(&repo, "20240209", "Read", "chapter on the gym", "").await;
    create_task(&repo, "20240208", "Shopping", "", "").await;

    let by_text = repo.find_tasks(&TaskQuery::from_search(Some("gym"))).await.unwrap();
    assert_eq!(by_text.len(), 2);

    let by_date = repo
        .find_tasks(&TaskQuery::from_search(Some("08.02.2024")))
        .await
        .unwrap();
    let titles: Vec<_> = by_date.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Gym", "Shopping"]);

    let none = repo.find_tasks(&TaskQuery::from_search(Some("yoga"))).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_find_tasks_search_treats_wildcards_literally() {
    let (repo, _temp_dir) = setup_test_db().await;
    create_task(&repo, "20240201", "Rename config_file", "", "").await;
    create_task(&repo, "20240202", "Stretch", "", "").await;
    create_task(&repo, "20240203", "Tip 15% at dinner", "", "").await;

    let underscore = repo.find_tasks(&TaskQuery::from_search(Some("_"))).await.unwrap();
    let titles: Vec<_> = underscore.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Rename config_file"]);

    let percent = repo.find_tasks(&TaskQuery::from_search(Some("%"))).await.unwrap();
    let titles: Vec<_> = percent.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Tip 15% at dinner"]);
}
