//! # Scheduler Core Library
//!
//! Recurrence rules, date advancing and task validation for a single-user
//! task scheduler, together with the SQLite storage the server uses.
//!
//! ## Core Modules
//!
//! - [`date`]: The `YYYYMMDD` date format and the [`date::Clock`] abstraction
//! - [`recurrence`]: Repeat rule grammar (`d N`, `y`) and next-date computation
//! - [`validation`]: Create/update validation of tasks
//! - [`models`]: The task entity and completion results
//! - [`query`]: Listing and search parameters
//! - [`db`]: Opening the database and running migrations
//! - [`repository`]: The [`repository::TaskRepository`] trait and its SQLite implementation
//! - [`error`]: Crate-level error type
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sched_core::models::Task;
//! use sched_core::recurrence::next_date;
//! use sched_core::validation::ValidationMode;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! assert_eq!(next_date(today, "20240120", "d 5").unwrap(), "20240125");
//!
//! let mut task = Task {
//!     title: "Pay rent".to_string(),
//!     date: "20231201".to_string(),
//!     repeat: "d 30".to_string(),
//!     ..Default::default()
//! };
//! task.validate(ValidationMode::Create, today).unwrap();
//! assert_eq!(task.date, "20240130");
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod recurrence;
pub mod repository;
pub mod validation;
