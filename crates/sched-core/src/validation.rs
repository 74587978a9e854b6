//! Task validation run before a task is created or updated.
//!
//! Validation checks every field, collects all problems into one
//! [`ValidationError`] and rewrites the task's date when it has gone stale.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::date::{format_date, parse_date, DateParseError};
use crate::models::Task;
use crate::recurrence::{next_date, NextDateError};

/// Which request the task arrived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// A new task; the id is not checked.
    Create,
    /// An existing task; the id must be a positive integer.
    Update,
}

/// A single problem found in a task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    #[error("the id is blank")]
    BlankId,

    #[error("wrong format of id \"{0}\"")]
    MalformedId(String),

    #[error("wrong id {0}: id must be > 0")]
    NonPositiveId(i64),

    #[error("the title is blank")]
    BlankTitle,

    #[error("wrong format of the date: {0}")]
    Date(DateParseError),

    #[error("{0}")]
    Repeat(NextDateError),
}

/// All problems found while validating one task, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    problems: Vec<FieldProblem>,
}

impl ValidationError {
    pub fn problems(&self) -> &[FieldProblem] {
        &self.problems
    }

    pub fn contains(&self, problem: &FieldProblem) -> bool {
        self.problems.contains(problem)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to validate task: ")?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
struct Problems(Vec<FieldProblem>);

impl Problems {
    fn push(&mut self, problem: FieldProblem) {
        if !self.0.contains(&problem) {
            self.0.push(problem);
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems: self.0 })
        }
    }
}

impl Task {
    /// Validates the task against the reference day `today`.
    ///
    /// An empty date becomes `today`. A one-off task dated before `today` is
    /// moved to `today`; a recurring task dated before `today` is moved to its
    /// next occurrence. A current or future date is left as is.
    ///
    /// The date may already have been rewritten when an error is returned.
    pub fn validate(&mut self, mode: ValidationMode, today: NaiveDate) -> Result<(), ValidationError> {
        let mut problems = Problems::default();

        if mode == ValidationMode::Update {
            if let Err(problem) = check_id(&self.id) {
                problems.push(problem);
            }
        }

        if self.title.is_empty() {
            problems.push(FieldProblem::BlankTitle);
        }

        if self.date.is_empty() {
            self.date = format_date(today);
        }

        if self.repeat.is_empty() {
            match parse_date(&self.date) {
                Ok(date) if date < today => self.date = format_date(today),
                Ok(_) => {}
                Err(e) => problems.push(FieldProblem::Date(e)),
            }
        } else {
            match next_date(today, &self.date, &self.repeat) {
                Ok(next) => {
                    // Only a stale date is replaced; the computed date is dropped otherwise.
                    if parse_date(&self.date).is_ok_and(|date| date < today) {
                        self.date = next;
                    }
                }
                Err(e) => problems.push(FieldProblem::Repeat(e)),
            }
        }

        problems.into_result()
    }
}

/// Parses a task id that must be a positive integer.
pub fn check_id(id: &str) -> Result<i64, FieldProblem> {
    if id.is_empty() {
        return Err(FieldProblem::BlankId);
    }
    let value: i64 = id
        .parse()
        .map_err(|_| FieldProblem::MalformedId(id.to_string()))?;
    if value <= 0 {
        return Err(FieldProblem::NonPositiveId(value));
    }
    Ok(value)
}
