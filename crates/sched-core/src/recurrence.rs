//! Recurrence rules and date advancing.
//!
//! Two rule shapes are recognised:
//!
//! - `d N`: every `N` days, `1 <= N <= 400`
//! - `y`: every year on the same month and day
//!
//! Rules are parsed from their text on every call and never cached.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::date::{format_date, parse_date, DateParseError};

/// Largest interval accepted by a `d N` rule.
pub const MAX_DAY_INTERVAL: u32 = 400;

const MAX_INTERVAL_DIGITS: usize = 3;

/// A parsed recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatRule {
    /// Every `n` days.
    Days(u32),
    /// Every calendar year.
    Yearly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("repeat rule is undefined: \"{0}\"")]
    Undefined(String),

    #[error("wrong repeat rule format with \"{kind}\": \"{rule}\"")]
    Malformed { kind: char, rule: String },

    #[error("day interval in repeat rule \"{rule}\" must be between 1 and {max}", max = MAX_DAY_INTERVAL)]
    IntervalOutOfRange { rule: String, days: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NextDateError {
    #[error(transparent)]
    Date(#[from] DateParseError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("next date after {0} is past the supported calendar range")]
    OutOfRange(String),
}

impl RepeatRule {
    /// Parses a rule string. Surrounding whitespace is ignored.
    pub fn parse(rule: &str) -> Result<Self, RuleError> {
        let trimmed = rule.trim();
        let mut chars = trimmed.chars();
        match chars.next() {
            Some('d') => Self::parse_days(rule, chars.as_str()),
            Some('y') if chars.as_str().is_empty() => Ok(RepeatRule::Yearly),
            Some('y') => Err(RuleError::Malformed {
                kind: 'y',
                rule: rule.to_string(),
            }),
            _ => Err(RuleError::Undefined(rule.to_string())),
        }
    }

    fn parse_days(rule: &str, rest: &str) -> Result<Self, RuleError> {
        let malformed = || RuleError::Malformed {
            kind: 'd',
            rule: rule.to_string(),
        };

        let mut chars = rest.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_whitespace()) {
            return Err(malformed());
        }
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.len() > MAX_INTERVAL_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let days: u32 = digits.parse().map_err(|_| malformed())?;
        if days == 0 || days > MAX_DAY_INTERVAL {
            return Err(RuleError::IntervalOutOfRange {
                rule: rule.to_string(),
                days,
            });
        }
        Ok(RepeatRule::Days(days))
    }

    /// Moves `date` forward by exactly one period.
    ///
    /// A yearly step from February 29th into a non-leap year lands on
    /// March 1st. Returns `None` past the end of the calendar.
    pub fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            RepeatRule::Days(days) => date.checked_add_days(Days::new(u64::from(days))),
            RepeatRule::Yearly => {
                let year = date.year().checked_add(1)?;
                NaiveDate::from_ymd_opt(year, date.month(), date.day())
                    .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            }
        }
    }

    /// Next occurrence of a series last scheduled on `base`.
    ///
    /// A stale `base` (strictly before `now`) is advanced until it is no
    /// longer before `now`. A current or future `base` is advanced exactly
    /// once, so the result is never `base` itself.
    pub fn next_after(self, now: NaiveDate, base: NaiveDate) -> Option<NaiveDate> {
        if base >= now {
            return self.advance(base);
        }

        match self {
            RepeatRule::Days(days) => {
                let gap = (now - base).num_days() as u64;
                let step = u64::from(days);
                let periods = gap.div_ceil(step);
                base.checked_add_days(Days::new(periods * step))
            }
            RepeatRule::Yearly => {
                let mut date = base;
                while date < now {
                    date = self.advance(date)?;
                }
                Some(date)
            }
        }
    }
}

impl FromStr for RepeatRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::Days(days) => write!(f, "d {}", days),
            RepeatRule::Yearly => write!(f, "y"),
        }
    }
}

/// Computes the next date of a task scheduled on `base` with repeat rule `rule`.
///
/// Both strings are parsed on every call; the date first, then the rule.
/// The result is an 8-digit `YYYYMMDD` string.
pub fn next_date(now: NaiveDate, base: &str, rule: &str) -> Result<String, NextDateError> {
    let base_date = parse_date(base)?;
    let rule = RepeatRule::parse(rule)?;

    let next = rule
        .next_after(now, base_date)
        .filter(|date| date.year() <= 9999)
        .ok_or_else(|| NextDateError::OutOfRange(base.to_string()))?;

    Ok(format_date(next))
}
