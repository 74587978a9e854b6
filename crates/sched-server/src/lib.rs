//! HTTP front-end of the task scheduler.
//!
//! Serves the JSON API under `/api` on top of [`sched_core`] and the static
//! web client for every other path.

pub mod cli;
pub mod config;
pub mod error;
pub mod rest;
pub mod state;
