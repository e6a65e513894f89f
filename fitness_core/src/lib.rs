#![forbid(unsafe_code)]

//! Core domain model and session logic for fitrack.
//!
//! This crate provides:
//! - Domain types (exercises, routines, catalog)
//! - The per-exercise completion ledger
//! - The abs-limit rule
//! - The rest timer state machine
//! - The workout session controller and screen navigation
//! - Configuration, errors and logging setup

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod ledger;
pub mod abs_limit;
pub mod rest_timer;
pub mod session;
pub mod navigation;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use ledger::CompletionLedger;
pub use abs_limit::AbsLimitRule;
pub use rest_timer::{RestTimer, TimerEvent, TimerSnapshot, TimerState};
pub use session::{
    ExerciseStatus, ProgressScope, SessionSnapshot, SessionSummary, ToggleOutcome,
    WorkoutSession,
};
pub use navigation::{Navigator, Screen};
