//! Error types for the fitness_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitness_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Routine name did not match any built-in routine
    #[error("Unknown routine: {0}")]
    UnknownRoutine(String),

    /// Exercise is not part of the active routine
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Set index outside `[0, set_count)`
    #[error("Set index {index} out of range for '{exercise}' ({set_count} sets)")]
    SetOutOfRange {
        exercise: String,
        index: usize,
        set_count: usize,
    },

    /// Workout command issued while on the selection screen
    #[error("No active workout session")]
    NoActiveSession,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
