use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while setting up or running a session.
///
/// Setup failures are fatal: they propagate uncaught to `main` and terminate
/// the process before any stimulus is rendered.
#[derive(Debug, Error)]
pub enum Error {
    #[error("condition records do not match the expected schema: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("requested {requested} trials but only {available} condition records are available")]
    InsufficientData { requested: usize, available: usize },

    #[error("stimulus file missing: {}", .0.display())]
    AssetMissing(PathBuf),

    #[error("at most {limit} rating scales can be shown at once, got {got}")]
    TooManyPrompts { got: usize, limit: usize },

    #[error("invalid ratings: {0}")]
    InvalidRatings(String),

    #[error("{}: {message}", .path.display())]
    Table { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("presentation host failure: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, Error>;
