use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the bubble run library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset or cache file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for dataset storage")]
    ProjectDirsUnavailable,

    /// No suitable cache directory could be resolved for faction caches.
    #[error("failed to resolve cache directories for faction caches")]
    CacheDirsUnavailable,

    /// Raised when a system name could not be found in the working set.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a route search is asked to order zero systems.
    #[error("working set is empty; nothing to route")]
    EmptyWorkingSet,

    /// Raised when exhaustive search is requested for too many systems.
    #[error(
        "exhaustive search over {count} systems is impractical (limit {limit}); \
         use the genetic method or allow large working sets explicitly"
    )]
    WorkingSetTooLarge { count: usize, limit: usize },

    /// Raised when the worker pool could not be built or a worker died.
    #[error("route search worker pool failed: {message}")]
    WorkerPool { message: String },

    /// Raised by a TSP solver implementation.
    #[error("tsp solver failed: {message}")]
    Solver { message: String },

    /// Raised when a solver returns something that is not a permutation of the input.
    #[error("tsp solver returned an invalid visiting order for {expected} systems: {order:?}")]
    InvalidSolverOrder { expected: usize, order: Vec<usize> },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
