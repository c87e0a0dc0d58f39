use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the roadtrip library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested cost mode is not one of the four supported strategies.
    #[error("invalid cost mode: {mode} (expected segments, distance, time, or delivery)")]
    InvalidCostMode { mode: String },

    /// Raised when a location name could not be found in the atlas.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the goal has no entry in the coordinate index.
    #[error("goal location {name} has no known coordinates")]
    UnknownGoal { name: String },

    /// Raised when the frontier was exhausted without reaching the goal.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any locations.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a road segment record cannot be parsed.
    #[error("malformed road segment at {path}:{line}: {message}")]
    MalformedSegment {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Raised when a coordinate record cannot be parsed.
    #[error("malformed coordinate record at {path}:{line}: {message}")]
    MalformedCoordinate {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
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
