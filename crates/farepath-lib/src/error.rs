use thiserror::Error;

use crate::network::LocationId;

/// Convenient result alias for the farepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only malformed input is an error. An unreachable destination, a negative
/// cycle or a truncated enumeration are reported through the result types.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name could not be resolved.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a numeric location id is outside the network.
    #[error("unknown location id: {id}")]
    UnknownLocationId { id: LocationId },

    /// Raised when source and destination resolve to the same location.
    #[error("source and destination must differ (both are location {id})")]
    SameEndpoints { id: LocationId },

    /// Raised when an edge references a missing node or loops onto itself.
    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        from: LocationId,
        to: LocationId,
        reason: &'static str,
    },

    /// Raised when a location list violates the network invariants.
    #[error("invalid location network: {message}")]
    InvalidNetwork { message: String },

    /// Raised when synthesis options are inconsistent.
    #[error("invalid synthesis options: {message}")]
    InvalidSynthesisOptions { message: String },

    /// Raised when Dijkstra is asked to run over a discounted (negative) fare.
    #[error("dijkstra cannot run with negative fare {cost} on edge {from} -> {to}")]
    NegativeFare {
        from: LocationId,
        to: LocationId,
        cost: i64,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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
