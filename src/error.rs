//! Error types for character setup and collaborator failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::components::StateType;

/// Errors raised while building a character. All of them are setup-time:
/// once a character is spawned, nothing in the per-tick path can fail.
#[derive(Debug, Error)]
pub enum SetupError {
    /// File could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The priority table has no entry for a state type.
    #[error("Character '{character}' has no priority for state {state}")]
    MissingPriority { character: String, state: StateType },

    /// The interruptibility table has no entry for a state type.
    #[error("Character '{character}' has no interruptibility rule for state {state}")]
    MissingInterruptibility { character: String, state: StateType },

    /// A state that needs configuration data was left without it.
    #[error("Character '{character}' is missing configuration for state {state}")]
    MissingStateConfig { character: String, state: StateType },

    /// No moveset was supplied at all.
    #[error("Character '{character}' has no moveset")]
    MissingMoveset { character: String },

    /// A moveset was supplied but it holds no moves.
    #[error("Character '{character}' has an empty moveset")]
    EmptyMoveset { character: String },

    /// A numeric field is out of its valid range.
    #[error("Character '{character}': '{field}' must be {expected}, got {value}")]
    InvalidValue {
        character: String,
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    /// A numeric field on one move is out of its valid range.
    #[error("Character '{character}': move '{name}' {field} must be {expected}, got {value}")]
    InvalidMove {
        character: String,
        name: String,
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    /// The resolved config could not be written back out as RON.
    #[error("Failed to serialize character '{character}': {source}")]
    Serialize {
        character: String,
        #[source]
        source: ron::Error,
    },
}

/// A visual feedback call did not go through. Never propagated into the
/// state machine; callers log it and move on.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Feedback sink is unavailable")]
    Unavailable,

    #[error("Feedback sink rejected {what}: {details}")]
    Rejected { what: &'static str, details: String },
}
