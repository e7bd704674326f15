//! Error types for the fallible, caller-recoverable paths of the core.
//!
//! Conditions the core treats as programmer error (out-of-range state access,
//! double-marking a state in a partition split, ...) are raised via `panic!`/
//! `assert!` at the API boundary instead of being threaded through here: they
//! are not meant to be caught, only fixed at the call site.

use thiserror::Error;

/// The error type returned by every fallible operation in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An `algorithm`/`minimize`/`relation`/`direction`/`type` parameter map entry
    /// used an unrecognised key or an unrecognised value for a recognised key.
    #[error("invalid configuration: key `{key}` has unrecognised value `{value}`")]
    InvalidConfiguration { key: String, value: String },

    /// A recognised key was altogether absent from a parameter map that required it.
    #[error("invalid configuration: missing required key `{key}`")]
    MissingConfiguration { key: String },

    /// An operation was invoked on a value that does not satisfy its precondition,
    /// e.g. `complement_deterministic` on a non-deterministic automaton.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A resource budget (e.g. a determinized-state ceiling) was exceeded.
    #[error("resource exhausted: {0}")]
    ResourceExhaustion(String),

    /// The regex front-end failed to parse a pattern.
    #[error("failed to parse pattern: {0}")]
    ParseFailure(String),

    /// A caller-facing invalid-argument condition that is reported rather than
    /// panicked on, e.g. removing a transition that is not present.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
