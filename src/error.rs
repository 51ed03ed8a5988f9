//! Error taxonomy for the simulation core.
//!
//! Only two things can genuinely fail: handing an entity a negative speed,
//! and asking the wave tables for a level/row they do not know. Everything
//! else (firing at capacity, double-removal, stale expiries) is a defined
//! no-op, not an error.

use std::fmt;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A caller-supplied value is out of range (e.g. a negative speed).
    InvalidArgument(String),
    /// A lookup outside the canonical level/row tables. Level setup fails
    /// loudly on these instead of silently placing nothing.
    InvalidState(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            GameError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GameError>;
