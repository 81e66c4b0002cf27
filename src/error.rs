//! Error types for the bot.
//!
//! The decision core itself never fails: a phase with nothing to do simply
//! produces no orders. Errors only come from the edges of the program, where
//! text is read from the game host and configuration is read from disk.

use std::fmt;
use std::io;

/// A malformed or out-of-contract input from the game host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Input ended in the middle of a record.
    UnexpectedEof {
        /// What the reader was expecting when input ran out.
        expected: &'static str,
    },
    /// A token could not be parsed as an integer.
    InvalidInteger {
        /// What the token was supposed to be.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// An entity line carried an unknown kind.
    UnknownEntityKind(String),
    /// A factory id outside `0..factory_count`.
    FactoryOutOfRange {
        /// The id that was read.
        id: i64,
        /// Number of factories announced in the setup block.
        factory_count: usize,
    },
    /// A count that must be non-negative was negative.
    NegativeCount {
        /// What the count was.
        field: &'static str,
        /// The value that was read.
        value: i64,
    },
    /// A count larger than any real game announces.
    TooLarge {
        /// What the count was.
        field: &'static str,
        /// The value that was read.
        value: u32,
        /// Largest accepted value.
        limit: usize,
    },
    /// Reading from the underlying stream failed.
    Io(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input while reading {expected}")
            }
            Self::InvalidInteger { field, token } => {
                write!(f, "invalid integer for {field}: {token:?}")
            }
            Self::UnknownEntityKind(kind) => write!(f, "unknown entity kind: {kind:?}"),
            Self::FactoryOutOfRange { id, factory_count } => {
                write!(f, "factory id {id} out of range (factory count {factory_count})")
            }
            Self::NegativeCount { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            Self::TooLarge {
                field,
                value,
                limit,
            } => write!(f, "{field} {value} exceeds the limit of {limit}"),
            Self::Io(message) => write!(f, "input error: {message}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<io::Error> for ProtocolError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Failure to load strategy weights.
#[derive(Debug)]
pub enum ConfigError {
    /// The weights file could not be read.
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        error: io::Error,
    },
    /// The weights file is not valid JSON for [`crate::StrategyWeights`].
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, error } => write!(f, "failed to read weights {path}: {error}"),
            Self::Parse(e) => write!(f, "invalid weights: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Error raised by the turn loop.
#[derive(Debug)]
pub enum BotError {
    /// The host sent something the reader could not accept.
    Protocol(ProtocolError),
    /// Writing orders to the host failed.
    Io(io::Error),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "protocol error: {e}"),
            Self::Io(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<ProtocolError> for BotError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<io::Error> for BotError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for protocol reads.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::FactoryOutOfRange {
            id: 12,
            factory_count: 7,
        };
        let text = err.to_string();
        assert!(text.contains("12"));
        assert!(text.contains('7'));
    }

    #[test]
    fn test_too_large_display() {
        let err = ProtocolError::TooLarge {
            field: "entity count",
            value: 5000,
            limit: 4096,
        };
        assert_eq!(err.to_string(), "entity count 5000 exceeds the limit of 4096");
    }

    #[test]
    fn test_bot_error_from_protocol() {
        let err: BotError = ProtocolError::UnknownEntityKind("SHIP".to_string()).into();
        assert!(matches!(err, BotError::Protocol(_)));
        assert!(err.to_string().contains("SHIP"));
    }
}
