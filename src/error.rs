//! Error types shared by all netlist operations.

use thiserror::Error;

use crate::signal::Signal;

/// Result type for netlist operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, transcoding or transforming a netlist.
#[derive(Debug, Error)]
pub enum Error {
    /// A signal points to a nonexistent node, or to a node of the wrong kind.
    #[error("invalid reference {signal}: {reason}")]
    InvalidReference { signal: Signal, reason: String },

    /// AIGER header/record inconsistency, truncated stream or out-of-range literal.
    #[error("malformed AIGER input (line {line}): {message}")]
    MalformedInput { line: usize, message: String },

    /// A combinational cycle through the given node.
    #[error("combinational cycle through node {node}")]
    CyclicGraph { node: u32 },

    /// Inconsistent state after a rebuild; indicates a bug, not bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(signal: Signal, reason: impl Into<String>) -> Self {
        Error::InvalidReference {
            signal,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedInput {
            line,
            message: message.into(),
        }
    }
}
