// ABOUTME: Error types for evaluation failures in the Lisp interpreter

use thiserror::Error;

/// The fixed set of error kinds a host can distinguish without parsing a
/// message string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Ok,
    Error,
    OutOfMemory,
    BadArgument,
    Unsupported,
    Overflow,
    Bug,
}

#[derive(Error, Debug, Clone)]
pub enum LispError {
    /// A generic failure, e.g. an unbound symbol or a malformed parse.
    #[error("{0}")]
    Error(String),

    /// A host-tracked allocation budget was exceeded. Never constructed by
    /// the evaluator itself; retained for host-API fidelity.
    #[error("out of memory")]
    OutOfMemory,

    /// Argument count, shape, or type was not acceptable.
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// The requested feature is not available in this build or configuration.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A fixed-size buffer (the lexer's lexeme buffer) overflowed.
    #[error("overflow")]
    Overflow,

    /// An implementation invariant was violated.
    #[error("bug: {0}")]
    Bug(String),
}

impl LispError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LispError::Error(_) => ErrorCode::Error,
            LispError::OutOfMemory => ErrorCode::OutOfMemory,
            LispError::BadArgument(_) => ErrorCode::BadArgument,
            LispError::Unsupported(_) => ErrorCode::Unsupported,
            LispError::Overflow => ErrorCode::Overflow,
            LispError::Bug(_) => ErrorCode::Bug,
        }
    }

    pub fn bad_argument(message: impl Into<String>) -> Self {
        LispError::BadArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        LispError::Unsupported(message.into())
    }

    pub fn bug(message: impl Into<String>) -> Self {
        LispError::Bug(message.into())
    }
}
