//! Shared error type across taxoscope crates.

use thiserror::Error;

/// Machine-readable error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed envelope or input.
    BadRequest,
    /// Invalid configuration.
    Config,
    /// Stream delivery failure.
    Source,
    /// Report could not be rendered.
    Render,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Internal defect (e.g. poisoned store lock).
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Source => "SOURCE",
            ErrorCode::Render => "RENDER",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TaxoscopeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TaxoscopeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("config: {0}")]
    Config(String),
    #[error("source: {0}")]
    Source(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TaxoscopeError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TaxoscopeError::BadRequest(_) => ErrorCode::BadRequest,
            TaxoscopeError::Config(_) => ErrorCode::Config,
            TaxoscopeError::Source(_) => ErrorCode::Source,
            TaxoscopeError::Render(_) => ErrorCode::Render,
            TaxoscopeError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TaxoscopeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
