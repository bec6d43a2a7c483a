//! Error types and handlers for registry operations

pub mod handlers;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Status codes carried by Connect error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcCode {
    Canceled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::Canceled => "canceled",
            RpcCode::Unknown => "unknown",
            RpcCode::InvalidArgument => "invalid_argument",
            RpcCode::DeadlineExceeded => "deadline_exceeded",
            RpcCode::NotFound => "not_found",
            RpcCode::AlreadyExists => "already_exists",
            RpcCode::PermissionDenied => "permission_denied",
            RpcCode::ResourceExhausted => "resource_exhausted",
            RpcCode::FailedPrecondition => "failed_precondition",
            RpcCode::Aborted => "aborted",
            RpcCode::OutOfRange => "out_of_range",
            RpcCode::Unimplemented => "unimplemented",
            RpcCode::Internal => "internal",
            RpcCode::Unavailable => "unavailable",
            RpcCode::DataLoss => "data_loss",
            RpcCode::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpcCode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let code = match s {
            "canceled" | "cancelled" => RpcCode::Canceled,
            "unknown" => RpcCode::Unknown,
            "invalid_argument" => RpcCode::InvalidArgument,
            "deadline_exceeded" => RpcCode::DeadlineExceeded,
            "not_found" => RpcCode::NotFound,
            "already_exists" => RpcCode::AlreadyExists,
            "permission_denied" => RpcCode::PermissionDenied,
            "resource_exhausted" => RpcCode::ResourceExhausted,
            "failed_precondition" => RpcCode::FailedPrecondition,
            "aborted" => RpcCode::Aborted,
            "out_of_range" => RpcCode::OutOfRange,
            "unimplemented" => RpcCode::Unimplemented,
            "internal" => RpcCode::Internal,
            "unavailable" => RpcCode::Unavailable,
            "data_loss" => RpcCode::DataLoss,
            "unauthenticated" => RpcCode::Unauthenticated,
            other => {
                return Err(RegistryError::Parse(format!("Unknown RPC code: {}", other)));
            }
        };
        Ok(code)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Error reported by the registry service itself
    #[error("{code}: {message}")]
    Rpc { code: RpcCode, message: String },
    /// Transport level failures (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// File IO errors
    #[error("IO error: {0}")]
    Io(String),
    /// Response decoding errors
    #[error("Parse error: {0}")]
    Parse(String),
    /// Invalid local input
    #[error("Validation error: {0}")]
    Validation(String),
    /// A lookup came back empty
    #[error("Not found: {0}")]
    NotFound(String),
    /// Client construction errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RegistryError {
    pub fn rpc(code: RpcCode, message: impl Into<String>) -> Self {
        RegistryError::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<RpcCode> {
        match self {
            RegistryError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Prefix the message with `context`, keeping the variant and RPC code
    pub fn context(self, context: &str) -> Self {
        let wrap = |message: String| format!("{}: {}", context, message);
        match self {
            RegistryError::Rpc { code, message } => RegistryError::Rpc {
                code,
                message: wrap(message),
            },
            RegistryError::Network(msg) => RegistryError::Network(wrap(msg)),
            RegistryError::Io(msg) => RegistryError::Io(wrap(msg)),
            RegistryError::Parse(msg) => RegistryError::Parse(wrap(msg)),
            RegistryError::Validation(msg) => RegistryError::Validation(wrap(msg)),
            RegistryError::NotFound(msg) => RegistryError::NotFound(wrap(msg)),
            RegistryError::Config(msg) => RegistryError::Config(wrap(msg)),
        }
    }

    /// The only condition that triggers a lookup instead of failing
    pub fn is_already_exists(&self) -> bool {
        self.code() == Some(RpcCode::AlreadyExists)
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::rpc(RpcCode::DeadlineExceeded, err.to_string())
        } else {
            RegistryError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for RegistryError {
    fn from(err: url::ParseError) -> Self {
        RegistryError::Validation(err.to_string())
    }
}
