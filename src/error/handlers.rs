//! Decoding of error responses returned by the registry

use crate::error::{RegistryError, RpcCode};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ConnectErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Turns non-success HTTP responses into [`RegistryError::Rpc`]
pub struct RpcErrorHandler;

impl RpcErrorHandler {
    /// Build an error from a failed unary call.
    ///
    /// A Connect error body wins; anything else falls back to the code implied
    /// by the HTTP status, with the raw body as the message.
    pub fn handle_response_error(status: StatusCode, body: &str, procedure: &str) -> RegistryError {
        if let Ok(parsed) = serde_json::from_str::<ConnectErrorBody>(body) {
            if let Some(code) = parsed.code.as_deref().and_then(|c| c.parse::<RpcCode>().ok()) {
                let message = parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("{} failed", procedure));
                return RegistryError::rpc(code, message);
            }
        }

        let code = Self::code_for_status(status);
        let message = if body.trim().is_empty() {
            format!("{} failed (status {})", procedure, status)
        } else {
            format!("{} failed (status {}): {}", procedure, status, body.trim())
        };
        RegistryError::rpc(code, message)
    }

    /// Connect's HTTP to code mapping, used when the body carries no code
    pub fn code_for_status(status: StatusCode) -> RpcCode {
        match status.as_u16() {
            400 => RpcCode::Internal,
            401 => RpcCode::Unauthenticated,
            403 => RpcCode::PermissionDenied,
            404 => RpcCode::Unimplemented,
            429 | 502 | 503 | 504 => RpcCode::Unavailable,
            _ => RpcCode::Unknown,
        }
    }
}
