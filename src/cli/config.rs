//! Configuration management module

use crate::error::{RegistryError, Result};

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(RegistryError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.username.contains(':') {
            return Err(RegistryError::Validation(
                "Username cannot contain ':'".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registry configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub address: String,
    /// Per-call timeout in seconds; `None` leaves the client without one
    pub timeout: Option<u64>,
}

impl RegistryConfig {
    pub fn new(address: String) -> Self {
        Self {
            address,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.address.is_empty() {
            return Err(RegistryError::Validation(
                "Registry address cannot be empty".to_string(),
            ));
        }

        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(RegistryError::Validation(format!(
                "Invalid registry address: {}. Must start with http:// or https://",
                self.address
            )));
        }

        if self.timeout == Some(0) {
            return Err(RegistryError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
