//! Authentication for module registry access

use crate::cli::config::AuthConfig;
use crate::error::{RegistryError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// HTTP Basic credentials attached to every outbound call
#[derive(Debug, Clone)]
pub struct Auth {
    username: String,
    password: String,
}

impl Auth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.username, &config.password)
    }

    /// `Basic base64(user:password)`
    pub fn header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Install the Authorization header; the value is marked sensitive so it
    /// stays out of debug output
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let mut value = HeaderValue::from_str(&self.header_value()).map_err(|e| {
            RegistryError::Validation(format!("Invalid credentials for Authorization header: {}", e))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
