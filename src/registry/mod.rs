//! Registry module for module registry interactions
//!
//! This module provides authentication, the Connect client and the publish
//! operations used against the module registry service.

pub mod auth;
pub mod client;
pub mod models;
pub mod operations;
pub mod transport;

pub use crate::cli::config::AuthConfig;
pub use auth::Auth;
pub use client::{RegistryClient, RegistryClientBuilder};
pub use operations::{LabelOperations, UploadOperations, UploadOutcome};
pub use transport::RegistryTransport;
