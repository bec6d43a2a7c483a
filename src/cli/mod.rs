//! Command line interface module
//!
//! This module provides the entry point for parsing command-line arguments and running the
//! publish workflow: argument parsing, validation, and the runner that drives both steps.

pub mod args;
pub mod config;
pub mod runner;

pub use args::Args;
pub use config::{AuthConfig, RegistryConfig};
pub use runner::{PublishOutcome, Runner};
