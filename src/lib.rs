//! Module Registry Pusher Library
//!
//! Uploads a module archive to a module registry over the Connect protocol and labels
//! the resulting commit, resolving existing commits and labels when they already exist.

pub mod archive;
pub mod cli;
pub mod error;
pub mod logging;
pub mod registry;

pub use archive::{ArchiveFormat, ModuleArchive};
pub use cli::{Args, PublishOutcome, Runner};
pub use error::{RegistryError, Result, RpcCode};
pub use logging::Logger;
