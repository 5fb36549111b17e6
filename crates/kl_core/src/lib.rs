//! Core utilities shared between the kindling crates.
//!
//! # Contains
//! - The content store (hash-verified fetch-or-reuse of files)
//! - File, hashing and download utilities
//! - Error types
//! - JSON structs for the version catalog, version details,
//!   asset index and launcher config
//! - Logging macros

mod error;
/// Common utilities for working with files, hashes and downloads.
pub mod file_utils;
/// JSON structs for the version catalog, version details, asset index, etc.
pub mod json;
mod layout;
#[cfg(any(test, feature = "test-utils"))]
mod memory_fetcher;
mod platform;
/// Logging macros.
pub mod print;
mod store;

pub use error::{
    DownloadError, DownloadFileError, IntoIoError, IntoJsonError, IoError, JsonError,
};
pub use file_utils::{HttpFetcher, RequestError};
pub use layout::StoreLayout;
pub use platform::Platform;
pub use print::{logger_init, LoggingState, LOGGER};
pub use store::{ContentItem, ContentStore, Fetcher};

#[cfg(any(test, feature = "test-utils"))]
pub use memory_fetcher::MemoryFetcher;

pub const CLASSPATH_SEPARATOR: char = if cfg!(unix) { ':' } else { ';' };

pub const LAUNCHER_VERSION_NAME: &str = env!("CARGO_PKG_VERSION");
