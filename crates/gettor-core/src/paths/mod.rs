//! Path utilities for the GetTor configuration and database files.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod config;
mod error;

pub use config::{DEFAULT_CONFIG_PATH, expand_tilde, resolve_config_path};
pub use error::PathError;
