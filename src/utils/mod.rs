//! Utility modules for common functionality
//!
//! Logging, file loading and report formatting used by the CLI commands.

pub mod file_utils;
pub mod format_utils;
pub mod logger;
