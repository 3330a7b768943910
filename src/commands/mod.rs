//! CLI command implementations
//!
//! This module contains the commands supported by the CLI application,
//! built with the Command pattern.

pub mod analyze_command;
pub mod command_traits;
pub mod exif_command;

pub use analyze_command::AnalyzeCommand;
pub use command_traits::{Command, CommandFactory};
pub use exif_command::ExifCommand;

use clap::ArgMatches;

use crate::exif::catalog::TagCatalog;
use crate::jpeg::errors::{JpegError, JpegResult};

/// Factory for creating command instances based on CLI arguments
pub struct JpegscopeCommandFactory;

impl JpegscopeCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        JpegscopeCommandFactory
    }
}

impl Default for JpegscopeCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for JpegscopeCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> JpegResult<Box<dyn Command>> {
        if args.get_flag("exif") {
            Ok(Box::new(ExifCommand::new(args)?))
        } else {
            Ok(Box::new(AnalyzeCommand::new(args)?))
        }
    }
}

/// Reads the required input path argument
pub(crate) fn input_path(args: &ArgMatches) -> JpegResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| JpegError::GenericError("Missing input file".to_string()))
}

/// Loads the catalog named by `--catalog`, if any
pub(crate) fn catalog_override(args: &ArgMatches) -> JpegResult<Option<TagCatalog>> {
    match args.try_get_one::<String>("catalog").ok().flatten() {
        Some(path) => TagCatalog::from_file(path).map(Some),
        None => Ok(None),
    }
}

/// Builds a scanner over the override catalog, or the embedded one
pub(crate) fn scanner_for<'c>(
    catalog: Option<&'c TagCatalog>,
    config: &crate::config::ScanConfig,
) -> crate::jpeg::scanner::JpegScanner<'c> {
    let catalog = catalog.unwrap_or_else(|| TagCatalog::global());
    crate::jpeg::scanner::JpegScanner::with_catalog(catalog, config.clone())
}
