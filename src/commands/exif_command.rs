//! EXIF tag dump command

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::commands::{catalog_override, input_path, scanner_for};
use crate::config::ScanConfig;
use crate::exif::catalog::TagCatalog;
use crate::exif::ifd::ExifField;
use crate::exif::EXIF_OFFSET_TAG;
use crate::jpeg::errors::JpegResult;
use crate::utils::file_utils::read_file;
use crate::utils::format_utils::hex_preview;

/// Command printing every EXIF directory and tag of a file
pub struct ExifCommand {
    input_file: String,
    /// Also print tag descriptions and raw bytes
    verbose: bool,
    config: ScanConfig,
    catalog: Option<TagCatalog>,
}

impl ExifCommand {
    /// Create a new EXIF dump command from CLI arguments
    pub fn new(args: &ArgMatches) -> JpegResult<Self> {
        Ok(ExifCommand {
            input_file: input_path(args)?,
            verbose: args.get_flag("verbose"),
            config: ScanConfig::from_args(args),
            catalog: catalog_override(args)?,
        })
    }

    fn display_field(&self, field: &ExifField) {
        info!("    {}", field);
        if self.verbose {
            if let Some(record) = &field.record {
                if !record.description.is_empty() {
                    info!("        {}", record.description);
                }
            }
            info!(
                "        format code: {}, raw: {}",
                field.format.code(),
                hex_preview(field.raw, 16)
            );
        }
    }
}

impl Command for ExifCommand {
    fn execute(&self) -> JpegResult<()> {
        debug!("Dumping EXIF of {}", self.input_file);

        let buffer = read_file(&self.input_file)?;
        let scanner = scanner_for(self.catalog.as_ref(), &self.config);
        let document = scanner.scan(&buffer)?;

        let exif = match document.exif() {
            Some(exif) => exif,
            None => {
                info!("No EXIF segment found in {}", self.input_file);
                return Ok(());
            }
        };

        info!("EXIF Metadata:");
        info!("  Byte order: {}", exif.header.byte_order.name());
        info!("  Directories: {}", exif.directories.len());

        for directory in &exif.directories {
            info!("\n  {} (offset: {}, {} entries)", directory.role, directory.offset, directory.entry_count());
            for field in &directory.fields {
                self.display_field(field);
            }
            if directory.has_tag(EXIF_OFFSET_TAG) {
                debug!("  {} links to the Exif SubIFD", directory.role);
            }
        }

        if let Some(thumbnail) = exif.thumbnail() {
            info!("\n  Embedded thumbnail: {} bytes", thumbnail.len());
        }

        Ok(())
    }
}
