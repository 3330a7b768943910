//! JPEG structure analysis command
//!
//! Lists the segments of a JPEG file with the fields each sub-parser
//! decoded, plus a short summary of the image.

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::commands::{catalog_override, input_path, scanner_for};
use crate::config::ScanConfig;
use crate::exif::catalog::TagCatalog;
use crate::jpeg::document::Document;
use crate::jpeg::errors::JpegResult;
use crate::jpeg::segment::Segment;
use crate::utils::file_utils::read_file;
use crate::utils::format_utils::{density_unit_name, hex_preview};

/// Number of payload bytes shown for unparsed segments
const PREVIEW_BYTES: usize = 16;

/// Command for analyzing JPEG file structure
pub struct AnalyzeCommand {
    /// Path to the input file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    config: ScanConfig,
    catalog: Option<TagCatalog>,
}

impl AnalyzeCommand {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches) -> JpegResult<Self> {
        Ok(AnalyzeCommand {
            input_file: input_path(args)?,
            verbose: args.get_flag("verbose"),
            config: ScanConfig::from_args(args),
            catalog: catalog_override(args)?,
        })
    }

    /// Display the document summary
    fn display_summary(&self, document: &Document) {
        info!("JPEG Analysis Results:");
        info!("  File: {}", self.input_file);
        info!("  Number of segments: {}", document.segment_count());

        if let Some(frame) = document.frame_header() {
            info!("  Dimensions: {}x{}", frame.width, frame.height);
            info!("  Coding process: {}", frame.kind.name());
            info!("  Components: {}", frame.components.len());
        } else {
            info!("  Dimensions: Not available");
        }

        match document.encoding_algorithm() {
            Some(algorithm) => info!("  Encoding: {}", algorithm),
            None => info!("  Encoding: Not available"),
        }

        if let Some(data) = document.scan_data {
            info!("  Scan data: {} bytes", data.len());
        }
    }

    /// Display one segment, with extra detail in verbose mode
    fn display_segment(&self, index: usize, segment: &Segment) {
        info!("  {}: {}", index, segment);
        if !self.verbose {
            return;
        }

        match segment {
            Segment::Generic(s) => info!("      data: {}", hex_preview(s.data, PREVIEW_BYTES)),
            Segment::AppGeneric(s) => info!("      data: {}", hex_preview(s.data, PREVIEW_BYTES)),
            Segment::AppJfif(s) => info!(
                "      density unit: {}, thumbnail bytes: {}",
                density_unit_name(s.density_units),
                s.thumbnail.len()
            ),
            Segment::FrameHeader(s) => {
                for component in &s.components {
                    info!(
                        "      component {}: sampling {}x{}, quantization table {}",
                        component.id,
                        component.horizontal_sampling,
                        component.vertical_sampling,
                        component.quantization_table
                    );
                }
            }
            Segment::ScanHeader(s) => {
                for component in &s.components {
                    info!(
                        "      component {}: DC table {}, AC table {}",
                        component.selector, component.dc_table, component.ac_table
                    );
                }
            }
            Segment::AppExif(s) => {
                for directory in &s.directories {
                    info!(
                        "      {} at offset {}: {} entries",
                        directory.role,
                        directory.offset,
                        directory.entry_count()
                    );
                }
            }
            _ => {}
        }
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> JpegResult<()> {
        let buffer = read_file(&self.input_file)?;
        let scanner = scanner_for(self.catalog.as_ref(), &self.config);
        debug!("Analyzing {} with {:?}", self.input_file, scanner.config());
        let document = scanner.scan(&buffer)?.with_name(&self.input_file);

        self.display_summary(&document);

        info!("Segments:");
        for (index, segment) in document.segments.iter().enumerate() {
            self.display_segment(index, segment);
        }

        Ok(())
    }
}
