//! JPEG segment scanner
//!
//! Walks a buffer from the SOI marker, slicing out one segment per marker
//! and handing it to the sub-parser for its family. The walk stops at the
//! first SOS segment (whose trailing bytes become the scan data), at EOI,
//! or at the first byte that does not start a marker.

use log::{debug, info, warn};

use crate::config::ScanConfig;
use crate::exif::catalog::TagCatalog;
use crate::exif::reader::ExifReader;
use crate::jpeg::constants::{markers, EOI_MARKER, SEGMENT_HEADER_SIZE, SOI_MARKER};
use crate::jpeg::document::Document;
use crate::jpeg::errors::{JpegError, JpegResult};
use crate::jpeg::marker::MarkerKind;
use crate::jpeg::parsers::app::{self, AppKind};
use crate::jpeg::parsers::{comment, frame, generic, huffman, icc, jfif, quantization, scan};
use crate::jpeg::segment::Segment;

/// Scanner for JPEG segment structure
pub struct JpegScanner<'c> {
    config: ScanConfig,
    exif_reader: ExifReader<'c>,
}

impl JpegScanner<'static> {
    /// Creates a scanner with default settings and the embedded tag catalog
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Creates a scanner using the embedded tag catalog
    pub fn with_config(config: ScanConfig) -> Self {
        Self::with_catalog(TagCatalog::global(), config)
    }
}

impl Default for JpegScanner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> JpegScanner<'c> {
    /// Creates a scanner that names EXIF tags from `catalog`
    pub fn with_catalog(catalog: &'c TagCatalog, config: ScanConfig) -> Self {
        let exif_reader = ExifReader::new(catalog, &config);
        JpegScanner { config, exif_reader }
    }

    /// Returns the scanner's configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans a complete JPEG buffer
    ///
    /// # Arguments
    /// * `buffer` - The whole file contents
    ///
    /// # Returns
    /// The segments in file order, borrowing from `buffer`
    pub fn scan<'a>(&self, buffer: &'a [u8]) -> JpegResult<Document<'a>> {
        debug!("Scanner::scan starting on {} bytes", buffer.len());

        if !has_jpeg_markers(buffer) {
            if self.config.strict_markers || buffer.len() < SEGMENT_HEADER_SIZE {
                return Err(JpegError::NotAJpeg);
            }
            warn!("SOI and/or EOI marker not found, scanning anyway");
        }

        let mut document = Document::new();
        let mut offset = SOI_MARKER.len();

        loop {
            let (prefix, code) = match buffer.get(offset..offset + 2) {
                Some(marker) => (marker[0], marker[1]),
                None => {
                    debug!("End of buffer at offset {}", offset);
                    break;
                }
            };
            if prefix != markers::PREFIX {
                debug!("Non-marker byte 0x{:02x} at offset {}, stopping", prefix, offset);
                break;
            }

            let kind = MarkerKind::classify(code);
            if kind == MarkerKind::EndOfImage {
                debug!("EOI at offset {}", offset);
                break;
            }

            let (bytes, length) = slice_segment(buffer, offset)?;
            debug!("Segment {} at offset {}, length {}", kind, offset, length);

            let segment = self.parse_segment(kind, bytes, length)?;
            document.segments.push(segment);
            offset += bytes.len();

            match kind {
                MarkerKind::HuffmanTable => document.has_huffman = true,
                MarkerKind::ScanHeader => {
                    document.scan_data = Some(&buffer[offset..]);
                    debug!("Scan data: {} bytes from offset {}", buffer.len() - offset, offset);
                    break;
                }
                _ => {}
            }
        }

        info!("Scanned {} segments", document.segments.len());
        Ok(document)
    }

    /// Dispatches one segment to the sub-parser for its marker family
    fn parse_segment<'a>(&self, kind: MarkerKind, bytes: &'a [u8], length: u16) -> JpegResult<Segment<'a>> {
        let segment = match kind {
            MarkerKind::App(index) => match app::identify(bytes) {
                AppKind::Exif => Segment::AppExif(self.exif_reader.read(bytes, length, index)?),
                AppKind::Jfif => jfif::parse(bytes, length, index)
                    .map(Segment::AppJfif)
                    .unwrap_or_else(|| unparsed("JFIF", bytes, length)),
                AppKind::Icc => icc::parse(bytes, length, index)
                    .map(Segment::AppIcc)
                    .unwrap_or_else(|| unparsed("ICC_PROFILE", bytes, length)),
                AppKind::Generic => Segment::AppGeneric(app::parse(bytes, length, index)),
            },
            MarkerKind::Comment => Segment::Comment(comment::parse(bytes, length)),
            MarkerKind::QuantizationTable => Segment::QuantizationTable(quantization::parse(bytes, length)),
            MarkerKind::FrameHeader(frame_kind) => frame::parse(bytes, length, frame_kind)
                .map(Segment::FrameHeader)
                .unwrap_or_else(|| unparsed("SOF", bytes, length)),
            MarkerKind::HuffmanTable => Segment::HuffmanTable(huffman::parse(bytes, length)),
            MarkerKind::ScanHeader => scan::parse(bytes, length)
                .map(Segment::ScanHeader)
                .unwrap_or_else(|| unparsed("SOS", bytes, length)),
            MarkerKind::EndOfImage | MarkerKind::Other(_) => Segment::Generic(generic::parse(bytes, length)),
        };

        Ok(segment)
    }
}

/// Checks that the buffer opens with SOI and closes with EOI
pub fn has_jpeg_markers(buffer: &[u8]) -> bool {
    buffer.len() >= SEGMENT_HEADER_SIZE
        && buffer.starts_with(&SOI_MARKER)
        && buffer.ends_with(&EOI_MARKER)
}

/// Returns the bytes of the segment at `offset` and its length field
fn slice_segment(buffer: &[u8], offset: usize) -> JpegResult<(&[u8], u16)> {
    let available = buffer.len() - offset - 2;
    let length = match buffer.get(offset + 2..offset + SEGMENT_HEADER_SIZE) {
        Some(field) => u16::from_be_bytes([field[0], field[1]]),
        None => {
            return Err(JpegError::TruncatedSegment {
                offset,
                declared: 0,
                available,
            })
        }
    };

    let end = offset + 2 + length as usize;
    if (length as usize) < 2 || end > buffer.len() {
        return Err(JpegError::TruncatedSegment {
            offset,
            declared: length as usize,
            available,
        });
    }

    Ok((&buffer[offset..end], length))
}

fn unparsed<'a>(what: &str, bytes: &'a [u8], length: u16) -> Segment<'a> {
    warn!("{} segment too short for its fixed fields, keeping it unparsed", what);
    Segment::Generic(generic::parse(bytes, length))
}
