//! The result of scanning a JPEG buffer

use std::fmt;

use crate::exif::types::ExifSegment;
use crate::jpeg::segment::{FrameHeaderSegment, IccSegment, JfifSegment, Segment};

/// Ordered segments of a JPEG file plus its trailing scan data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document<'a> {
    /// Name of the source, when the caller supplied one
    pub name: Option<String>,
    /// Segments in file order
    pub segments: Vec<Segment<'a>>,
    /// Everything after the first SOS segment, if one was seen
    pub scan_data: Option<&'a [u8]>,
    /// Whether a DHT segment was seen
    pub has_huffman: bool,
}

impl<'a> Document<'a> {
    /// Creates an empty document
    pub fn new() -> Self {
        Document::default()
    }

    /// Attaches a source name, typically the file path
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Returns the number of segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the first EXIF segment
    pub fn exif(&self) -> Option<&ExifSegment<'a>> {
        self.segments.iter().find_map(|s| match s {
            Segment::AppExif(exif) => Some(exif),
            _ => None,
        })
    }

    /// Returns the first JFIF segment
    pub fn jfif(&self) -> Option<&JfifSegment<'a>> {
        self.segments.iter().find_map(|s| match s {
            Segment::AppJfif(jfif) => Some(jfif),
            _ => None,
        })
    }

    /// Returns the first frame header
    pub fn frame_header(&self) -> Option<&FrameHeaderSegment<'a>> {
        self.segments.iter().find_map(|s| match s {
            Segment::FrameHeader(frame) => Some(frame),
            _ => None,
        })
    }

    /// Returns every ICC profile chunk, in file order
    pub fn icc_chunks(&self) -> Vec<&IccSegment<'a>> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::AppIcc(icc) => Some(icc),
                _ => None,
            })
            .collect()
    }

    /// Entropy coding named by the tables present
    pub fn encoding_algorithm(&self) -> Option<&'static str> {
        if self.has_huffman {
            Some("Huffman coding")
        } else {
            None
        }
    }
}

impl<'a> fmt::Display for Document<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "JPEG File: {}", self.name.as_deref().unwrap_or("<buffer>"))?;
        writeln!(f, "  Number of segments: {}", self.segments.len())?;

        if let Some(frame) = self.frame_header() {
            writeln!(f, "  Dimensions: {}x{}", frame.width, frame.height)?;
        }
        if let Some(algorithm) = self.encoding_algorithm() {
            writeln!(f, "  Encoding: {}", algorithm)?;
        }
        if let Some(data) = self.scan_data {
            writeln!(f, "  Scan data: {} bytes", data.len())?;
        }

        writeln!(f, "  Segments:")?;
        for (i, segment) in self.segments.iter().enumerate() {
            writeln!(f, "    {}: {}", i, segment)?;
        }

        Ok(())
    }
}
