//! JPEG segment data structures
//!
//! One variant per marker family. Segments borrow their byte ranges from
//! the scanned buffer and are immutable once built.

use std::fmt;

use crate::exif::types::ExifSegment;
use crate::jpeg::marker::{FrameKind, MarkerKind};

/// Segment not parsed beyond its marker and length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericSegment<'a> {
    /// Marker type byte (the byte after 0xFF)
    pub marker: u8,
    pub length: u16,
    /// Payload after the length field
    pub data: &'a [u8],
}

/// COM segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSegment {
    pub length: u16,
    pub text: String,
}

/// One quantization table of a DQT segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    /// 0 for 8-bit entries, 1 for 16-bit entries
    pub precision: u8,
    /// Destination identifier (0..3)
    pub id: u8,
    /// 64 entries in zig-zag order
    pub values: Vec<u16>,
}

/// DQT segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTableSegment<'a> {
    pub length: u16,
    pub tables: Vec<QuantizationTable>,
    /// Bytes left over that do not form a complete table
    pub trailing: &'a [u8],
}

/// Component record of a frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameComponent {
    pub id: u8,
    pub horizontal_sampling: u8,
    pub vertical_sampling: u8,
    pub quantization_table: u8,
}

/// SOFn segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeaderSegment<'a> {
    pub kind: FrameKind,
    pub length: u16,
    /// Sample precision in bits
    pub precision: u8,
    pub height: u16,
    pub width: u16,
    pub components: Vec<FrameComponent>,
    pub trailing: &'a [u8],
}

/// Class of a Huffman table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableClass {
    Dc,
    Ac,
}

/// One Huffman table of a DHT segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    pub class: TableClass,
    pub id: u8,
    /// Number of codes of each length 1..=16
    pub code_lengths: [u8; 16],
    /// Symbol values, in code order
    pub symbols: Vec<u8>,
}

/// DHT segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTableSegment<'a> {
    pub length: u16,
    pub tables: Vec<HuffmanTable>,
    pub trailing: &'a [u8],
}

/// Component selector of a scan header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanComponent {
    pub selector: u8,
    pub dc_table: u8,
    pub ac_table: u8,
}

/// SOS segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHeaderSegment<'a> {
    pub length: u16,
    pub components: Vec<ScanComponent>,
    pub spectral_start: u8,
    pub spectral_end: u8,
    pub approx_high: u8,
    pub approx_low: u8,
    pub trailing: &'a [u8],
}

/// APPn segment with an unrecognized identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSegment<'a> {
    /// n in APPn
    pub index: u8,
    pub length: u16,
    /// Leading NUL-terminated string of the payload, possibly empty
    pub identifier: String,
    /// Payload after the length field
    pub data: &'a [u8],
}

/// APP0 segment with a JFIF header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JfifSegment<'a> {
    /// n of the APPn marker
    pub index: u8,
    pub length: u16,
    pub version_major: u8,
    pub version_minor: u8,
    /// 0 = no units (aspect ratio), 1 = dots per inch, 2 = dots per cm
    pub density_units: u8,
    pub x_density: u16,
    pub y_density: u16,
    pub thumbnail_width: u8,
    pub thumbnail_height: u8,
    /// Uncompressed RGB thumbnail bytes (may be empty)
    pub thumbnail: &'a [u8],
}

/// APP2 segment carrying one chunk of an ICC profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IccSegment<'a> {
    pub index: u8,
    pub length: u16,
    /// 1-based chunk number
    pub sequence: u8,
    pub chunk_count: u8,
    pub profile: &'a [u8],
}

/// A parsed JPEG segment
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Generic(GenericSegment<'a>),
    Comment(CommentSegment),
    QuantizationTable(QuantizationTableSegment<'a>),
    FrameHeader(FrameHeaderSegment<'a>),
    HuffmanTable(HuffmanTableSegment<'a>),
    ScanHeader(ScanHeaderSegment<'a>),
    AppGeneric(AppSegment<'a>),
    AppExif(ExifSegment<'a>),
    AppJfif(JfifSegment<'a>),
    AppIcc(IccSegment<'a>),
}

impl<'a> Segment<'a> {
    /// Declared length of the segment
    pub fn length(&self) -> u16 {
        match self {
            Segment::Generic(s) => s.length,
            Segment::Comment(s) => s.length,
            Segment::QuantizationTable(s) => s.length,
            Segment::FrameHeader(s) => s.length,
            Segment::HuffmanTable(s) => s.length,
            Segment::ScanHeader(s) => s.length,
            Segment::AppGeneric(s) => s.length,
            Segment::AppExif(s) => s.length,
            Segment::AppJfif(s) => s.length,
            Segment::AppIcc(s) => s.length,
        }
    }

    /// Short name of the segment's variant
    pub fn name(&self) -> String {
        match self {
            Segment::Generic(s) => MarkerKind::classify(s.marker).to_string(),
            Segment::Comment(_) => "COM".to_string(),
            Segment::QuantizationTable(_) => "DQT".to_string(),
            Segment::FrameHeader(_) => "SOF".to_string(),
            Segment::HuffmanTable(_) => "DHT".to_string(),
            Segment::ScanHeader(_) => "SOS".to_string(),
            Segment::AppGeneric(s) => format!("APP{}", s.index),
            Segment::AppExif(s) => format!("APP{} (EXIF)", s.index),
            Segment::AppJfif(s) => format!("APP{} (JFIF)", s.index),
            Segment::AppIcc(s) => format!("APP{} (ICC_PROFILE)", s.index),
        }
    }
}

impl<'a> fmt::Display for Segment<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} length={}", self.name(), self.length())?;
        match self {
            Segment::Generic(s) => write!(f, " ({} payload bytes)", s.data.len()),
            Segment::Comment(s) => write!(f, " \"{}\"", s.text),
            Segment::QuantizationTable(s) => {
                let ids: Vec<String> = s
                    .tables
                    .iter()
                    .map(|t| format!("{}/{}-bit", t.id, if t.precision == 0 { 8 } else { 16 }))
                    .collect();
                write!(f, " tables=[{}]", ids.join(", "))
            }
            Segment::FrameHeader(s) => write!(
                f,
                " {} {}x{} precision={} components={}",
                s.kind.name(),
                s.width,
                s.height,
                s.precision,
                s.components.len()
            ),
            Segment::HuffmanTable(s) => {
                let ids: Vec<String> = s
                    .tables
                    .iter()
                    .map(|t| format!("{:?}{} ({} symbols)", t.class, t.id, t.symbols.len()))
                    .collect();
                write!(f, " tables=[{}]", ids.join(", "))
            }
            Segment::ScanHeader(s) => write!(
                f,
                " components={} spectral={}..{} approx={}/{}",
                s.components.len(),
                s.spectral_start,
                s.spectral_end,
                s.approx_high,
                s.approx_low
            ),
            Segment::AppGeneric(s) => write!(f, " identifier=\"{}\"", s.identifier),
            Segment::AppExif(s) => write!(
                f,
                " {} directories, {} fields ({})",
                s.directories.len(),
                s.field_count(),
                s.header.byte_order.name()
            ),
            Segment::AppJfif(s) => write!(
                f,
                " version={}.{:02} density={}x{} units={} thumbnail={}x{}",
                s.version_major,
                s.version_minor,
                s.x_density,
                s.y_density,
                s.density_units,
                s.thumbnail_width,
                s.thumbnail_height
            ),
            Segment::AppIcc(s) => write!(
                f,
                " chunk {}/{} ({} bytes)",
                s.sequence,
                s.chunk_count,
                s.profile.len()
            ),
        }
    }
}
