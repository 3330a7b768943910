//! Marker classification
//!
//! Maps the type byte of a marker to the segment family that parses it.

use std::fmt;

use crate::jpeg::constants::markers;

/// Coding process named by a start-of-frame marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Baseline,
    ExtendedSequential,
    Progressive,
    Lossless,
    DifferentialSequential,
    DifferentialProgressive,
}

impl FrameKind {
    /// Returns a human-readable name for this coding process
    pub fn name(&self) -> &'static str {
        match self {
            FrameKind::Baseline => "Baseline DCT",
            FrameKind::ExtendedSequential => "Extended sequential DCT",
            FrameKind::Progressive => "Progressive DCT",
            FrameKind::Lossless => "Lossless (sequential)",
            FrameKind::DifferentialSequential => "Differential sequential DCT",
            FrameKind::DifferentialProgressive => "Differential progressive DCT",
        }
    }
}

/// Segment family selected by a marker's type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// APPn, with n in 0..=15
    App(u8),
    Comment,
    QuantizationTable,
    FrameHeader(FrameKind),
    HuffmanTable,
    ScanHeader,
    EndOfImage,
    /// Any other marker, kept as an unparsed segment
    Other(u8),
}

impl MarkerKind {
    /// Classifies the byte following 0xFF
    ///
    /// SOF7 and the arithmetic-coding frames (0xC8 and up) are not frame
    /// headers here, and neither is DAC (0xCC); they fall through to `Other`.
    pub fn classify(code: u8) -> Self {
        match code {
            markers::APP0..=markers::APP15 => MarkerKind::App(code - markers::APP0),
            markers::COM => MarkerKind::Comment,
            markers::DQT => MarkerKind::QuantizationTable,
            markers::SOF0 => MarkerKind::FrameHeader(FrameKind::Baseline),
            markers::SOF1 => MarkerKind::FrameHeader(FrameKind::ExtendedSequential),
            markers::SOF2 => MarkerKind::FrameHeader(FrameKind::Progressive),
            markers::SOF3 => MarkerKind::FrameHeader(FrameKind::Lossless),
            markers::SOF5 => MarkerKind::FrameHeader(FrameKind::DifferentialSequential),
            markers::SOF6 => MarkerKind::FrameHeader(FrameKind::DifferentialProgressive),
            markers::DHT => MarkerKind::HuffmanTable,
            markers::SOS => MarkerKind::ScanHeader,
            markers::EOI => MarkerKind::EndOfImage,
            other => MarkerKind::Other(other),
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::App(n) => write!(f, "APP{}", n),
            MarkerKind::Comment => write!(f, "COM"),
            MarkerKind::QuantizationTable => write!(f, "DQT"),
            MarkerKind::FrameHeader(kind) => write!(f, "SOF ({})", kind.name()),
            MarkerKind::HuffmanTable => write!(f, "DHT"),
            MarkerKind::ScanHeader => write!(f, "SOS"),
            MarkerKind::EndOfImage => write!(f, "EOI"),
            MarkerKind::Other(code) => write!(f, "0xFF{:02X}", code),
        }
    }
}
