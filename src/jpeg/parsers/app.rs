//! APPn segments
//!
//! The identifier window (segment bytes 4..15) decides whether an APP
//! segment is EXIF, JFIF, an ICC profile chunk, or something else.

use crate::jpeg::constants::identifiers;
use crate::jpeg::parsers::payload;
use crate::jpeg::segment::AppSegment;

/// Longest identifier string looked for in a generic APP payload
const MAX_IDENTIFIER_LEN: usize = 32;

/// Handling chosen for an APP segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Exif,
    Jfif,
    Icc,
    Generic,
}

/// Classifies an APP segment by its identifier window
pub fn identify(segment: &[u8]) -> AppKind {
    let end = segment.len().min(identifiers::WINDOW_END);
    let window = segment.get(identifiers::WINDOW_START..end).unwrap_or(&[]);

    if window.starts_with(identifiers::EXIF) {
        AppKind::Exif
    } else if window.starts_with(identifiers::JFIF) {
        AppKind::Jfif
    } else if window == identifiers::ICC_PROFILE {
        AppKind::Icc
    } else {
        AppKind::Generic
    }
}

/// Records an APP segment with an unrecognized identifier
pub fn parse(segment: &[u8], length: u16, index: u8) -> AppSegment<'_> {
    let data = payload(segment);
    AppSegment {
        index,
        length,
        identifier: read_identifier(data),
        data,
    }
}

/// Leading NUL-terminated printable string, or empty
fn read_identifier(data: &[u8]) -> String {
    let window = &data[..data.len().min(MAX_IDENTIFIER_LEN)];
    match window.iter().position(|&b| b == 0) {
        Some(end) if window[..end].iter().all(|b| b.is_ascii_graphic() || *b == b' ') => {
            String::from_utf8_lossy(&window[..end]).into_owned()
        }
        _ => String::new(),
    }
}
