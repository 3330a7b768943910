//! Unparsed segments

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::GenericSegment;

/// Records a segment by marker, length and raw payload
pub fn parse(segment: &[u8], length: u16) -> GenericSegment<'_> {
    GenericSegment {
        marker: segment.get(1).copied().unwrap_or(0),
        length,
        data: payload(segment),
    }
}
