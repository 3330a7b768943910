//! ICC profile APP2 segments
//!
//! A profile larger than one segment is split into numbered chunks; each
//! segment is parsed on its own.

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::IccSegment;

/// "ICC_PROFILE\0"
const ICC_HEADER_LEN: usize = 12;

/// Reads the chunk number, chunk count and the profile bytes
///
/// Returns None when the payload ends before the chunk counters.
pub fn parse(segment: &[u8], length: u16, index: u8) -> Option<IccSegment<'_>> {
    let payload = payload(segment);
    let sequence = *payload.get(ICC_HEADER_LEN)?;
    let chunk_count = *payload.get(ICC_HEADER_LEN + 1)?;

    Some(IccSegment {
        index,
        length,
        sequence,
        chunk_count,
        profile: &payload[ICC_HEADER_LEN + 2..],
    })
}
