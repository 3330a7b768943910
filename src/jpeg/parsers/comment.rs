//! COM segments

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::CommentSegment;

/// Reads the comment text; invalid UTF-8 is replaced, not rejected
pub fn parse(segment: &[u8], length: u16) -> CommentSegment {
    CommentSegment {
        length,
        text: String::from_utf8_lossy(payload(segment)).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text() {
        let mut segment = vec![0xFF, 0xFE, 0x00, 0x07];
        segment.extend_from_slice(b"hello");
        assert_eq!(parse(&segment, 7).text, "hello");
    }
}
