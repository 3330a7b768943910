//! Tests for the segment scanner

use crate::config::ScanConfig;
use crate::jpeg::errors::JpegError;
use crate::jpeg::marker::FrameKind;
use crate::jpeg::scanner::JpegScanner;
use crate::jpeg::segment::Segment;
use crate::jpeg::tests::test_utils::{create_baseline_jpeg, create_minimal_jfif, push_segment};

#[test]
fn test_minimal_jfif() {
    let buffer = create_minimal_jfif();
    let document = JpegScanner::new().scan(&buffer).unwrap();

    assert_eq!(document.segment_count(), 1);
    match &document.segments[0] {
        Segment::AppJfif(jfif) => {
            assert_eq!(jfif.length, 0x10);
            assert_eq!((jfif.version_major, jfif.version_minor), (1, 1));
        }
        other => panic!("expected JFIF segment, got {:?}", other),
    }
    assert!(!document.has_huffman);
    assert!(document.scan_data.is_none());
}

#[test]
fn test_baseline_segments() {
    let buffer = create_baseline_jpeg();
    let document = JpegScanner::new().scan(&buffer).unwrap();

    let names: Vec<String> = document.segments.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["APP0 (JFIF)", "DQT", "SOF", "DHT", "SOS"]);

    let frame = document.frame_header().unwrap();
    assert_eq!(frame.kind, FrameKind::Baseline);
    assert_eq!((frame.width, frame.height), (16, 8));

    assert!(document.has_huffman);
    assert_eq!(document.encoding_algorithm(), Some("Huffman coding"));
    assert_eq!(document.scan_data, Some(&[0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9][..]));
}

#[test]
fn test_huffman_flag_without_frame() {
    let mut buffer = vec![0xFF, 0xD8];
    let mut dht = vec![0x10];
    dht.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    dht.push(0x00);
    push_segment(&mut buffer, 0xC4, &dht);
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    assert!(document.frame_header().is_none());
    assert!(document.has_huffman);
}

#[test]
fn test_not_a_jpeg() {
    let buffer = [0x89, b'P', b'N', b'G', 0x0D, 0x0A];
    assert!(matches!(JpegScanner::new().scan(&buffer), Err(JpegError::NotAJpeg)));
    assert!(matches!(JpegScanner::new().scan(&[0xFF, 0xD8]), Err(JpegError::NotAJpeg)));
}

#[test]
fn test_missing_eoi_lenient() {
    let mut buffer = create_minimal_jfif();
    buffer.truncate(buffer.len() - 2);

    assert!(matches!(JpegScanner::new().scan(&buffer), Err(JpegError::NotAJpeg)));

    let config = ScanConfig {
        strict_markers: false,
        ..ScanConfig::default()
    };
    let document = JpegScanner::with_config(config).scan(&buffer).unwrap();
    assert_eq!(document.segment_count(), 1);
}

#[test]
fn test_truncated_segment() {
    // COM declares 0x40 bytes, only a handful follow
    let buffer = [0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x40, b'h', b'i', 0xFF, 0xD9];
    match JpegScanner::new().scan(&buffer) {
        Err(JpegError::TruncatedSegment { offset, declared, available }) => {
            assert_eq!(offset, 2);
            assert_eq!(declared, 0x40);
            assert_eq!(available, 6);
        }
        other => panic!("expected TruncatedSegment, got {:?}", other),
    }
}

#[test]
fn test_length_below_two_is_truncated() {
    let buffer = [0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x01, 0xFF, 0xD9];
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::TruncatedSegment { .. })
    ));
}

#[test]
fn test_unknown_marker_is_generic() {
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xDD, &[0x00, 0x10]); // DRI
    push_segment(&mut buffer, 0xFE, b"after");
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    assert_eq!(document.segment_count(), 2);
    match &document.segments[0] {
        Segment::Generic(generic) => {
            assert_eq!(generic.marker, 0xDD);
            assert_eq!(generic.data, &[0x00, 0x10]);
        }
        other => panic!("expected generic segment, got {:?}", other),
    }
    match &document.segments[1] {
        Segment::Comment(comment) => assert_eq!(comment.text, "after"),
        other => panic!("expected comment, got {:?}", other),
    }
}

#[test]
fn test_short_frame_header_is_generic() {
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xC0, &[0x08, 0x00]);
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    assert!(matches!(document.segments[0], Segment::Generic(_)));
}

#[test]
fn test_generic_app_segment() {
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xEE, b"Adobe\0\x64\x00");
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    match &document.segments[0] {
        Segment::AppGeneric(app) => {
            assert_eq!(app.index, 14);
            assert_eq!(app.identifier, "Adobe");
        }
        other => panic!("expected APP14, got {:?}", other),
    }
}

#[test]
fn test_icc_segment() {
    let mut payload = b"ICC_PROFILE\0".to_vec();
    payload.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x02, 0x0C]);
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xE2, &payload);
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    let chunks = document.icc_chunks();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].profile, &[0x00, 0x00, 0x02, 0x0C]);
}

#[test]
fn test_segment_count_stops_at_non_marker() {
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xFE, b"one");
    push_segment(&mut buffer, 0xFE, b"two");
    buffer.push(0x42);
    push_segment(&mut buffer, 0xFE, b"never");
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    assert_eq!(document.segment_count(), 2);
}

#[test]
fn test_scan_is_idempotent() {
    let buffer = create_baseline_jpeg();
    let scanner = JpegScanner::new();
    assert_eq!(scanner.scan(&buffer).unwrap(), scanner.scan(&buffer).unwrap());
}
