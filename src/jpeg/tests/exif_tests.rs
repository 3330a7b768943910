//! Tests for EXIF segment parsing through the scanner

use byteorder::{BigEndian, WriteBytesExt};

use crate::config::ScanConfig;
use crate::exif::catalog::{catalog, DirectoryRole, TagCatalog};
use crate::exif::value::{DataFormat, UnsignedRational, Value};
use crate::io::byte_order::ByteOrder;
use crate::jpeg::errors::JpegError;
use crate::jpeg::scanner::JpegScanner;
use crate::exif::EXIF_OFFSET_TAG;
use crate::jpeg::tests::test_utils::{create_exif_full_le, create_exif_orientation_be, push_segment, wrap_app1};

#[test]
fn test_big_endian_orientation() {
    let buffer = wrap_app1(&create_exif_orientation_be());
    let document = JpegScanner::new().scan(&buffer).unwrap();

    let exif = document.exif().unwrap();
    assert_eq!(exif.header.byte_order, ByteOrder::BigEndian);
    assert_eq!(exif.header.magic, 42);
    assert_eq!(exif.directories.len(), 1);

    let field = exif.field(0x0112).unwrap();
    assert_eq!(field.format, DataFormat::UnsignedShort);
    assert_eq!(field.value, Value::UnsignedShort(1));
    assert_eq!(field.name(), "Orientation");
    assert!(field.is_inline());
}

#[test]
fn test_little_endian_directory_walk() {
    let buffer = wrap_app1(&create_exif_full_le());
    let document = JpegScanner::new().scan(&buffer).unwrap();
    let exif = document.exif().unwrap();

    let roles: Vec<DirectoryRole> = exif.directories.iter().map(|d| d.role).collect();
    assert_eq!(roles, vec![DirectoryRole::Primary, DirectoryRole::Extended, DirectoryRole::Thumbnail]);

    let ifd0 = exif.directory(DirectoryRole::Primary).unwrap();
    assert_eq!(ifd0.entry_count(), 3);
    assert_eq!(ifd0.next_ifd_offset, 68);
    assert_eq!(ifd0.field(0x010F).unwrap().value, Value::Text("Canon\0".to_string()));
    assert_eq!(ifd0.field(0x0112).unwrap().value, Value::UnsignedShort(6));
    assert_eq!(ifd0.field(0x8769).unwrap().name(), "ExifOffset");

    let sub = exif.directory(DirectoryRole::Extended).unwrap();
    let exposure = sub.field(0x829A).unwrap();
    assert_eq!(exposure.name(), "ExposureTime");
    assert_eq!(
        exposure.value,
        Value::UnsignedRational(UnsignedRational { numerator: 1, denominator: 250 })
    );
    assert!(!exposure.is_inline());

    let ifd1 = exif.directory(DirectoryRole::Thumbnail).unwrap();
    assert_eq!(ifd1.field(0x0201).unwrap().name(), "JpegIFOffset");
    assert_eq!(exif.thumbnail(), Some(&[0xFF, 0xD8, 0xFF, 0xD9][..]));
}

#[test]
fn test_catalog_is_scoped_by_role() {
    let buffer = wrap_app1(&create_exif_full_le());
    let document = JpegScanner::new().scan(&buffer).unwrap();
    let exif = document.exif().unwrap();

    // 0x0201 is only catalogued for the thumbnail directory
    let ifd1 = exif.directory(DirectoryRole::Thumbnail).unwrap();
    assert!(ifd1.field(0x0201).unwrap().record.is_some());
    assert!(catalog(DirectoryRole::Primary, 0x0201).is_none());
    assert!(catalog(DirectoryRole::Thumbnail, 0x0201).is_some());
}

#[test]
fn test_thumbnail_not_followed() {
    let buffer = wrap_app1(&create_exif_full_le());
    let config = ScanConfig {
        follow_thumbnail: false,
        ..ScanConfig::default()
    };
    let document = JpegScanner::with_config(config).scan(&buffer).unwrap();
    let exif = document.exif().unwrap();

    assert_eq!(exif.directories.len(), 2);
    assert!(exif.thumbnail().is_none());
}

#[test]
fn test_custom_catalog() {
    let catalog = TagCatalog::from_str("[primary]\n\"0x0112\" = { name = \"Rotation\" }").unwrap();
    let buffer = wrap_app1(&create_exif_orientation_be());
    let document = JpegScanner::with_catalog(&catalog, ScanConfig::default())
        .scan(&buffer)
        .unwrap();

    assert_eq!(document.exif().unwrap().field(0x0112).unwrap().name(), "Rotation");
}

#[test]
fn test_unknown_tag_has_no_record() {
    let mut payload = create_exif_orientation_be();
    // Retag the single entry (at TIFF offset 10) as 0xBEEF
    payload[6 + 10] = 0xBE;
    payload[6 + 11] = 0xEF;

    let buffer = wrap_app1(&payload);
    let document = JpegScanner::new().scan(&buffer).unwrap();
    let field = document.exif().unwrap().field(0xBEEF).unwrap();
    assert!(field.record.is_none());
    assert_eq!(field.name(), "Unknown");
}

#[test]
fn test_entry_count_overruns_segment() {
    let mut payload = create_exif_orientation_be();
    // Entry count at TIFF offset 8
    payload[6 + 8] = 0x00;
    payload[6 + 9] = 0x40;

    let buffer = wrap_app1(&payload);
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::MalformedDirectory(_))
    ));
}

#[test]
fn test_value_offset_outside_segment() {
    let mut payload = b"Exif\0\0MM".to_vec();
    payload.write_u16::<BigEndian>(42).unwrap();
    payload.write_u32::<BigEndian>(8).unwrap();
    payload.write_u16::<BigEndian>(1).unwrap();
    payload.write_u16::<BigEndian>(0x010F).unwrap();
    payload.write_u16::<BigEndian>(2).unwrap();
    payload.write_u32::<BigEndian>(32).unwrap();
    payload.write_u32::<BigEndian>(0x1000).unwrap();
    payload.write_u32::<BigEndian>(0).unwrap();

    let buffer = wrap_app1(&payload);
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::MalformedDirectory(_))
    ));
}

#[test]
fn test_directory_cycle() {
    let mut payload = create_exif_orientation_be();
    // Point IFD0's next link back at IFD0 (TIFF offset 8 + 2 + 12 = 22)
    let link = 6 + 22;
    payload[link..link + 4].copy_from_slice(&[0x00, 0x00, 0x00, 0x08]);

    let buffer = wrap_app1(&payload);
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::MalformedDirectory(_))
    ));
}

#[test]
fn test_invalid_byte_order() {
    let mut payload = create_exif_orientation_be();
    payload[6] = b'X';
    payload[7] = b'X';

    let buffer = wrap_app1(&payload);
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::InvalidByteOrder(_))
    ));
}

#[test]
fn test_bad_magic() {
    let mut payload = create_exif_orientation_be();
    payload[6 + 3] = 43;

    let buffer = wrap_app1(&payload);
    assert!(matches!(
        JpegScanner::new().scan(&buffer),
        Err(JpegError::MalformedDirectory(_))
    ));
}

#[test]
fn test_multi_component_values() {
    let mut payload = b"Exif\0\0MM".to_vec();
    payload.write_u16::<BigEndian>(42).unwrap();
    payload.write_u32::<BigEndian>(8).unwrap();
    payload.write_u16::<BigEndian>(1).unwrap();
    payload.write_u16::<BigEndian>(0x0102).unwrap(); // BitsPerSample
    payload.write_u16::<BigEndian>(3).unwrap();
    payload.write_u32::<BigEndian>(3).unwrap();
    payload.write_u32::<BigEndian>(26).unwrap();    // 6 bytes, stored out of line
    payload.write_u32::<BigEndian>(0).unwrap();
    for _ in 0..3 {
        payload.write_u16::<BigEndian>(8).unwrap();
    }

    let buffer = wrap_app1(&payload);
    let document = JpegScanner::new().scan(&buffer).unwrap();
    let field = document.exif().unwrap().field(0x0102).unwrap();
    assert_eq!(field.value, Value::UnsignedShort(8));
    assert_eq!(field.values().len(), 3);
    assert_eq!(field.raw.len(), 6);
}

#[test]
fn test_sub_ifd_link_is_tagged() {
    let buffer = wrap_app1(&create_exif_full_le());
    let document = JpegScanner::new().scan(&buffer).unwrap();
    let exif = document.exif().unwrap();

    assert!(exif.directory(DirectoryRole::Primary).unwrap().has_tag(EXIF_OFFSET_TAG));
    assert!(!exif.directory(DirectoryRole::Extended).unwrap().has_tag(EXIF_OFFSET_TAG));
    assert_eq!(exif.field(EXIF_OFFSET_TAG).unwrap().format.code(), 4);
}

#[test]
fn test_directory_limit() {
    // IFD0, the Exif sub-IFD and IFD1 sit at distinct offsets
    let buffer = wrap_app1(&create_exif_full_le());

    let config = ScanConfig {
        max_directories: 2,
        ..ScanConfig::default()
    };
    let scanner = JpegScanner::with_config(config);
    assert_eq!(scanner.config().max_directories, 2);
    assert!(matches!(scanner.scan(&buffer), Err(JpegError::MalformedDirectory(_))));

    let config = ScanConfig {
        max_directories: 3,
        ..ScanConfig::default()
    };
    let document = JpegScanner::with_config(config).scan(&buffer).unwrap();
    assert_eq!(document.exif().unwrap().directories.len(), 3);
}

#[test]
fn test_exif_in_other_app_marker() {
    let mut buffer = vec![0xFF, 0xD8];
    push_segment(&mut buffer, 0xE3, &create_exif_orientation_be());
    buffer.extend_from_slice(&[0xFF, 0xD9]);

    let document = JpegScanner::new().scan(&buffer).unwrap();
    assert_eq!(document.exif().unwrap().index, 3);
    assert_eq!(document.segments[0].name(), "APP3 (EXIF)");
}
