//! JFIF APP0 segments

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::jpeg::constants::identifiers;
use crate::jpeg::parsers::payload;
use crate::jpeg::segment::JfifSegment;

/// Reads the JFIF version, pixel density and optional RGB thumbnail
///
/// Returns None when the payload is shorter than the 14-byte JFIF header.
/// A thumbnail cut short by the segment end keeps the bytes that are there.
pub fn parse(segment: &[u8], length: u16, index: u8) -> Option<JfifSegment<'_>> {
    let payload = payload(segment);
    let mut reader = Cursor::new(payload);
    reader.set_position(identifiers::JFIF.len() as u64);

    let version_major = reader.read_u8().ok()?;
    let version_minor = reader.read_u8().ok()?;
    let density_units = reader.read_u8().ok()?;
    let x_density = reader.read_u16::<BigEndian>().ok()?;
    let y_density = reader.read_u16::<BigEndian>().ok()?;
    let thumbnail_width = reader.read_u8().ok()?;
    let thumbnail_height = reader.read_u8().ok()?;

    let start = reader.position() as usize;
    let thumbnail_len = 3 * thumbnail_width as usize * thumbnail_height as usize;
    let end = payload.len().min(start + thumbnail_len);

    Some(JfifSegment {
        index,
        length,
        version_major,
        version_minor,
        density_units,
        x_density,
        y_density,
        thumbnail_width,
        thumbnail_height,
        thumbnail: &payload[start..end],
    })
}
