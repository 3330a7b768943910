//! SOS segments

use std::io::Cursor;

use byteorder::ReadBytesExt;

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::{ScanComponent, ScanHeaderSegment};

/// Reads component selectors and spectral selection/approximation
///
/// Returns None when the payload is shorter than its component count says.
pub fn parse(segment: &[u8], length: u16) -> Option<ScanHeaderSegment<'_>> {
    let payload = payload(segment);
    let mut reader = Cursor::new(payload);

    let component_count = reader.read_u8().ok()?;
    let mut components = Vec::with_capacity(component_count as usize);
    for _ in 0..component_count {
        let selector = reader.read_u8().ok()?;
        let tables = reader.read_u8().ok()?;
        components.push(ScanComponent {
            selector,
            dc_table: tables >> 4,
            ac_table: tables & 0x0F,
        });
    }

    let spectral_start = reader.read_u8().ok()?;
    let spectral_end = reader.read_u8().ok()?;
    let approximation = reader.read_u8().ok()?;

    let consumed = reader.position() as usize;
    Some(ScanHeaderSegment {
        length,
        components,
        spectral_start,
        spectral_end,
        approx_high: approximation >> 4,
        approx_low: approximation & 0x0F,
        trailing: &payload[consumed..],
    })
}
