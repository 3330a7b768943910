//! SOFn segments

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::jpeg::marker::FrameKind;
use crate::jpeg::parsers::payload;
use crate::jpeg::segment::{FrameComponent, FrameHeaderSegment};

/// Reads precision, dimensions and per-component sampling records
///
/// Returns None when the payload cannot hold the 6-byte fixed header.
/// Component records that do not fit are left in `trailing`.
pub fn parse(segment: &[u8], length: u16, kind: FrameKind) -> Option<FrameHeaderSegment<'_>> {
    let payload = payload(segment);
    let mut reader = Cursor::new(payload);

    let precision = reader.read_u8().ok()?;
    let height = reader.read_u16::<BigEndian>().ok()?;
    let width = reader.read_u16::<BigEndian>().ok()?;
    let component_count = reader.read_u8().ok()?;

    let mut components = Vec::with_capacity(component_count as usize);
    for _ in 0..component_count {
        let start = reader.position();
        match read_component(&mut reader) {
            Some(component) => components.push(component),
            None => {
                reader.set_position(start);
                break;
            }
        }
    }

    let consumed = reader.position() as usize;
    Some(FrameHeaderSegment {
        kind,
        length,
        precision,
        height,
        width,
        components,
        trailing: &payload[consumed..],
    })
}

fn read_component(reader: &mut Cursor<&[u8]>) -> Option<FrameComponent> {
    let id = reader.read_u8().ok()?;
    let sampling = reader.read_u8().ok()?;
    let quantization_table = reader.read_u8().ok()?;
    Some(FrameComponent {
        id,
        horizontal_sampling: sampling >> 4,
        vertical_sampling: sampling & 0x0F,
        quantization_table,
    })
}
