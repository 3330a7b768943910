//! DQT segments
//!
//! A DQT payload holds one or more tables, each a precision/id byte
//! followed by 64 entries of 1 or 2 bytes.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::{QuantizationTable, QuantizationTableSegment};

/// Number of entries in a quantization table
const TABLE_ENTRIES: usize = 64;

/// Reads every complete table; an incomplete tail is kept in `trailing`
pub fn parse(segment: &[u8], length: u16) -> QuantizationTableSegment<'_> {
    let payload = payload(segment);
    let mut tables = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        match read_table(&payload[pos..]) {
            Some((table, used)) => {
                tables.push(table);
                pos += used;
            }
            None => break,
        }
    }

    QuantizationTableSegment {
        length,
        tables,
        trailing: &payload[pos..],
    }
}

/// Reads one table, returning it with the number of bytes consumed
fn read_table(bytes: &[u8]) -> Option<(QuantizationTable, usize)> {
    let mut reader = Cursor::new(bytes);
    let pq_tq = reader.read_u8().ok()?;
    let precision = pq_tq >> 4;
    let id = pq_tq & 0x0F;

    let mut values = Vec::with_capacity(TABLE_ENTRIES);
    for _ in 0..TABLE_ENTRIES {
        let value = if precision == 0 {
            reader.read_u8().ok()? as u16
        } else {
            reader.read_u16::<BigEndian>().ok()?
        };
        values.push(value);
    }

    Some((QuantizationTable { precision, id, values }, reader.position() as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tables() {
        let mut segment = vec![0xFF, 0xDB, 0x00, 0x84];
        segment.push(0x00);
        segment.extend(std::iter::repeat(1u8).take(64));
        segment.push(0x01);
        segment.extend(std::iter::repeat(2u8).take(64));

        let parsed = parse(&segment, 0x84);
        assert_eq!(parsed.tables.len(), 2);
        assert_eq!(parsed.tables[1].id, 1);
        assert_eq!(parsed.tables[1].values[63], 2);
        assert!(parsed.trailing.is_empty());
    }

    #[test]
    fn test_sixteen_bit_table() {
        let mut segment = vec![0xFF, 0xDB, 0x00, 0x83, 0x10];
        for _ in 0..64 {
            segment.extend_from_slice(&[0x01, 0x00]);
        }
        let parsed = parse(&segment, 0x83);
        assert_eq!(parsed.tables[0].precision, 1);
        assert_eq!(parsed.tables[0].values[0], 256);
    }

    #[test]
    fn test_incomplete_table_is_trailing() {
        let segment = [0xFF, 0xDB, 0x00, 0x05, 0x00, 0x01, 0x02];
        let parsed = parse(&segment, 5);
        assert!(parsed.tables.is_empty());
        assert_eq!(parsed.trailing, &[0x00, 0x01, 0x02]);
    }
}
