//! DHT segments
//!
//! Each table is a class/id byte, 16 code-length counts, then as many
//! symbol bytes as the counts add up to.

use std::io::{Cursor, Read};

use byteorder::ReadBytesExt;

use crate::jpeg::parsers::payload;
use crate::jpeg::segment::{HuffmanTable, HuffmanTableSegment, TableClass};

/// Reads every complete table; an incomplete tail is kept in `trailing`
pub fn parse(segment: &[u8], length: u16) -> HuffmanTableSegment<'_> {
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

    HuffmanTableSegment {
        length,
        tables,
        trailing: &payload[pos..],
    }
}

fn read_table(bytes: &[u8]) -> Option<(HuffmanTable, usize)> {
    let mut reader = Cursor::new(bytes);
    let tc_th = reader.read_u8().ok()?;
    let class = if tc_th >> 4 == 0 { TableClass::Dc } else { TableClass::Ac };

    let mut code_lengths = [0u8; 16];
    reader.read_exact(&mut code_lengths).ok()?;

    let symbol_count: usize = code_lengths.iter().map(|&n| n as usize).sum();
    let mut symbols = vec![0u8; symbol_count];
    reader.read_exact(&mut symbols).ok()?;

    let table = HuffmanTable {
        class,
        id: tc_th & 0x0F,
        code_lengths,
        symbols,
    };
    Some((table, reader.position() as usize))
}
