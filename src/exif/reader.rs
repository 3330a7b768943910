//! EXIF segment reader
//!
//! Parses the TIFF header that follows the "Exif\0\0" identifier and walks
//! the tag directories it links to, decoding every entry with the byte
//! order the header selects.

use std::collections::HashSet;
use std::io::{Cursor, Seek, SeekFrom};

use log::{debug, info, warn};

use crate::config::ScanConfig;
use crate::exif::catalog::{DirectoryRole, TagCatalog};
use crate::exif::constants::{header, layout, tags};
use crate::exif::ifd::{Directory, ExifField};
use crate::exif::types::{ExifSegment, TiffHeader};
use crate::exif::value::{self, DataFormat};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::jpeg::constants::{identifiers, SEGMENT_HEADER_SIZE};
use crate::jpeg::errors::{JpegError, JpegResult};

/// Offset of the TIFF header within an EXIF APP segment
const TIFF_START: usize = SEGMENT_HEADER_SIZE + 6;

/// State shared by every directory read within one segment
struct WalkContext<'a> {
    tiff: &'a [u8],
    order: ByteOrder,
    handler: Box<dyn ByteOrderHandler>,
    visited: HashSet<u32>,
    directories: Vec<Directory<'a>>,
}

/// Reader for EXIF APP segments
pub struct ExifReader<'c> {
    catalog: &'c TagCatalog,
    follow_thumbnail: bool,
    max_directories: usize,
}

impl<'c> ExifReader<'c> {
    /// Creates a reader that names tags from `catalog`
    pub fn new(catalog: &'c TagCatalog, config: &ScanConfig) -> Self {
        ExifReader {
            catalog,
            follow_thumbnail: config.follow_thumbnail,
            max_directories: config.max_directories,
        }
    }

    /// Parses a complete EXIF segment (marker and length included)
    ///
    /// # Arguments
    /// * `segment` - The segment bytes, starting at the 0xFF marker byte
    /// * `length` - The segment's declared length field
    /// * `index` - n of the APPn marker carrying the segment
    ///
    /// # Returns
    /// The TIFF header and every directory reachable from IFD0
    pub fn read<'a>(&self, segment: &'a [u8], length: u16, index: u8) -> JpegResult<ExifSegment<'a>> {
        if segment.len() < TIFF_START || &segment[SEGMENT_HEADER_SIZE..TIFF_START] != identifiers::EXIF {
            return Err(JpegError::MalformedDirectory("missing Exif identifier".to_string()));
        }
        let tiff = &segment[TIFF_START..];

        let tiff_header = read_tiff_header(tiff)?;
        debug!("EXIF byte order: {}", tiff_header.byte_order.name());

        let mut ctx = WalkContext {
            tiff,
            order: tiff_header.byte_order,
            handler: tiff_header.byte_order.create_handler(),
            visited: HashSet::new(),
            directories: Vec::new(),
        };

        self.walk(&mut ctx, tiff_header.first_ifd_offset, DirectoryRole::Primary)?;

        let next = ctx.directories.first().map(|d| d.next_ifd_offset).unwrap_or(0);
        if self.follow_thumbnail && next != 0 {
            self.walk(&mut ctx, next, DirectoryRole::Thumbnail)?;
        }

        info!("Read {} EXIF directories", ctx.directories.len());
        Ok(ExifSegment {
            index,
            length,
            header: tiff_header,
            directories: ctx.directories,
            tiff_data: tiff,
        })
    }

    /// Reads a directory, then any Exif sub-IFD it points to
    fn walk<'a>(&self, ctx: &mut WalkContext<'a>, offset: u32, role: DirectoryRole) -> JpegResult<()> {
        if ctx.directories.len() >= self.max_directories {
            return Err(JpegError::MalformedDirectory(format!(
                "more than {} directories",
                self.max_directories
            )));
        }
        if !ctx.visited.insert(offset) {
            return Err(JpegError::MalformedDirectory(format!(
                "directory at offset {} is linked twice",
                offset
            )));
        }

        let directory = self.read_directory(ctx, offset, role)?;
        let sub_offsets: Vec<u32> = directory
            .fields
            .iter()
            .filter(|f| f.tag == tags::EXIF_OFFSET)
            .filter_map(|f| f.value.as_u32())
            .collect();
        ctx.directories.push(directory);

        for sub_offset in sub_offsets {
            debug!("Following Exif sub-IFD at offset {}", sub_offset);
            self.walk(ctx, sub_offset, DirectoryRole::Extended)?;
        }

        Ok(())
    }

    /// Reads one directory at `offset` (relative to the TIFF header)
    fn read_directory<'a>(
        &self,
        ctx: &WalkContext<'a>,
        offset: u32,
        role: DirectoryRole,
    ) -> JpegResult<Directory<'a>> {
        let tiff = ctx.tiff;
        let start = offset as usize;
        if start + layout::ENTRY_COUNT_SIZE > tiff.len() {
            return Err(JpegError::MalformedDirectory(format!(
                "{} offset {} outside {} bytes of TIFF data",
                role,
                offset,
                tiff.len()
            )));
        }

        let mut reader = Cursor::new(tiff);
        reader.seek(SeekFrom::Start(start as u64))?;
        let entry_count = ctx.handler.read_u16(&mut reader)? as usize;
        debug!("{} at offset {}: {} entries", role, offset, entry_count);

        let entries_start = start + layout::ENTRY_COUNT_SIZE;
        let entries_end = entries_start + entry_count * layout::ENTRY_SIZE;
        if entries_end > tiff.len() {
            return Err(JpegError::MalformedDirectory(format!(
                "{} entries at offset {} overrun {} bytes of TIFF data",
                entry_count,
                offset,
                tiff.len()
            )));
        }

        let mut directory = Directory::new(role, offset);
        for index in 0..entry_count {
            let entry_start = entries_start + index * layout::ENTRY_SIZE;
            let field = self.read_entry(ctx, &mut reader, entry_start, role)?;
            directory.add_field(field);
        }

        if entries_end + layout::NEXT_IFD_SIZE <= tiff.len() {
            reader.seek(SeekFrom::Start(entries_end as u64))?;
            directory.next_ifd_offset = ctx.handler.read_u32(&mut reader)?;
        } else {
            warn!("{} has no next-directory link", role);
        }

        Ok(directory)
    }

    /// Reads and decodes the 12-byte entry at `entry_start`
    fn read_entry<'a>(
        &self,
        ctx: &WalkContext<'a>,
        reader: &mut Cursor<&'a [u8]>,
        entry_start: usize,
        role: DirectoryRole,
    ) -> JpegResult<ExifField<'a>> {
        let tiff = ctx.tiff;
        reader.seek(SeekFrom::Start(entry_start as u64))?;

        let tag = ctx.handler.read_u16(reader)?;
        let format = DataFormat::from_code(ctx.handler.read_u16(reader)?);
        let count = ctx.handler.read_u32(reader)?;

        let total = (count as usize).checked_mul(format.element_size()).ok_or_else(|| {
            JpegError::MalformedDirectory(format!("tag 0x{:04x} count {} overflows", tag, count))
        })?;

        let value_field = entry_start + 8;
        let raw = if total <= layout::INLINE_VALUE_SIZE {
            &tiff[value_field..value_field + total]
        } else {
            let value_offset = ctx.handler.read_u32(reader)? as usize;
            let end = value_offset
                .checked_add(total)
                .filter(|&end| end <= tiff.len())
                .ok_or_else(|| {
                    JpegError::MalformedDirectory(format!(
                        "tag 0x{:04x} value ({} bytes at offset {}) outside {} bytes of TIFF data",
                        tag,
                        total,
                        value_offset,
                        tiff.len()
                    ))
                })?;
            &tiff[value_offset..end]
        };

        let value = value::decode(raw, format, ctx.order);
        let record = self.catalog.lookup(role, tag).cloned();

        debug!(
            "Entry tag=0x{:04x} ({}), format={}, count={}, value={}",
            tag,
            record.as_ref().map(|r| r.name.as_str()).unwrap_or("Unknown"),
            format.name(),
            count,
            value
        );

        Ok(ExifField {
            tag,
            format,
            count,
            byte_order: ctx.order,
            raw,
            value,
            record,
        })
    }
}

/// Reads and validates the 8-byte TIFF header
pub fn read_tiff_header(tiff: &[u8]) -> JpegResult<TiffHeader> {
    if tiff.len() < header::TIFF_HEADER_SIZE {
        return Err(JpegError::MalformedDirectory(format!(
            "TIFF header needs {} bytes, found {}",
            header::TIFF_HEADER_SIZE,
            tiff.len()
        )));
    }

    let marker = u16::from_be_bytes([tiff[0], tiff[1]]);
    let byte_order = ByteOrder::detect(marker)?;
    let handler = byte_order.create_handler();

    let mut reader = Cursor::new(tiff);
    reader.seek(SeekFrom::Start(2))?;
    let magic = handler.read_u16(&mut reader)?;
    if magic != header::TIFF_MAGIC {
        return Err(JpegError::MalformedDirectory(format!("bad TIFF magic {}", magic)));
    }

    let first_ifd_offset = handler.read_u32(&mut reader)?;
    if first_ifd_offset as usize >= tiff.len() {
        return Err(JpegError::MalformedDirectory(format!(
            "IFD0 offset {} outside {} bytes of TIFF data",
            first_ifd_offset,
            tiff.len()
        )));
    }

    Ok(TiffHeader {
        byte_order,
        magic,
        first_ifd_offset,
    })
}
