//! Core EXIF segment data structures

use std::fmt;

use crate::exif::catalog::DirectoryRole;
use crate::exif::constants::tags;
use crate::exif::ifd::{Directory, ExifField};
use crate::io::byte_order::ByteOrder;

/// TIFF header opening the EXIF payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    pub magic: u16,
    /// Offset of IFD0 from the start of this header
    pub first_ifd_offset: u32,
}

/// A parsed APP segment carrying EXIF data
#[derive(Debug, Clone, PartialEq)]
pub struct ExifSegment<'a> {
    /// n of the APPn marker, 1 in conforming files
    pub index: u8,
    /// Declared segment length
    pub length: u16,
    pub header: TiffHeader,
    /// Directories in walk order: IFD0, sub-IFDs, then IFD1
    pub directories: Vec<Directory<'a>>,
    /// TIFF data, from the byte order marker to the end of the segment
    pub tiff_data: &'a [u8],
}

impl<'a> ExifSegment<'a> {
    /// Returns the first directory with the given role
    pub fn directory(&self, role: DirectoryRole) -> Option<&Directory<'a>> {
        self.directories.iter().find(|d| d.role == role)
    }

    /// Finds a field by tag, searching directories in walk order
    pub fn field(&self, tag: u16) -> Option<&ExifField<'a>> {
        self.directories.iter().find_map(|d| d.field(tag))
    }

    /// Total number of entries across all directories
    pub fn field_count(&self) -> usize {
        self.directories.iter().map(|d| d.entry_count()).sum()
    }

    /// Returns the embedded JPEG thumbnail named by IFD1, if it lies in bounds
    pub fn thumbnail(&self) -> Option<&'a [u8]> {
        let ifd1 = self.directory(DirectoryRole::Thumbnail)?;
        let offset = ifd1.field(tags::JPEG_IF_OFFSET)?.value.as_u32()? as usize;
        let length = ifd1.field(tags::JPEG_IF_BYTE_COUNT)?.value.as_u32()? as usize;
        let end = offset.checked_add(length)?;
        self.tiff_data.get(offset..end)
    }
}

impl<'a> fmt::Display for ExifSegment<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EXIF ({}, length {})", self.header.byte_order.name(), self.length)?;
        for directory in &self.directories {
            write!(f, "{}", directory)?;
        }
        if let Some(thumbnail) = self.thumbnail() {
            writeln!(f, "  Thumbnail: {} bytes", thumbnail.len())?;
        }
        Ok(())
    }
}
