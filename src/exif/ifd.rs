//! EXIF Image File Directory (IFD) structures
//!
//! A directory is a list of tagged entries. Each entry carries its decoded
//! value together with the raw bytes it was decoded from and, when the tag
//! is known for the directory's role, the catalog record naming it.

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::exif::catalog::{DirectoryRole, TagRecord};
use crate::exif::value::{self, DataFormat, Value};
use crate::io::byte_order::ByteOrder;

/// A decoded directory entry
#[derive(Debug, Clone, PartialEq)]
pub struct ExifField<'a> {
    /// Tag identifier
    pub tag: u16,
    /// Data format of the value
    pub format: DataFormat,
    /// Number of components
    pub count: u32,
    /// Byte order the value was decoded with
    pub byte_order: ByteOrder,
    /// Exact value bytes (count × element size)
    pub raw: &'a [u8],
    /// First component, decoded
    pub value: Value,
    /// Catalog record for this tag, if known
    pub record: Option<TagRecord>,
}

impl<'a> ExifField<'a> {
    /// Returns the catalog name of this tag, or "Unknown"
    pub fn name(&self) -> &str {
        self.record.as_ref().map(|r| r.name.as_str()).unwrap_or("Unknown")
    }

    /// Decodes every component of this field
    pub fn values(&self) -> Vec<Value> {
        value::decode_all(self.raw, self.format, self.byte_order)
    }

    /// Whether the value sat inline in the entry's 4-byte value field
    pub fn is_inline(&self) -> bool {
        self.raw.len() <= crate::exif::constants::layout::INLINE_VALUE_SIZE
    }
}

impl<'a> fmt::Display for ExifField<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x} ({}): ", self.tag, self.name())?;
        if self.count > 1 && !matches!(self.value, Value::Bytes(_) | Value::Text(_)) {
            let values: Vec<String> = self.values().iter().map(|v| v.to_string()).collect();
            write!(f, "[{}]", values.join(", "))?;
        } else {
            write!(f, "{}", self.value)?;
        }
        write!(f, " [{}, count {}]", self.format.name(), self.count)
    }
}

/// One tag directory of an EXIF segment
#[derive(Debug, Clone, PartialEq)]
pub struct Directory<'a> {
    /// Which directory this is
    pub role: DirectoryRole,
    /// Offset of the directory from the start of the TIFF header
    pub offset: u32,
    /// Entries in file order
    pub fields: Vec<ExifField<'a>>,
    /// Link to the next directory in the chain, 0 if none
    pub next_ifd_offset: u32,
    /// Index into `fields` by tag
    tag_map: HashMap<u16, usize>,
}

impl<'a> Directory<'a> {
    /// Creates an empty directory
    pub fn new(role: DirectoryRole, offset: u32) -> Self {
        Self {
            role,
            offset,
            fields: Vec::new(),
            next_ifd_offset: 0,
            tag_map: HashMap::new(),
        }
    }

    /// Adds a field, keeping the first occurrence of a tag for lookups
    pub fn add_field(&mut self, field: ExifField<'a>) {
        trace!("Adding field to {}: {}", self.role, field);

        self.tag_map.entry(field.tag).or_insert(self.fields.len());
        self.fields.push(field);
    }

    /// Gets a field by tag
    pub fn field(&self, tag: u16) -> Option<&ExifField<'a>> {
        self.tag_map.get(&tag).map(|&index| &self.fields[index])
    }

    /// Checks if this directory has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets the number of entries in this directory
    pub fn entry_count(&self) -> usize {
        self.fields.len()
    }
}

impl<'a> fmt::Display for Directory<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (offset: {})", self.role, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.fields.len())?;
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        Ok(())
    }
}
