//! EXIF tag catalog
//!
//! Names and descriptions for known tag ids, one table per directory role.
//! The default catalog is embedded from `exif_tags.toml` and parsed once on
//! first use; an alternative catalog can be loaded from a file.

use std::collections::HashMap;
use std::fmt;
use std::fs;

use lazy_static::lazy_static;
use log::debug;

use crate::jpeg::errors::{JpegError, JpegResult};

lazy_static! {
    // Parse the embedded TOML on first use
    static ref DEFAULT_CATALOG: TagCatalog = {
        let content = include_str!("../../exif_tags.toml");
        TagCatalog::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse EXIF tag catalog: {}", e);
            TagCatalog::default()
        })
    };
}

/// Role of a tag directory within an EXIF segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryRole {
    /// IFD0, the main image
    Primary,
    /// IFD1, the thumbnail image
    Thumbnail,
    /// The Exif sub-IFD
    Extended,
}

impl DirectoryRole {
    /// Name of the TOML table holding this role's tags
    pub fn table_name(&self) -> &'static str {
        match self {
            DirectoryRole::Primary => "primary",
            DirectoryRole::Thumbnail => "thumbnail",
            DirectoryRole::Extended => "extended",
        }
    }
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryRole::Primary => write!(f, "IFD0 (main image)"),
            DirectoryRole::Thumbnail => write!(f, "IFD1 (thumbnail)"),
            DirectoryRole::Extended => write!(f, "Exif SubIFD"),
        }
    }
}

/// Descriptive record for a known tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub description: String,
}

/// Tag tables for the three directory roles
#[derive(Debug, Default)]
pub struct TagCatalog {
    primary: HashMap<u16, TagRecord>,
    thumbnail: HashMap<u16, TagRecord>,
    extended: HashMap<u16, TagRecord>,
}

impl TagCatalog {
    /// Returns the embedded, process-wide catalog
    pub fn global() -> &'static TagCatalog {
        &DEFAULT_CATALOG
    }

    /// Parse a catalog from a TOML string
    pub fn from_str(content: &str) -> JpegResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(JpegError::CatalogError(format!("Failed to parse TOML: {}", e))),
        };

        let mut catalog = TagCatalog::default();
        for role in [DirectoryRole::Primary, DirectoryRole::Thumbnail, DirectoryRole::Extended] {
            let target = catalog.table_mut(role);
            Self::parse_tag_table(&toml_value, role.table_name(), target)?;
        }

        debug!(
            "Loaded tag catalog: {} primary, {} thumbnail, {} extended tags",
            catalog.primary.len(),
            catalog.thumbnail.len(),
            catalog.extended.len()
        );

        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &str) -> JpegResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(JpegError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    /// Looks up a tag's record for a directory role
    ///
    /// Unknown tags yield None.
    pub fn lookup(&self, role: DirectoryRole, tag: u16) -> Option<&TagRecord> {
        self.table(role).get(&tag)
    }

    /// Number of tags known for a role
    pub fn len(&self, role: DirectoryRole) -> usize {
        self.table(role).len()
    }

    fn table(&self, role: DirectoryRole) -> &HashMap<u16, TagRecord> {
        match role {
            DirectoryRole::Primary => &self.primary,
            DirectoryRole::Thumbnail => &self.thumbnail,
            DirectoryRole::Extended => &self.extended,
        }
    }

    fn table_mut(&mut self, role: DirectoryRole) -> &mut HashMap<u16, TagRecord> {
        match role {
            DirectoryRole::Primary => &mut self.primary,
            DirectoryRole::Thumbnail => &mut self.thumbnail,
            DirectoryRole::Extended => &mut self.extended,
        }
    }

    /// Helper to parse one role's table; a missing table is left empty
    fn parse_tag_table(
        toml_value: &toml::Value,
        table_name: &str,
        target: &mut HashMap<u16, TagRecord>,
    ) -> JpegResult<()> {
        let table = match toml_value.get(table_name).and_then(|v| v.as_table()) {
            Some(table) => table,
            None => return Ok(()),
        };

        for (key, entry) in table {
            let id = parse_tag_id(key).ok_or_else(|| {
                JpegError::CatalogError(format!("Invalid tag id '{}' in [{}]", key, table_name))
            })?;
            let name = entry.get("name").and_then(|v| v.as_str()).ok_or_else(|| {
                JpegError::CatalogError(format!("Tag {} in [{}] has no name", key, table_name))
            })?;
            let description = entry.get("description").and_then(|v| v.as_str()).unwrap_or("");

            target.insert(
                id,
                TagRecord {
                    name: name.to_string(),
                    description: description.to_string(),
                },
            );
        }

        Ok(())
    }
}

/// Looks up a tag in the embedded catalog
pub fn catalog(role: DirectoryRole, tag: u16) -> Option<&'static TagRecord> {
    TagCatalog::global().lookup(role, tag)
}

/// Parses "0x0112" style keys, also accepting plain decimal
fn parse_tag_id(key: &str) -> Option<u16> {
    match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => key.parse::<u16>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_orientation() {
        let record = catalog(DirectoryRole::Primary, 0x0112).unwrap();
        assert_eq!(record.name, "Orientation");
    }

    #[test]
    fn test_roles_are_separate() {
        assert!(catalog(DirectoryRole::Thumbnail, 0x0201).is_some());
        assert!(catalog(DirectoryRole::Primary, 0x0201).is_none());
        assert_eq!(catalog(DirectoryRole::Extended, 0x829a).unwrap().name, "ExposureTime");
    }

    #[test]
    fn test_unknown_tag() {
        assert!(catalog(DirectoryRole::Primary, 0xBEEF).is_none());
    }

    #[test]
    fn test_custom_catalog() {
        let content = r#"
            [primary]
            "0x0112" = { name = "Rotation" }
            "271" = { name = "Make", description = "decimal key" }
        "#;
        let catalog = TagCatalog::from_str(content).unwrap();
        assert_eq!(catalog.len(DirectoryRole::Primary), 2);
        assert_eq!(catalog.lookup(DirectoryRole::Primary, 0x0112).unwrap().description, "");
        assert_eq!(catalog.lookup(DirectoryRole::Primary, 0x010f).unwrap().name, "Make");
        assert_eq!(catalog.len(DirectoryRole::Extended), 0);
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(TagCatalog::from_str("[primary]\n\"zz\" = { name = \"x\" }").is_err());
        assert!(TagCatalog::from_str("not = [valid").is_err());
    }
}
