//! EXIF metadata parsing module
//!
//! This module decodes the TIFF-style tag directories carried in EXIF
//! APP segments: header, directory walk, value decoding and tag names.

pub mod catalog;
pub(crate) mod constants;
pub mod ifd;
pub mod reader;
pub mod types;
pub mod value;

pub use catalog::{catalog, DirectoryRole, TagCatalog, TagRecord};
pub use ifd::{Directory, ExifField};
pub use reader::ExifReader;
pub use types::{ExifSegment, TiffHeader};
pub use value::{decode, DataFormat, SignedRational, UnsignedRational, Value};

/// Tag id of the Exif sub-IFD pointer
pub const EXIF_OFFSET_TAG: u16 = constants::tags::EXIF_OFFSET;

/// Tag id of the image orientation
pub const ORIENTATION_TAG: u16 = constants::tags::ORIENTATION;
