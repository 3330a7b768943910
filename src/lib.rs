pub mod commands;
pub mod config;
pub mod exif;
pub mod io;
pub mod jpeg;
pub mod utils;

pub use config::ScanConfig;
pub use exif::{catalog, decode, DataFormat, DirectoryRole, ExifSegment, TagCatalog, Value};
pub use jpeg::{Document, JpegError, JpegResult, JpegScanner, Segment};
