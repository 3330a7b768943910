//! EXIF / TIFF constants

/// TIFF header constants
pub mod header {
    /// Magic number following the byte order marker
    pub const TIFF_MAGIC: u16 = 42;

    /// Byte order marker + magic + first IFD offset
    pub const TIFF_HEADER_SIZE: usize = 8;
}

/// IFD layout constants
pub mod layout {
    /// Size of the entry count preceding the entries
    pub const ENTRY_COUNT_SIZE: usize = 2;

    /// Size of one directory entry
    pub const ENTRY_SIZE: usize = 12;

    /// Size of the value-or-offset field of an entry
    pub const INLINE_VALUE_SIZE: usize = 4;

    /// Size of the link to the next directory
    pub const NEXT_IFD_SIZE: usize = 4;
}

/// Tags with structural meaning for the directory walk
pub mod tags {
    pub const ORIENTATION: u16 = 0x0112;           // Image orientation
    pub const JPEG_IF_OFFSET: u16 = 0x0201;        // Thumbnail JPEG offset
    pub const JPEG_IF_BYTE_COUNT: u16 = 0x0202;    // Thumbnail JPEG size
    pub const EXIF_OFFSET: u16 = 0x8769;           // Offset to the Exif sub-IFD
}
