//! JPEG format constants
//!
//! Marker codes and APP identifier strings, named instead of
//! scattered as magic numbers through the scanner and sub-parsers.

/// Marker codes (the byte following 0xFF)
pub mod markers {
    pub const PREFIX: u8 = 0xFF;    // First byte of every marker

    pub const SOF0: u8 = 0xC0;      // Baseline DCT
    pub const SOF1: u8 = 0xC1;      // Extended sequential DCT
    pub const SOF2: u8 = 0xC2;      // Progressive DCT
    pub const SOF3: u8 = 0xC3;      // Lossless (sequential)
    pub const DHT: u8 = 0xC4;       // Define Huffman table(s)
    pub const SOF5: u8 = 0xC5;      // Differential sequential DCT
    pub const SOF6: u8 = 0xC6;      // Differential progressive DCT

    pub const SOI: u8 = 0xD8;       // Start of image
    pub const EOI: u8 = 0xD9;       // End of image
    pub const SOS: u8 = 0xDA;       // Start of scan
    pub const DQT: u8 = 0xDB;       // Define quantization table(s)

    pub const APP0: u8 = 0xE0;      // First application segment
    pub const APP15: u8 = 0xEF;     // Last application segment

    pub const COM: u8 = 0xFE;       // Comment
}

/// Start-of-image marker as it appears at the head of the file
pub const SOI_MARKER: [u8; 2] = [markers::PREFIX, markers::SOI];

/// End-of-image marker as it appears at the tail of the file
pub const EOI_MARKER: [u8; 2] = [markers::PREFIX, markers::EOI];

/// APP payload identifiers
pub mod identifiers {
    /// EXIF identifier code "Exif\0\0"
    pub const EXIF: &[u8] = b"Exif\0\0";

    /// JFIF identifier "JFIF\0"
    pub const JFIF: &[u8] = b"JFIF\0";

    /// ICC profile identifier, compared over the full 11 identifier bytes
    pub const ICC_PROFILE: &[u8] = b"ICC_PROFILE";

    /// Start of the identifier window within a segment (after marker and length)
    pub const WINDOW_START: usize = 4;

    /// End (exclusive) of the identifier window within a segment
    pub const WINDOW_END: usize = 15;
}

/// Size of the marker plus the length field that opens each segment
pub const SEGMENT_HEADER_SIZE: usize = 4;
