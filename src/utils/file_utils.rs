//! File loading helpers

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::jpeg::errors::{JpegError, JpegResult};

/// Reads a whole file into memory
///
/// The scanner works on a borrowed buffer, so the bytes returned here must
/// outlive every segment parsed from them.
pub fn read_file(path: &str) -> JpegResult<Vec<u8>> {
    if !Path::new(path).is_file() {
        return Err(JpegError::GenericError(format!("Input file not found: {}", path)));
    }

    let buffer = fs::read(path)?;
    info!("Loaded {} ({} bytes)", path, buffer.len());
    debug!("First bytes: {}", super::format_utils::hex_preview(&buffer, 4));
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = read_file("/nonexistent/jpegscope/input.jpg");
        assert!(matches!(result, Err(JpegError::GenericError(_))));
    }

    #[test]
    fn test_read_back() {
        let path = std::env::temp_dir().join(format!("jpegscope_read_back_{}.jpg", std::process::id()));
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        let buffer = read_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(buffer, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }
}
