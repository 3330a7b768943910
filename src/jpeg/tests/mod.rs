mod exif_tests;
mod scanner_tests;
