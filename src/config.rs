//! Scanner configuration
//!
//! Settings that change how strictly a buffer is checked and how far the
//! EXIF directory walk goes. Built with defaults or from CLI arguments.

use clap::ArgMatches;

/// Options controlling a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Reject buffers not opened by SOI and closed by EOI
    pub strict_markers: bool,
    /// Walk IFD1 (the thumbnail directory) when IFD0 links to it
    pub follow_thumbnail: bool,
    /// Upper bound on directories read from one EXIF segment
    pub max_directories: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            strict_markers: true,
            follow_thumbnail: true,
            max_directories: 8,
        }
    }
}

impl ScanConfig {
    /// Builds a configuration from parsed CLI arguments
    ///
    /// Flags that are not defined on the command are ignored.
    pub fn from_args(args: &ArgMatches) -> Self {
        let flag = |name: &str| {
            args.try_get_one::<bool>(name)
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false)
        };

        ScanConfig {
            strict_markers: !flag("lenient"),
            follow_thumbnail: !flag("no-thumbnail"),
            ..ScanConfig::default()
        }
    }
}
