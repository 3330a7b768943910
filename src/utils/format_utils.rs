//! Formatting helpers for CLI reports

/// Formats up to `max` bytes as space-separated hex, noting any remainder
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    let shown: Vec<String> = bytes.iter().take(max).map(|b| format!("{:02X}", b)).collect();
    let mut preview = shown.join(" ");
    if bytes.len() > max {
        preview.push_str(&format!(" ... (+{} bytes)", bytes.len() - max));
    }
    preview
}

/// Human-readable density unit of a JFIF header
pub fn density_unit_name(units: u8) -> &'static str {
    match units {
        0 => "aspect ratio",
        1 => "dots per inch",
        2 => "dots per cm",
        _ => "unknown",
    }
}
