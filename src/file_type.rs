//! File classification by extension and human-readable size formatting.

/// How a file should be previewed, decided from its extension string.
/// Extensions outside the known sets still get a binary fetch; the preview
/// pane just has no renderer for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Rendered inline as text (`txt`, `loc`).
    Text,
    /// Decoded and shown in the preview pane (`png`, `jpg`, `jpeg`).
    Image,
    /// Content extracted for the preview pane (`pdf`).
    Pdf,
    /// Fetched but not rendered inline; download only.
    OtherBinary,
}

impl FileKind {
    /// Classify an extension string. Case-insensitive.
    pub fn classify(file_type: &str) -> Self {
        match file_type.to_lowercase().as_str() {
            "txt" | "loc" => FileKind::Text,
            "png" | "jpg" | "jpeg" => FileKind::Image,
            "pdf" => FileKind::Pdf,
            _ => FileKind::OtherBinary,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FileKind::Text)
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with the largest fitting unit and two decimals.
/// Zero is the special case "0 Bytes".
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_text() {
        assert_eq!(FileKind::classify("txt"), FileKind::Text);
        assert_eq!(FileKind::classify("loc"), FileKind::Text);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(FileKind::classify("TXT"), FileKind::classify("txt"));
        assert_eq!(FileKind::classify("Png"), FileKind::Image);
        assert_eq!(FileKind::classify("PDF"), FileKind::Pdf);
    }

    #[test]
    fn test_classify_binary() {
        assert_eq!(FileKind::classify("png"), FileKind::Image);
        assert_eq!(FileKind::classify("jpeg"), FileKind::Image);
        assert_eq!(FileKind::classify("pdf"), FileKind::Pdf);
        // No dedicated renderer, still a binary preview fetch
        assert_eq!(FileKind::classify("docx"), FileKind::OtherBinary);
        assert_eq!(FileKind::classify(""), FileKind::OtherBinary);
    }

    #[test]
    fn test_format_size_zero() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_format_size_sub_kilobyte() {
        assert_eq!(format_size(1), "1.00 Bytes");
        assert_eq!(format_size(512), "512.00 Bytes");
        assert_eq!(format_size(1023), "1023.00 Bytes");
    }

    #[test]
    fn test_format_size_clamps_to_largest_unit() {
        // 5 TB still renders in GB, the largest unit in the list
        assert_eq!(format_size(5 * 1024u64.pow(4)), "5120.00 GB");
    }
}
