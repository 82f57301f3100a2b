//! File-name helpers: display names, folder categories, size labels.
//!
//! Uploaded images carry the product name in their file name:
//! ```text
//! Red Sneaker.png        → "Red Sneaker"
//! archive.tar.gz         → "archive.tar"
//! summer/flip-flops.jpg  → category "summer"
//! ```

use std::path::Path;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Strip the trailing extension from a file name.
///
/// Everything from the final `.` onward is removed, so a trailing dot
/// (`"shoe."`) goes too. Names without a `.` come back unchanged.
///
/// # Examples
///
/// ```
/// use instashop_catalog::name_parser::display_name;
///
/// assert_eq!(display_name("shoe.png"), "shoe");
/// assert_eq!(display_name("archive.tar.gz"), "archive.tar");
/// assert_eq!(display_name("noext"), "noext");
/// ```
pub fn display_name(name: &str) -> String {
    name.rfind('.').map_or(name, |pos| &name[..pos]).to_string()
}

/// Folder name a file sits in, relative to the scanned root.
///
/// Returns `None` for files at the root itself.
///
/// ```
/// use std::path::Path;
/// use instashop_catalog::name_parser::category_from_path;
///
/// assert_eq!(category_from_path(Path::new("summer/sandal.png")), Some("summer".to_string()));
/// assert_eq!(category_from_path(Path::new("sandal.png")), None);
/// ```
pub fn category_from_path(relative_path: &Path) -> Option<String> {
    relative_path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Format a byte count as megabytes with two decimals (e.g., "1.50 MB").
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_last_extension() {
        assert_eq!(display_name("shoe.png"), "shoe");
        assert_eq!(display_name("archive.tar.gz"), "archive.tar");
        assert_eq!(display_name("Red Sneaker.JPEG"), "Red Sneaker");
    }

    #[test]
    fn names_without_extension_are_unchanged() {
        assert_eq!(display_name("noext"), "noext");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn trailing_dot_is_stripped() {
        assert_eq!(display_name("shoe."), "shoe");
        assert_eq!(display_name("x.y.z."), "x.y.z");
    }

    #[test]
    fn dotfile_reduces_to_empty() {
        assert_eq!(display_name(".png"), "");
    }

    #[test]
    fn nested_category_uses_nearest_folder() {
        assert_eq!(
            category_from_path(Path::new("shop/summer/sandal.png")),
            Some("summer".to_string())
        );
    }

    #[test]
    fn size_label() {
        assert_eq!(format_size_mb(1_048_576), "1.00 MB");
        assert_eq!(format_size_mb(0), "0.00 MB");
        assert_eq!(format_size_mb(1_572_864), "1.50 MB");
    }
}
