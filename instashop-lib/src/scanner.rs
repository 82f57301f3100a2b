//! Directory scanner for product photo folders.
//!
//! Produces [`UploadedFile`] values the same way a browser folder upload
//! would: one entry per file, with a MIME type, size, modification time and
//! the containing folder name as the product category. Image filtering is
//! left to the catalog normalizer.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use instashop_catalog::{UploadedFile, category_from_path};

use crate::error::LibError;

/// MIME type reported for extensions not in [`MIME_TYPES`].
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Extension to MIME type table. Lookups are case-insensitive.
const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("ico", "image/x-icon"),
    ("csv", "text/csv"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("html", "text/html"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
];

/// Guess a MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MIME;
    };
    MIME_TYPES
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

/// Recursively scan `root` and return every visible file, sorted by path.
///
/// Hidden files and folders (leading `.`) are skipped, and symlinked folders
/// are not descended into. Each file's category
/// is the folder it sits in, so files directly under `root` take the root
/// folder's own name.
pub fn scan_uploads(root: &Path) -> Result<Vec<UploadedFile>, LibError> {
    if !root.is_dir() {
        return Err(LibError::NotADirectory(root.display().to_string()));
    }
    let root = std::fs::canonicalize(root).map_err(|e| LibError::io(root, e))?;
    let base = root.parent().unwrap_or(&root).to_path_buf();

    let mut files = Vec::new();
    collect_files(&base, &root, &mut files)?;
    log::debug!("scan: {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Build uploads for an explicit list of files, keeping the given order.
pub fn uploads_from_paths(paths: &[PathBuf]) -> Result<Vec<UploadedFile>, LibError> {
    paths
        .iter()
        .map(|path| {
            if !path.is_file() {
                return Err(LibError::NotAFile(path.display().to_string()));
            }
            let category = std::fs::canonicalize(path)
                .ok()
                .and_then(|p| category_from_path(&p));
            upload_for(path, category)
        })
        .collect()
}

fn collect_files(base: &Path, dir: &Path, out: &mut Vec<UploadedFile>) -> Result<(), LibError> {
    let mut entries: Vec<std::fs::DirEntry> = std::fs::read_dir(dir)
        .map_err(|e| LibError::io(dir, e))?
        .flatten()
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        let file_type = entry.file_type().map_err(|e| LibError::io(&path, e))?;
        // Symlinked folders are not followed; they can loop back on the root.
        if file_type.is_dir() {
            collect_files(base, &path, out)?;
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            out.push(upload_for(&path, category_from_path(relative))?);
        }
    }
    Ok(())
}

fn upload_for(path: &Path, category: Option<String>) -> Result<UploadedFile, LibError> {
    let metadata = std::fs::metadata(path).map_err(|e| LibError::io(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut upload = UploadedFile::new(name, mime_for_path(path), metadata.len());
    if let Some(modified) = metadata.modified().ok().map(DateTime::<Utc>::from) {
        upload = upload.with_last_modified(modified);
    }
    if let Some(category) = category {
        upload = upload.with_category(category);
    }
    Ok(upload)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
