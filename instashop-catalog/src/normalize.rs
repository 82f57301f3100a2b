//! Ingestion: turn raw uploads into ordered catalog items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::name_parser::display_name;
use crate::types::{CatalogItem, UploadedFile};

/// How ledger keys are assigned when two files reduce to the same display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Key is the display name. A later duplicate replaces the earlier
    /// record, and both rows export the surviving record.
    #[default]
    LastWriteWins,
    /// The first occurrence keeps the display name; later duplicates are
    /// keyed `"<name>#<ordinal>"`.
    Disambiguate,
}

impl KeyPolicy {
    /// Settings-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastWriteWins => "last_write_wins",
            Self::Disambiguate => "disambiguate",
        }
    }
}

/// Filter uploads down to images and derive one [`CatalogItem`] per survivor.
///
/// Relative order is preserved and `ordinal_index` counts from 0 over the
/// filtered sequence. Non-image files are dropped without error.
pub fn normalize(files: &[UploadedFile], policy: KeyPolicy) -> Vec<CatalogItem> {
    let mut seen: HashSet<String> = HashSet::new();

    files
        .iter()
        .filter(|f| f.is_image())
        .enumerate()
        .map(|(ordinal_index, file)| {
            let display_name = display_name(&file.name);
            let key = assign_key(&display_name, ordinal_index, policy, &mut seen);
            CatalogItem {
                display_name,
                key,
                mime_type: file.mime_type.clone(),
                size_bytes: file.size_bytes,
                ordinal_index,
                last_modified: file.last_modified,
                category: file.category.clone(),
            }
        })
        .collect()
}

/// Like [`normalize`], but an empty result is reported as
/// [`CatalogError::EmptySelection`].
pub fn normalize_nonempty(
    files: &[UploadedFile],
    policy: KeyPolicy,
) -> Result<Vec<CatalogItem>, CatalogError> {
    let items = normalize(files, policy);
    if items.is_empty() {
        log::debug!("normalize: none of {} files is an image", files.len());
        return Err(CatalogError::EmptySelection);
    }
    Ok(items)
}

/// Notification text shown after an import.
pub fn import_summary(count: usize) -> String {
    format!("{} files imported successfully.", count)
}

fn assign_key(
    display_name: &str,
    ordinal_index: usize,
    policy: KeyPolicy,
    seen: &mut HashSet<String>,
) -> String {
    if seen.insert(display_name.to_string()) {
        return display_name.to_string();
    }

    match policy {
        KeyPolicy::LastWriteWins => {
            log::warn!(
                "Duplicate item name '{}' (file #{}); it replaces the earlier record",
                display_name,
                ordinal_index + 1,
            );
            display_name.to_string()
        }
        KeyPolicy::Disambiguate => {
            let mut n = ordinal_index;
            let mut key = format!("{}#{}", display_name, n);
            // A real file may already be named "<name>#<n>".
            while !seen.insert(key.clone()) {
                n += 1;
                key = format!("{}#{}", display_name, n);
            }
            log::debug!("Duplicate item name '{}' keyed as '{}'", display_name, key);
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> UploadedFile {
        UploadedFile::new(name, mime, 1024)
    }

    #[test]
    fn filters_and_reindexes() {
        let files = vec![
            file("a.png", "image/png"),
            file("list.csv", "text/csv"),
            file("b.jpg", "image/jpeg"),
        ];
        let items = normalize(&files, KeyPolicy::default());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name, "a");
        assert_eq!(items[0].ordinal_index, 0);
        assert_eq!(items[1].display_name, "b");
        assert_eq!(items[1].ordinal_index, 1);
        assert_eq!(items[1].mime_type, "image/jpeg");
    }

    #[test]
    fn empty_selection_is_reported() {
        let files = vec![file("notes.txt", "text/plain")];
        assert!(normalize(&files, KeyPolicy::default()).is_empty());
        assert!(matches!(
            normalize_nonempty(&files, KeyPolicy::default()),
            Err(CatalogError::EmptySelection)
        ));
    }

    #[test]
    fn last_write_wins_shares_key() {
        let files = vec![file("shoe.png", "image/png"), file("shoe.jpg", "image/jpeg")];
        let items = normalize(&files, KeyPolicy::LastWriteWins);
        assert_eq!(items[0].key, "shoe");
        assert_eq!(items[1].key, "shoe");
    }

    #[test]
    fn disambiguate_folds_in_ordinal() {
        let files = vec![
            file("shoe.png", "image/png"),
            file("hat.png", "image/png"),
            file("shoe.jpg", "image/jpeg"),
        ];
        let items = normalize(&files, KeyPolicy::Disambiguate);
        assert_eq!(items[0].key, "shoe");
        assert_eq!(items[1].key, "hat");
        assert_eq!(items[2].key, "shoe#2");
        assert_eq!(items[2].display_name, "shoe");
    }

    #[test]
    fn disambiguate_skips_taken_keys() {
        let files = vec![
            file("shoe.png", "image/png"),
            file("shoe#2.png", "image/png"),
            file("shoe.gif", "image/gif"),
        ];
        let items = normalize(&files, KeyPolicy::Disambiguate);
        assert_eq!(items[0].key, "shoe");
        assert_eq!(items[1].key, "shoe#2");
        assert_eq!(items[2].key, "shoe#3");
    }

    #[test]
    fn policy_names_match_settings_spelling() {
        assert_eq!(KeyPolicy::default().as_str(), "last_write_wins");
        assert_eq!(KeyPolicy::Disambiguate.as_str(), "disambiguate");
    }

    #[test]
    fn summary_text() {
        assert_eq!(import_summary(3), "3 files imported successfully.");
    }
}
