//! In-memory ledger of editable catalog records.
//!
//! The ledger maps an item key to its [`CatalogRecord`]. It is built in one
//! batch from the item list, edited field by field, and cleared wholesale on
//! restart. Iteration order is unspecified; export walks the item list.

use std::collections::HashMap;

use rand::Rng;

use crate::error::CatalogError;
use crate::sku::generate_sku_with;
use crate::types::{CatalogItem, CatalogRecord, RecordField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: HashMap<String, CatalogRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh ledger with one record per item and a new SKU for each.
    pub fn initialize(items: &[CatalogItem]) -> Self {
        Self::initialize_with(items, &mut rand::thread_rng())
    }

    /// [`initialize`](Self::initialize) with a caller-supplied RNG.
    pub fn initialize_with<R: Rng + ?Sized>(items: &[CatalogItem], rng: &mut R) -> Self {
        let mut records = HashMap::with_capacity(items.len());
        for item in items {
            let sku = generate_sku_with(&item.display_name, rng);
            let mut record = CatalogRecord::new(item.display_name.clone(), sku);
            if let Some(category) = &item.category {
                record = record.with_category(category.clone());
            }
            if records.insert(item.key.clone(), record).is_some() {
                log::debug!("ledger: record for '{}' overwritten", item.key);
            }
        }
        log::debug!("ledger: initialized {} records", records.len());
        Self { records }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Set one field of one record. The key must already exist.
    pub fn update(
        &mut self,
        key: &str,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        if !field.is_editable() {
            return Err(CatalogError::ReadOnlyField(field));
        }
        let record = self
            .records
            .get_mut(key)
            .ok_or_else(|| CatalogError::UnknownRecord(key.to_string()))?;
        record.set(field, value.into())
    }

    /// Set the same field on every record. Returns how many records changed.
    pub fn apply_to_all(
        &mut self,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<usize, CatalogError> {
        if !field.is_editable() {
            return Err(CatalogError::ReadOnlyField(field));
        }
        let value = value.into();
        for record in self.records.values_mut() {
            record.set(field, value.clone())?;
        }
        log::debug!(
            "ledger: set {} on all {} records",
            field,
            self.records.len()
        );
        Ok(self.records.len())
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{KeyPolicy, normalize};
    use crate::types::UploadedFile;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(names: &[&str]) -> Vec<CatalogItem> {
        let files: Vec<UploadedFile> = names
            .iter()
            .map(|n| UploadedFile::new(*n, "image/png", 10))
            .collect();
        normalize(&files, KeyPolicy::default())
    }

    #[test]
    fn initialize_creates_blank_records() {
        let ledger = Ledger::initialize(&items(&["shoe.png", "hat.png"]));
        assert_eq!(ledger.len(), 2);
        let shoe = ledger.get("shoe").unwrap();
        assert_eq!(shoe.item_name, "shoe");
        assert!(shoe.sku.starts_with("shoe-"));
        assert!(shoe.price.is_empty());
        assert!(shoe.quantity.is_empty());
        assert!(shoe.short_description.is_empty());
    }

    #[test]
    fn update_touches_only_target() {
        let mut ledger =
            Ledger::initialize_with(&items(&["shoe.png", "hat.png"]), &mut StdRng::seed_from_u64(3));
        let before = ledger.clone();
        ledger.update("shoe", RecordField::Price, "19.99").unwrap();

        assert_eq!(ledger.get("shoe").unwrap().price, "19.99");
        assert_eq!(ledger.get("shoe").unwrap().sku, before.get("shoe").unwrap().sku);
        assert_eq!(ledger.get("hat"), before.get("hat"));
    }

    #[test]
    fn update_unknown_key_does_not_create() {
        let mut ledger = Ledger::initialize(&items(&["shoe.png"]));
        let err = ledger.update("boot", RecordField::Price, "1").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRecord(k) if k == "boot"));
        assert!(!ledger.contains("boot"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn all_is_an_ordinary_key() {
        let mut ledger = Ledger::initialize(&items(&["shoe.png", "hat.png"]));
        assert!(ledger.update("all", RecordField::Price, "5").is_err());
        assert!(ledger.iter().all(|(_, r)| r.price.is_empty()));
    }

    #[test]
    fn apply_to_all_sets_every_record() {
        let mut ledger = Ledger::initialize(&items(&["shoe.png", "hat.png", "bag.png"]));
        let n = ledger.apply_to_all(RecordField::Quantity, "3").unwrap();
        assert_eq!(n, 3);
        assert!(ledger.iter().all(|(_, r)| r.quantity == "3"));
    }

    #[test]
    fn sku_cannot_be_edited() {
        let mut ledger = Ledger::initialize(&items(&["shoe.png"]));
        assert!(matches!(
            ledger.update("shoe", RecordField::Sku, "x"),
            Err(CatalogError::ReadOnlyField(_))
        ));
        assert!(matches!(
            ledger.apply_to_all(RecordField::Sku, "x"),
            Err(CatalogError::ReadOnlyField(_))
        ));
    }

    #[test]
    fn clear_empties_everything() {
        let mut ledger = Ledger::initialize(&items(&["shoe.png"]));
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.get("shoe").is_none());
    }

    #[test]
    fn duplicate_names_collapse_under_last_write_wins() {
        let ledger = Ledger::initialize(&items(&["shoe.png", "shoe.jpg"]));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn category_carries_into_record() {
        let files = vec![UploadedFile::new("sandal.png", "image/png", 1).with_category("summer")];
        let ledger = Ledger::initialize(&normalize(&files, KeyPolicy::default()));
        assert_eq!(ledger.get("sandal").unwrap().category, "summer");
    }
}
