//! Data model types for the product catalog.
//!
//! These types represent one upload batch: the raw files handed over by the
//! host environment, the catalog items derived from them, and the editable
//! record kept for each item.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const BYTES_PER_MB: f64 = 1_048_576.0;

// ── Uploaded file ───────────────────────────────────────────────────────────

/// A file supplied by the host environment (file picker, drag and drop, or
/// directory scan). Read-only: the catalog only looks at its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// Name of the folder the file was found in, if any.
    #[serde(default)]
    pub category: Option<String>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            last_modified: None,
            category: None,
        }
    }

    pub fn with_last_modified(mut self, ts: DateTime<Utc>) -> Self {
        self.last_modified = Some(ts);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when the MIME type is in the `image/` family.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

// ── Catalog item ────────────────────────────────────────────────────────────

/// One accepted image, in upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// File name with its trailing extension removed.
    pub display_name: String,
    /// Ledger key. Equals `display_name` unless collisions were disambiguated.
    pub key: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// 0-based position among accepted files.
    pub ordinal_index: usize,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogItem {
    /// Size in megabytes, rounded to two decimals. Display only.
    pub fn size_mb(&self) -> f64 {
        (self.size_bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
    }

    /// Human-facing label, numbered from 1.
    pub fn product_label(&self) -> String {
        format!("Product #{}", self.ordinal_index + 1)
    }
}

// ── Catalog record ──────────────────────────────────────────────────────────

/// The editable product fields held in the ledger for one item.
///
/// Every field is free text; no validation beyond what the CSV consumer does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub item_name: String,
    /// Generated once at creation. Never rewritten by edits.
    pub sku: String,
    pub price: String,
    pub quantity: String,
    pub short_description: String,
    pub category: String,
}

impl CatalogRecord {
    pub fn new(item_name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            sku: sku.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::ItemName => &self.item_name,
            RecordField::Sku => &self.sku,
            RecordField::Price => &self.price,
            RecordField::Quantity => &self.quantity,
            RecordField::ShortDescription => &self.short_description,
            RecordField::Category => &self.category,
        }
    }

    /// Overwrite an editable field. The SKU is rejected.
    pub(crate) fn set(&mut self, field: RecordField, value: String) -> Result<(), CatalogError> {
        let slot = match field {
            RecordField::Sku => return Err(CatalogError::ReadOnlyField(field)),
            RecordField::ItemName => &mut self.item_name,
            RecordField::Price => &mut self.price,
            RecordField::Quantity => &mut self.quantity,
            RecordField::ShortDescription => &mut self.short_description,
            RecordField::Category => &mut self.category,
        };
        *slot = value;
        Ok(())
    }
}

/// A named field of a [`CatalogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    ItemName,
    Sku,
    Price,
    Quantity,
    ShortDescription,
    Category,
}

impl RecordField {
    pub const ALL: [RecordField; 6] = [
        Self::ItemName,
        Self::Sku,
        Self::Price,
        Self::Quantity,
        Self::ShortDescription,
        Self::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemName => "item_name",
            Self::Sku => "sku",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::ShortDescription => "short_description",
            Self::Category => "category",
        }
    }

    /// Column title used in the CSV header.
    pub fn column_header(&self) -> &'static str {
        match self {
            Self::ItemName => "Item Name",
            Self::Sku => "SKU",
            Self::Price => "Price",
            Self::Quantity => "Quantity",
            Self::ShortDescription => "Short Description",
            Self::Category => "Category",
        }
    }

    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Sku)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = CatalogError;

    /// Accepts the snake_case names plus a few short aliases (`name`, `qty`,
    /// `description`). Case and `-`/space separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "item_name" | "itemname" | "name" => Ok(Self::ItemName),
            "sku" => Ok(Self::Sku),
            "price" => Ok(Self::Price),
            "quantity" | "qty" => Ok(Self::Quantity),
            "short_description" | "shortdescription" | "description" | "desc" => {
                Ok(Self::ShortDescription)
            }
            "category" => Ok(Self::Category),
            _ => Err(CatalogError::UnknownField(s.to_string())),
        }
    }
}
