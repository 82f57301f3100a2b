//! CSV export of the catalog.
//!
//! Rows follow item order, not ledger order. Two output styles exist:
//! RFC 4180 quoting through the `csv` crate (the default) and the legacy
//! format, which joins field values verbatim and breaks on embedded commas,
//! quotes, or newlines. Keep the legacy style only for importers that were
//! built against it.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ledger::Ledger;
use crate::types::{CatalogItem, RecordField};

/// File name the export is saved under.
pub const DEFAULT_EXPORT_FILENAME: &str = "inventory.csv";

const INDEX_HEADER: &str = "Index";

/// Record fields in column order.
const COLUMNS: [RecordField; 5] = [
    RecordField::ItemName,
    RecordField::Sku,
    RecordField::Price,
    RecordField::Quantity,
    RecordField::ShortDescription,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvQuoting {
    /// Quote fields containing commas, quotes, or line breaks.
    #[default]
    Rfc4180,
    /// Emit every value as-is.
    Legacy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prepend the 0-based `Index` column.
    pub include_index: bool,
    pub quoting: CsvQuoting,
    /// Append a trailing `Category` column.
    pub include_category: bool,
}

impl ExportOptions {
    pub fn with_index(mut self, include_index: bool) -> Self {
        self.include_index = include_index;
        self
    }

    pub fn with_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_category(mut self, include_category: bool) -> Self {
        self.include_category = include_category;
        self
    }
}

/// Column titles for the given options.
pub fn header(options: &ExportOptions) -> Vec<&'static str> {
    let mut cols = Vec::with_capacity(COLUMNS.len() + 2);
    if options.include_index {
        cols.push(INDEX_HEADER);
    }
    cols.extend(COLUMNS.iter().map(RecordField::column_header));
    if options.include_category {
        cols.push(RecordField::Category.column_header());
    }
    cols
}

/// Serialize `items` with their ledger records to CSV text.
///
/// Every row is `\n`-terminated. Fails with [`CatalogError::MissingRecord`]
/// if an item has no ledger record.
pub fn serialize(
    items: &[CatalogItem],
    ledger: &Ledger,
    options: &ExportOptions,
) -> Result<String, CatalogError> {
    let rows = build_rows(items, ledger, options)?;
    let header = header(options);

    let out = match options.quoting {
        CsvQuoting::Rfc4180 => write_rfc4180(&header, &rows)?,
        CsvQuoting::Legacy => write_legacy(&header, &rows),
    };
    log::debug!(
        "export: {} rows, {} bytes ({:?})",
        rows.len(),
        out.len(),
        options.quoting
    );
    Ok(out)
}

fn build_rows(
    items: &[CatalogItem],
    ledger: &Ledger,
    options: &ExportOptions,
) -> Result<Vec<Vec<String>>, CatalogError> {
    items
        .iter()
        .map(|item| {
            let record = ledger
                .get(&item.key)
                .ok_or_else(|| CatalogError::MissingRecord(item.key.clone()))?;

            let mut row = Vec::with_capacity(COLUMNS.len() + 2);
            if options.include_index {
                row.push(item.ordinal_index.to_string());
            }
            row.extend(COLUMNS.iter().map(|f| record.get(*f).to_string()));
            if options.include_category {
                row.push(record.category.clone());
            }
            Ok(row)
        })
        .collect()
}

fn write_rfc4180(header: &[&str], rows: &[Vec<String>]) -> Result<String, CatalogError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_legacy(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
