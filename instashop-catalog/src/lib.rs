//! Product catalog core: ingestion, ledger, and CSV export.
//!
//! This crate turns a batch of uploaded image files into catalog items,
//! keeps the user-edited product fields for each item in a [`Ledger`], and
//! serializes the result as CSV for import into an e-commerce catalog.
//! It has no filesystem or async dependencies; `instashop-lib` supplies the
//! host-side adapters.

pub mod error;
pub mod export;
pub mod ledger;
pub mod name_parser;
pub mod normalize;
pub mod session;
pub mod sku;
pub mod types;

pub use error::CatalogError;
pub use export::{CsvQuoting, DEFAULT_EXPORT_FILENAME, ExportOptions, serialize};
pub use ledger::Ledger;
pub use name_parser::{category_from_path, display_name, format_size_mb};
pub use normalize::{KeyPolicy, import_summary, normalize, normalize_nonempty};
pub use session::{GenerationTicket, Session, SessionState};
pub use sku::{generate_sku, generate_sku_with};
pub use types::*;
