//! Host-side support for the instashop catalog tool.
//!
//! Turns directories of product photos into [`UploadedFile`] batches, loads
//! the shared settings file, and runs paced field generation on tokio. Both
//! the CLI and any other frontend go through these functions so behaviour
//! stays consistent.
//!
//! [`UploadedFile`]: instashop_catalog::UploadedFile

pub mod error;
pub mod pacing;
pub mod scanner;
pub mod settings;

pub use error::LibError;
pub use pacing::GenerationPacer;
pub use scanner::{mime_for_path, scan_uploads, uploads_from_paths};
pub use settings::{Settings, load_settings, load_settings_from, save_settings_to, settings_path};

// Re-export the catalog core so frontends need a single dependency.
pub use instashop_catalog as catalog;
