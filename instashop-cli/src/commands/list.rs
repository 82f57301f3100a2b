use std::path::Path;

use chrono::Local;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use instashop_catalog::{format_size_mb, normalize};

use crate::CliError;
use crate::cli_types::CatalogFlags;

use super::{collect_uploads, effective_settings};

/// Show the products a folder would produce, without generating fields.
pub(crate) fn run_list(dir: &Path, json: bool, all: bool) -> Result<(), CliError> {
    let settings = effective_settings(&CatalogFlags::default())?;
    let uploads = collect_uploads(dir)?;
    let items = normalize(&uploads, settings.ingest.key_policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        log::warn!("No image files found in {}", dir.display());
    } else {
        log::info!(
            "{} in {}",
            format!("{} products", items.len()).if_supports_color(Stdout, |t| t.bold()),
            dir.display(),
        );
        crate::log_blank();
    }

    for item in &items {
        log::info!(
            "  {} {}",
            item.product_label().if_supports_color(Stdout, |t| t.bold()),
            item.display_name.if_supports_color(Stdout, |t| t.cyan()),
        );
        let modified = item
            .last_modified
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        log::info!(
            "    Type: {}  Size: {}  Modified: {}",
            item.mime_type,
            format_size_mb(item.size_bytes),
            modified,
        );
        if let Some(category) = &item.category {
            log::info!("    Category: {}", category);
        }
        if item.key != item.display_name {
            log::info!(
                "    Key: {}",
                item.key.if_supports_color(Stdout, |t| t.yellow())
            );
        }
    }

    if all {
        let skipped: Vec<_> = uploads.iter().filter(|f| !f.is_image()).collect();
        if !skipped.is_empty() {
            crate::log_blank();
            log::info!(
                "{}",
                format!("Skipped {} non-image files:", skipped.len())
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            for file in skipped {
                log::info!("  {} ({})", file.name, file.mime_type);
            }
        }
    }

    Ok(())
}
