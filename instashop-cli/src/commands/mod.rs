pub(crate) mod config;
pub(crate) mod edit;
pub(crate) mod export;
pub(crate) mod list;

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::runtime::Runtime;

use instashop_catalog::{CatalogError, RecordField, Session, UploadedFile, import_summary};
use instashop_lib::{
    GenerationPacer, LibError, Settings, load_settings, scan_uploads, uploads_from_paths,
};

use crate::CliError;
use crate::cli_types::CatalogFlags;

/// Load settings.toml and layer command-line flags on top.
pub(crate) fn effective_settings(flags: &CatalogFlags) -> Result<Settings, CliError> {
    let mut settings = load_settings()?;
    flags.apply(&mut settings);
    Ok(settings)
}

pub(crate) fn build_runtime() -> Result<Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Uploads for a folder (scanned recursively) or a single file.
pub(crate) fn collect_uploads(path: &Path) -> Result<Vec<UploadedFile>, CliError> {
    if path.is_file() {
        Ok(uploads_from_paths(&[PathBuf::from(path)])?)
    } else {
        Ok(scan_uploads(path)?)
    }
}

/// Scan `dir` and replace the session's items with its images.
///
/// Returns `None` when no image was found; that is reported as a warning,
/// not an error.
pub(crate) fn ingest_dir(session: &mut Session, dir: &Path) -> Result<Option<usize>, CliError> {
    let uploads = collect_uploads(dir)?;
    match session.ingest(&uploads) {
        Ok(n) => {
            log::info!(
                "{}",
                import_summary(n).if_supports_color(Stdout, |t| t.green())
            );
            Ok(Some(n))
        }
        Err(CatalogError::EmptySelection) => {
            log::warn!(
                "No image files found in {} ({} files scanned)",
                dir.display(),
                uploads.len()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Request field generation and block until the paced completion fires.
pub(crate) fn generate_fields(
    rt: &Runtime,
    pacer: &mut GenerationPacer,
    quiet: bool,
) -> Result<(), CliError> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    spinner.set_message("Generating product fields...");

    let completed: Result<bool, LibError> = rt.block_on(async {
        pacer.request().await?;
        pacer.wait().await
    });
    spinner.finish_and_clear();

    if completed? {
        Ok(())
    } else {
        Err(CliError::other("Field generation did not complete"))
    }
}

/// Parse `FIELD=VALUE`.
pub(crate) fn parse_assignment(s: &str) -> Result<(RecordField, String), CliError> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| CliError::invalid_argument(format!("expected FIELD=VALUE, got '{}'", s)))?;
    let field: RecordField = field.parse()?;
    Ok((field, value.to_string()))
}

/// Parse `KEY:FIELD=VALUE`. The key may itself contain `:`; the last one
/// before `=` separates key and field. The first `=` always starts the
/// value, so a key containing `=` (from a file like `a=b.png`) cannot be
/// addressed.
pub(crate) fn parse_item_assignment(s: &str) -> Result<(String, RecordField, String), CliError> {
    let (target, value) = s.split_once('=').ok_or_else(|| {
        CliError::invalid_argument(format!("expected KEY:FIELD=VALUE, got '{}'", s))
    })?;
    let (key, field) = target.rsplit_once(':').ok_or_else(|| {
        CliError::invalid_argument(format!("expected KEY:FIELD=VALUE, got '{}'", s))
    })?;
    let field: RecordField = field.parse()?;
    Ok((key.to_string(), field, value.to_string()))
}

/// Write CSV text to `path`, creating parent directories.
pub(crate) fn write_csv(path: &Path, csv: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv).map_err(|e| {
        CliError::other(format!("Failed to write {}: {}", path.display(), e))
    })
}
