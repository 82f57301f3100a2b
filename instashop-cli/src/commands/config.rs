use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use instashop_catalog::CsvQuoting;
use instashop_lib::{Settings, load_settings_from, save_settings_to, settings_path};

use crate::CliError;

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let exists = path.exists();
    let settings = load_settings_from(&path)?;
    let status = if exists {
        "(exists)"
    } else {
        "(not found, using defaults)"
    };

    log::info!(
        "{}",
        "instashop Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();

    for (name, value) in settings_rows(&settings) {
        log::info!(
            "  {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings_path().display());
    Ok(())
}

/// Write a settings file with default values.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings_to(&path, &Settings::default())?;
    log::info!(
        "{} {}",
        "Wrote default settings to".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

fn settings_rows(settings: &Settings) -> Vec<(&'static str, String)> {
    let quoting = match settings.export.quoting {
        CsvQuoting::Rfc4180 => "rfc4180",
        CsvQuoting::Legacy => "legacy",
    };
    vec![
        ("export.include_index", settings.export.include_index.to_string()),
        ("export.quoting", quoting.to_string()),
        ("export.include_category", settings.export.include_category.to_string()),
        ("export.filename", settings.export.filename.clone()),
        ("ingest.key_policy", settings.ingest.key_policy.as_str().to_string()),
        ("ingest.pacing_ms", settings.ingest.pacing_ms.to_string()),
    ]
}
