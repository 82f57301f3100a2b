use std::path::PathBuf;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::sync::Mutex;

use instashop_catalog::Session;
use instashop_lib::GenerationPacer;

use crate::CliError;
use crate::cli_types::ExportArgs;

use super::{
    build_runtime, effective_settings, generate_fields, ingest_dir, parse_assignment,
    parse_item_assignment, write_csv,
};

/// Scan, generate, apply field assignments, and write the CSV.
pub(crate) fn run_export(args: ExportArgs, quiet: bool) -> Result<(), CliError> {
    let settings = effective_settings(&args.flags)?;

    // Validate assignments before doing any work.
    let bulk = args
        .set_all
        .iter()
        .map(|s| parse_assignment(s))
        .collect::<Result<Vec<_>, _>>()?;
    let per_item = args
        .set_item
        .iter()
        .map(|s| parse_item_assignment(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = Session::new(settings.ingest.key_policy);
    if ingest_dir(&mut session, &args.dir)?.is_none() {
        return Ok(());
    }

    let rt = build_runtime()?;
    let session = Arc::new(Mutex::new(session));
    let mut pacer = GenerationPacer::new(Arc::clone(&session), settings.pacing());
    generate_fields(&rt, &mut pacer, quiet)?;

    let mut session = session.blocking_lock();
    for (field, value) in bulk {
        let n = session.apply_to_all(field, value)?;
        log::debug!("Set {} on {} items", field, n);
    }
    for (key, field, value) in per_item {
        session.update(&key, field, value)?;
    }
    session.finish_editing()?;

    let csv = session.export(&settings.export_options())?;

    if args.stdout {
        print!("{}", csv);
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&settings.export.filename));
    write_csv(&path, &csv)?;
    log::info!(
        "Wrote {} items to {}",
        session.items().len(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
