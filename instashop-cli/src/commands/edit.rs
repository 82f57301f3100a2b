//! Interactive field editor.
//!
//! Reads one command per line. Per-item edits and bulk edits are separate
//! commands (`set` and `all`), so there is no reserved item key.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::runtime::Runtime;
use tokio::sync::{Mutex, MutexGuard};

use instashop_catalog::{CatalogError, ExportOptions, RecordField, Session, SessionState};
use instashop_lib::{GenerationPacer, Settings};

use crate::CliError;
use crate::cli_types::CatalogFlags;

use super::{
    build_runtime, effective_settings, generate_fields, ingest_dir, parse_assignment,
    parse_item_assignment, write_csv,
};

const HELP: &[(&str, &str)] = &[
    ("show", "List items and their fields"),
    (
        "set KEY:FIELD=VALUE",
        "Edit one item (e.g., set shoe:price=19.99). KEY cannot contain '='",
    ),
    ("all FIELD=VALUE", "Edit every item (e.g., all quantity=5)"),
    ("done", "Mark editing finished"),
    ("export [FILE]", "Write the CSV"),
    ("restart [--yes]", "Discard all items and fields"),
    ("load DIR", "Import a new folder, replacing all items and fields"),
    ("status", "Show the session state"),
    ("quit", "Leave the editor"),
];

pub(crate) fn run_edit(
    dir: &Path,
    output: Option<PathBuf>,
    flags: CatalogFlags,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = effective_settings(&flags)?;
    let mut editor = Editor::new(&settings, output, quiet)?;
    if !editor.load(dir)? {
        return Ok(());
    }

    log::info!(
        "Type {} for a list of commands.",
        "help".if_supports_color(Stdout, |t| t.bold())
    );
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    editor.run(&mut input)
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Editor {
    rt: Runtime,
    pacer: GenerationPacer,
    options: ExportOptions,
    default_output: PathBuf,
    quiet: bool,
}

impl Editor {
    fn new(settings: &Settings, output: Option<PathBuf>, quiet: bool) -> Result<Self, CliError> {
        let session = Arc::new(Mutex::new(Session::new(settings.ingest.key_policy)));
        Ok(Self {
            rt: build_runtime()?,
            pacer: GenerationPacer::new(session, settings.pacing()),
            options: settings.export_options(),
            default_output: output.unwrap_or_else(|| PathBuf::from(&settings.export.filename)),
            quiet,
        })
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.pacer.session().blocking_lock()
    }

    /// Ingest `dir` and generate fields. Returns false if it held no images.
    fn load(&mut self, dir: &Path) -> Result<bool, CliError> {
        let ingested = {
            let mut session = self.session();
            ingest_dir(&mut session, dir)?
        };
        if ingested.is_none() {
            return Ok(false);
        }
        generate_fields(&self.rt, &mut self.pacer, self.quiet)?;
        Ok(true)
    }

    fn run<R: BufRead>(&mut self, input: &mut R) -> Result<(), CliError> {
        let mut line = String::new();
        loop {
            if !self.quiet {
                print!("{} ", ">".if_supports_color(Stdout, |t| t.cyan()));
                std::io::stdout().flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match self.execute(line.trim(), input) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => log::error!("{}", e),
            }
        }
        Ok(())
    }

    fn execute<R: BufRead>(&mut self, line: &str, input: &mut R) -> Result<Flow, CliError> {
        let (cmd, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        match cmd {
            "" => {}
            "help" | "?" => print_help(),
            "show" | "ls" => self.show(),
            "status" => self.status(),
            "set" => {
                let (key, field, value) = parse_item_assignment(rest)?;
                let result = self.session().update(&key, field, value);
                if let Err(CatalogError::UnknownRecord(_)) = &result {
                    self.hint_known_keys();
                }
                result?;
            }
            "all" => {
                let (field, value) = parse_assignment(rest)?;
                let n = self.session().apply_to_all(field, value)?;
                log::info!("Set {} on {} items", field, n);
            }
            "done" => {
                self.session().finish_editing()?;
                log::info!("Ready to export.");
            }
            "export" => {
                let path = if rest.is_empty() {
                    self.default_output.clone()
                } else {
                    PathBuf::from(rest)
                };
                let (csv, count) = {
                    let mut session = self.session();
                    (session.export(&self.options)?, session.items().len())
                };
                write_csv(&path, &csv)?;
                log::info!(
                    "Wrote {} items to {}",
                    count,
                    path.display().if_supports_color(Stdout, |t| t.cyan())
                );
            }
            "restart" => {
                let confirmed = rest == "--yes" || confirm("Discard all items and fields?", input)?;
                if !confirmed {
                    log::info!("Restart cancelled.");
                    return Ok(Flow::Continue);
                }
                if self.pacer.cancel() {
                    log::debug!("Cancelled pending generation");
                }
                self.session().restart(true);
                log::info!(
                    "Session cleared. Use {} to import a folder.",
                    "load DIR".if_supports_color(Stdout, |t| t.bold())
                );
            }
            "load" => {
                if rest.is_empty() {
                    return Err(CliError::invalid_argument("load needs a directory"));
                }
                self.load(Path::new(rest))?;
            }
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => {
                return Err(CliError::invalid_argument(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )));
            }
        }
        Ok(Flow::Continue)
    }

    fn status(&self) {
        let session = self.session();
        log::info!(
            "Session is {} ({} items, {} records)",
            session.state(),
            session.items().len(),
            session.ledger().len()
        );
        log::info!(
            "  Key policy: {}  Pacing: {} ms",
            session.key_policy().as_str(),
            self.pacer.delay().as_millis()
        );
    }

    /// Sorted ledger keys, for pointing at a mistyped item.
    fn known_keys(&self) -> Vec<String> {
        let session = self.session();
        let mut keys: Vec<String> = session.ledger().keys().map(str::to_string).collect();
        keys.sort();
        keys
    }

    fn hint_known_keys(&self) {
        let keys = self.known_keys();
        if !keys.is_empty() {
            log::info!("Known items: {}", keys.join(", "));
        }
    }

    fn show(&self) {
        let session = self.session();
        if session.state() == SessionState::Idle {
            log::info!("No items loaded.");
            return;
        }
        for item in session.items() {
            let Some(record) = session.record(&item.key) else {
                continue;
            };
            log::info!(
                "  {} {}",
                item.product_label().if_supports_color(Stdout, |t| t.bold()),
                item.key.if_supports_color(Stdout, |t| t.cyan()),
            );
            for field in RecordField::ALL {
                let value = record.get(field);
                if !value.is_empty() {
                    log::info!("    {:<18} {}", field.column_header(), value);
                }
            }
        }
    }
}

fn print_help() {
    for (cmd, desc) in HELP {
        log::info!("  {:<22} {}", cmd.if_supports_color(Stdout, |t| t.bold()), desc);
    }
}

/// Ask a yes/no question on the same input stream. Anything but `y`/`yes`
/// counts as no.
fn confirm<R: BufRead>(question: &str, input: &mut R) -> Result<bool, CliError> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
