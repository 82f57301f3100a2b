//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use instashop_catalog::{CsvQuoting, KeyPolicy};
use instashop_lib::Settings;

#[derive(Parser)]
#[command(name = "instashop")]
#[command(about = "Turn folders of product photos into a catalog CSV", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that generate and export a catalog.
/// Each flag turns a setting on; settings.toml supplies the rest.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct CatalogFlags {
    /// Prepend a 0-based Index column
    #[arg(long)]
    pub index: bool,

    /// Write values verbatim without CSV quoting (legacy importer format)
    #[arg(long)]
    pub legacy: bool,

    /// Append a Category column taken from folder names
    #[arg(long)]
    pub category: bool,

    /// Give duplicate item names their own records instead of overwriting
    #[arg(long)]
    pub disambiguate: bool,

    /// Delay in milliseconds before generated fields are ready
    #[arg(long)]
    pub pacing_ms: Option<u64>,
}

impl CatalogFlags {
    /// Layer these flags over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if self.index {
            settings.export.include_index = true;
        }
        if self.legacy {
            settings.export.quoting = CsvQuoting::Legacy;
        }
        if self.category {
            settings.export.include_category = true;
        }
        if self.disambiguate {
            settings.ingest.key_policy = KeyPolicy::Disambiguate;
        }
        if let Some(ms) = self.pacing_ms {
            settings.ingest.pacing_ms = ms;
        }
    }
}

#[derive(Args, Clone, Debug)]
pub(crate) struct ExportArgs {
    /// Folder of product photos (scanned recursively) or a single image
    pub dir: PathBuf,

    /// Output file (default: export.filename from settings, "inventory.csv")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Set a field on every item (e.g., price=19.99). Repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set_all: Vec<String>,

    /// Set a field on one item (e.g., shoe:quantity=3). Repeatable.
    /// KEY may contain ':' but not '='; the first '=' starts the value
    #[arg(long = "item", value_name = "KEY:FIELD=VALUE")]
    pub set_item: Vec<String>,

    #[command(flatten)]
    pub flags: CatalogFlags,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the products that would be created from a folder
    List {
        /// Folder of product photos (scanned recursively) or a single image
        dir: PathBuf,

        /// Print items as JSON
        #[arg(long)]
        json: bool,

        /// Also show files skipped because they are not images
        #[arg(short, long)]
        all: bool,
    },

    /// Generate product fields and write the catalog CSV in one step
    Export(ExportArgs),

    /// Edit product fields interactively, then export
    Edit {
        /// Folder of product photos (scanned recursively) or a single image
        dir: PathBuf,

        /// Default output file for `export`
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: CatalogFlags,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let mut settings = Settings::default();
        let flags = CatalogFlags {
            index: true,
            legacy: true,
            category: false,
            disambiguate: true,
            pacing_ms: Some(0),
        };
        flags.apply(&mut settings);
        assert!(settings.export.include_index);
        assert_eq!(settings.export.quoting, CsvQuoting::Legacy);
        assert!(!settings.export.include_category);
        assert_eq!(settings.ingest.key_policy, KeyPolicy::Disambiguate);
        assert_eq!(settings.ingest.pacing_ms, 0);
    }

    #[test]
    fn unset_flags_keep_settings() {
        let mut settings = Settings::default();
        settings.export.include_category = true;
        CatalogFlags::default().apply(&mut settings);
        assert!(settings.export.include_category);
        assert_eq!(settings.ingest.pacing_ms, 400);
    }

    #[test]
    fn export_args_parse() {
        let cli = Cli::try_parse_from([
            "instashop",
            "export",
            "photos",
            "--set",
            "price=10",
            "--item",
            "shoe:quantity=2",
            "--index",
        ])
        .unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.dir, PathBuf::from("photos"));
                assert_eq!(args.set_all, vec!["price=10"]);
                assert_eq!(args.set_item, vec!["shoe:quantity=2"]);
                assert!(args.flags.index);
                assert!(!args.stdout);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn stdout_conflicts_with_output() {
        assert!(
            Cli::try_parse_from(["instashop", "export", "p", "--stdout", "-o", "x.csv"]).is_err()
        );
    }
}
