//! instashop CLI
//!
//! Command-line interface for turning folders of product photos into a
//! catalog CSV for e-commerce import.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::List { dir, json, all } => commands::list::run_list(&dir, json, all),
        Commands::Export(args) => commands::export::run_export(args, cli.quiet),
        Commands::Edit {
            dir,
            output,
            flags,
        } => commands::edit::run_edit(&dir, output, flags, cli.quiet),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
