//! Barclamp - overlay package installer
//!
//! Installs self-contained barclamp packages into a running Crowbar framework
//! tree: clones their subtrees, stages lifecycle actions, merges shared
//! stylesheet imports and records what was written so it can be removed.

use clap::Parser;
use console::Style;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod logging;
mod operations;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = cli.settings();
    logging::init(settings.debug);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(settings, args),
        Commands::Uninstall(args) => commands::uninstall::run(settings, args),
        Commands::Create(args) => commands::create::run(settings, args),
        Commands::Actions(args) => commands::actions::run(settings, args),
        Commands::List(args) => commands::list::run(settings, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{} {}", Style::new().red().bold().apply_to("Error:"), e);
        if let Some(help) = e.help() {
            eprintln!("  {help}");
        }
        std::process::exit(1);
    }
}
