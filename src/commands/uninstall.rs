//! Uninstall command CLI wrapper
//!
//! This module provides the CLI interface for uninstall operations,
//! delegating all business logic to operations/uninstall.rs.

use console::Style;

use crate::cli::UninstallArgs;
use crate::common::fs::StdFileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::Result;
use crate::installer::SystemCommandRunner;
use crate::operations::UninstallOperation;
use crate::operations::uninstall::confirm_uninstall;

/// Run uninstall command
pub fn run(mut settings: Settings, args: UninstallArgs) -> Result<()> {
    settings.no_install_actions = args.no_install_actions;

    if !args.yes {
        let package = Package::open(&StdFileSystem, &args.path)?;
        if !confirm_uninstall(&StdFileSystem, &settings, &package.name)? {
            println!("Uninstall cancelled.");
            return Ok(());
        }
    }

    let report = UninstallOperation::new(&StdFileSystem, &SystemCommandRunner, &settings)
        .execute(&args.path)?;

    println!(
        "{} {} ({} files removed)",
        Style::new().green().bold().apply_to("Uninstalled"),
        Style::new().bold().yellow().apply_to(&report.name),
        report.removed.len()
    );
    if !report.missing.is_empty() {
        println!(
            "  {} recorded file(s) were already gone",
            report.missing.len()
        );
    }
    Ok(())
}
