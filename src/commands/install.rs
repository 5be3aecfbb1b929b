//! Install command CLI wrapper
//!
//! This module provides the CLI interface for install operations,
//! delegating all business logic to operations/install.rs.

use console::Style;

use crate::cli::InstallArgs;
use crate::common::fs::StdFileSystem;
use crate::config::Settings;
use crate::error::Result;
use crate::installer::SystemCommandRunner;
use crate::operations::InstallOperation;

/// Run install command
///
/// Packages are installed in the order given; the first failure stops the run.
pub fn run(mut settings: Settings, args: InstallArgs) -> Result<()> {
    settings.deploy = args.deploy;
    settings.no_install_actions = args.no_install_actions;
    settings.no_files = args.no_files;

    let operation = InstallOperation::new(&StdFileSystem, &SystemCommandRunner, &settings);
    for path in &args.paths {
        let report = operation.execute(path)?;
        println!(
            "{} {} ({} files, {} actions)",
            Style::new().green().bold().apply_to("Installed"),
            Style::new().bold().yellow().apply_to(&report.name),
            report.files.len(),
            report.actions.len()
        );
        if let Some(filelist) = report.filelist {
            println!("  Review {} for files created.", filelist.display());
        }
    }
    Ok(())
}
