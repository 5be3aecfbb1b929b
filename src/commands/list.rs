//! List command implementation
//!
//! This command lists the installed barclamps with their recorded file counts.

use console::Style;

use crate::cli::ListArgs;
use crate::common::fs::StdFileSystem;
use crate::config::Settings;
use crate::error::Result;
use crate::operations::ListOperation;

/// Run list command
pub fn run(settings: Settings, args: ListArgs) -> Result<()> {
    let packages = ListOperation::new(&StdFileSystem, &settings).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        println!("No barclamps installed.");
        return Ok(());
    }

    println!("Installed barclamps ({}):", packages.len());
    println!();
    for package in &packages {
        let registered = if package.registered {
            ""
        } else {
            " (not registered)"
        };
        println!(
            "  {} {} files{}",
            Style::new().bold().yellow().apply_to(&package.name),
            package.files,
            registered
        );
    }
    Ok(())
}
