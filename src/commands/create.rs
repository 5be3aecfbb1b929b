//! Create command CLI wrapper

use console::Style;

use crate::cli::CreateArgs;
use crate::common::fs::StdFileSystem;
use crate::config::Settings;
use crate::error::Result;
use crate::operations::{CreateOperation, CreateOptions};

impl From<CreateArgs> for CreateOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            entity: args.entity,
            target: args.target,
        }
    }
}

/// Run create command
pub fn run(settings: Settings, args: CreateArgs) -> Result<()> {
    let options = CreateOptions::from(args);
    let report = CreateOperation::new(&StdFileSystem, &settings).execute(&options)?;

    println!(
        "{} {} in {} ({} files)",
        Style::new().green().bold().apply_to("Created"),
        Style::new().bold().yellow().apply_to(&options.name),
        report.target.display(),
        report.files.len()
    );
    Ok(())
}
