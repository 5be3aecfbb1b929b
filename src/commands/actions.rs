//! Actions command: run or list a barclamp's staged lifecycle actions

use console::Style;

use crate::cli::ActionsArgs;
use crate::common::fs::StdFileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::Result;
use crate::installer::{ActionRunner, Stage, SystemCommandRunner};

/// Run actions command
pub fn run(settings: Settings, args: ActionsArgs) -> Result<()> {
    let stage: Stage = args.stage.parse()?;
    let package = Package::open(&StdFileSystem, &args.path)?;
    let runner = ActionRunner::new(&StdFileSystem, &SystemCommandRunner, &settings);

    if args.list {
        let actions = runner.discover(&package.name, stage)?;
        if actions.is_empty() {
            println!("No {stage} actions staged for {}.", package.name);
        }
        for action in actions {
            println!("  {}", action.display());
        }
        return Ok(());
    }

    let ran = runner.run(&package.name, &package.path, stage)?;
    println!(
        "{} {} {} action(s) for {}",
        Style::new().green().bold().apply_to("Ran"),
        ran.len(),
        stage,
        Style::new().bold().yellow().apply_to(&package.name)
    );
    Ok(())
}
