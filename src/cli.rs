//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Settings;
use crate::config::settings::DEFAULT_BASE_DIR;

/// Barclamp - overlay package installer
///
/// Merge barclamp packages into a running Crowbar framework tree.
#[derive(Parser, Debug)]
#[command(
    name = "barclamp",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Overlay package installer for the Crowbar framework",
    long_about = "Barclamp installs self-contained barclamp packages into a running Crowbar \
                  framework tree, stages their lifecycle actions and keeps the shared \
                  stylesheet in step with what is installed.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  barclamp install /opt/dell/barclamps/dns\n    \
                  barclamp uninstall /opt/dell/barclamps/dns\n    \
                  barclamp create ipmi_tools --entity Acme\n    \
                  barclamp actions /opt/dell/barclamps/dns --stage remove\n    \
                  barclamp list"
)]
pub struct Cli {
    /// Base installation directory
    #[arg(long, global = true, env = "BARCLAMP_BASE_DIR", default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,

    /// File system root for updates, boot files and logs
    #[arg(long, global = true, env = "BARCLAMP_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// Crowbar development checkout holding the barclamps and the model
    #[arg(long, global = true, env = "CROWBAR_DIR")]
    pub crowbar_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true, env = "DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Host settings for this invocation
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new(&self.base_dir)
            .with_root(&self.root)
            .with_crowbar_dir(self.crowbar_dir.clone());
        settings.debug = self.debug;
        settings
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install barclamps into the framework
    Install(InstallArgs),

    /// Remove installed barclamps
    Uninstall(UninstallArgs),

    /// Generate a new barclamp from the model
    Create(CreateArgs),

    /// Run the staged lifecycle actions of a barclamp
    Actions(ActionsArgs),

    /// List installed barclamps
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a barclamp:\n    barclamp install ./dns\n\n\
                   Install several barclamps in order:\n    barclamp install ./deployer ./dns ./ntp\n\n\
                   Only run install actions and cache (deploy mode):\n    barclamp install ./dns --deploy\n\n\
                   Skip install actions:\n    barclamp install ./dns --no-install-actions")]
pub struct InstallArgs {
    /// Paths of unpacked barclamps
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Skip the application components
    #[arg(long)]
    pub deploy: bool,

    /// Do not run install actions
    #[arg(long)]
    pub no_install_actions: bool,

    /// Skip updates and cache files
    #[arg(long)]
    pub no_files: bool,
}

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall a barclamp:\n    barclamp uninstall ./dns\n\n\
                  Uninstall without confirmation:\n    barclamp uninstall ./dns -y")]
pub struct UninstallArgs {
    /// Path of the barclamp source the package was installed from
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Do not run remove actions
    #[arg(long)]
    pub no_install_actions: bool,
}

/// Arguments for the create command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create a barclamp in the barclamp store:\n    barclamp create ipmi_tools\n\n\
                  Create in a specific directory:\n    barclamp create ipmi_tools --target ./ipmi_tools")]
pub struct CreateArgs {
    /// Name of the new barclamp (snake_case)
    pub name: String,

    /// Owner named in the copyright lines
    #[arg(long, default_value = crate::installer::substitute::DEFAULT_ENTITY)]
    pub entity: String,

    /// Directory to generate into
    #[arg(long)]
    pub target: Option<PathBuf>,
}

/// Arguments for the actions command
#[derive(Parser, Debug)]
pub struct ActionsArgs {
    /// Path of the barclamp source
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Lifecycle stage (install or remove)
    #[arg(long, default_value = "install")]
    pub stage: String,

    /// Only list the actions that would run
    #[arg(long)]
    pub list: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, value_name = "SHELL")]
    pub shell: String,
}
