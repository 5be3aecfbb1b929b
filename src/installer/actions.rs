//! Lifecycle action runner
//!
//! Packages stage executable hooks under `<base>/setup/<package>/`. Each hook
//! is named `<anything>.<stage>`; a stage runs every matching hook in byte
//! order of the filename and stops at the first failure. Numeric prefixes
//! (`10-`, `50-`, ...) are only a naming convention.

use std::fmt;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::common::fs::{FileSystem, visible_entries};
use crate::config::Settings;
use crate::error::{self, BarclampError, Result};

/// Lifecycle stages a package can hook into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Install,
    Remove,
}

/// Filename suffix of the hooks for each stage
const STAGE_SUFFIXES: &[(Stage, &str)] = &[(Stage::Install, "install"), (Stage::Remove, "remove")];

impl Stage {
    /// Suffix that marks a hook as belonging to this stage
    pub fn suffix(self) -> &'static str {
        STAGE_SUFFIXES
            .iter()
            .find_map(|(stage, suffix)| (*stage == self).then_some(*suffix))
            .unwrap_or_default()
    }
}

impl FromStr for Stage {
    type Err = BarclampError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        STAGE_SUFFIXES
            .iter()
            .find_map(|(stage, suffix)| (*suffix == s).then_some(*stage))
            .ok_or_else(|| error::action::unknown_stage(s))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Runs a single hook
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Execute `program` with extra environment variables and capture its output
    fn run(&self, program: &Path, env: &[(String, String)]) -> io::Result<Output>;
}

/// Runs hooks on the host through `sh`, folding stderr into stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, env: &[(String, String)]) -> io::Result<Output> {
        Command::new("sh")
            .arg("-c")
            .arg("exec \"$0\" 2>&1")
            .arg(program)
            .envs(env.iter().map(|(key, value)| (key, value)))
            .output()
    }
}

/// Discovers and runs a package's staged hooks
pub struct ActionRunner<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn CommandRunner,
    settings: &'a Settings,
}

impl<'a> ActionRunner<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        runner: &'a dyn CommandRunner,
        settings: &'a Settings,
    ) -> Self {
        Self {
            fs,
            runner,
            settings,
        }
    }

    /// Hooks staged for `package` and `stage`, in run order
    ///
    /// A missing staging directory means there is nothing to run.
    pub fn discover(&self, package: &str, stage: Stage) -> Result<Vec<PathBuf>> {
        let dir = self.settings.setup_path().join(package);
        if !self.fs.is_dir(&dir) {
            debug!("no staged actions in {}", dir.display());
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", stage.suffix());
        let names = visible_entries(self.fs, &dir).map_err(|e| error::fs::read_failed(&dir, &e))?;
        Ok(names
            .into_iter()
            .filter(|name| name.as_bytes().ends_with(suffix.as_bytes()))
            .map(|name| dir.join(name))
            .filter(|path| !self.fs.is_dir(path))
            .collect())
    }

    /// Run every hook of `stage` for `package`, stopping at the first failure
    ///
    /// Hooks see `CROWBAR_DIR` (the base directory) and `BC_PATH` (the
    /// package source) in their environment. Returns the hooks that ran.
    pub fn run(&self, package: &str, package_path: &Path, stage: Stage) -> Result<Vec<PathBuf>> {
        let actions = self.discover(package, stage)?;
        let env = vec![
            (
                "CROWBAR_DIR".to_string(),
                self.settings.base_path().display().to_string(),
            ),
            ("BC_PATH".to_string(), package_path.display().to_string()),
        ];

        for action in &actions {
            self.run_one(package, action, &env)?;
        }
        Ok(actions)
    }

    fn run_one(&self, package: &str, action: &Path, env: &[(String, String)]) -> Result<()> {
        if !self.fs.exists(action) {
            return Err(BarclampError::ActionNotFound {
                action: action.display().to_string(),
                package: package.to_string(),
            });
        }

        info!("running {} for {}", action.display(), package);
        let output = self
            .runner
            .run(action, env)
            .map_err(|e| BarclampError::ActionSpawnFailed {
                action: action.display().to_string(),
                reason: e.to_string(),
            })?;
        let text = combined_output(&output);

        if output.status.success() {
            debug!("action {} succeeded for {}:\n{}", action.display(), package, text);
            return Ok(());
        }

        let log = self.write_log(package, action, &text);
        Err(error::action::failed(action, package, text, log.as_deref()))
    }

    /// Keep the output of a failed hook; returns the log path when it was written
    fn write_log(&self, package: &str, action: &Path, text: &str) -> Option<PathBuf> {
        let dir = self.settings.log_path();
        let name = action
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let log = dir.join(format!("{package}-{name}.log"));

        let written = self
            .fs
            .create_dir_all(&dir)
            .and_then(|()| self.fs.write(&log, text.as_bytes()));
        match written {
            Ok(()) => Some(log),
            Err(e) => {
                warn!("could not write action log {}: {}", log.display(), e);
                None
            }
        }
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
