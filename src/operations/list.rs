//! List operation
//!
//! Installed packages are the ones with a recorded file list.

use serde::Serialize;

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::error::Result;
use crate::installer::{filelist, registry};

/// One installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledPackage {
    pub name: String,
    /// Number of files recorded at install time
    pub files: usize,
    /// Whether the framework registry knows the package
    pub registered: bool,
}

/// High-level list operation
pub struct ListOperation<'a> {
    fs: &'a dyn FileSystem,
    settings: &'a Settings,
}

impl<'a> ListOperation<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: &'a Settings) -> Self {
        Self { fs, settings }
    }

    /// Installed packages sorted by name
    pub fn execute(&self) -> Result<Vec<InstalledPackage>> {
        filelist::installed(self.fs, self.settings)?
            .into_iter()
            .map(|name| {
                let files = filelist::read(self.fs, self.settings, &name)?.len();
                let registered = self
                    .fs
                    .exists(&registry::manifest_path(self.settings, &name));
                Ok(InstalledPackage {
                    name,
                    files,
                    registered,
                })
            })
            .collect()
    }
}
