//! Install operation
//!
//! Installs one unpacked package into the host tree:
//!
//! 1. Open the package and check its layout
//! 2. Unless deploying, install the application components and record every
//!    file written in the package's file list
//! 3. Unless files are skipped, install the boot-file cache
//! 4. Unless actions are skipped, run the `install` stage
//! 5. Regenerate the registry catalog
//!
//! Nothing is rolled back on failure; files written before the error stay.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, Result};
use crate::installer::merge::{MergeDirection, merge_stylesheet};
use crate::installer::permissions::{EXECUTABLE_MODE, chmod_recursive, framework_permissions};
use crate::installer::substitute::DEFAULT_ENTITY;
use crate::installer::{
    ActionRunner, CommandRunner, Stage, SubstitutionContext, TreeCloner, cache, engine, filelist,
    registry, schema,
};

/// Outcome of a successful install
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Package identifier
    pub name: String,
    /// Files written, in creation order
    pub files: Vec<PathBuf>,
    /// Where the file list was persisted; `None` in deploy mode
    pub filelist: Option<PathBuf>,
    /// Lifecycle actions that ran
    pub actions: Vec<PathBuf>,
}

/// High-level install operation
pub struct InstallOperation<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn CommandRunner,
    settings: &'a Settings,
}

impl<'a> InstallOperation<'a> {
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

    /// Install the package at `package_path`
    pub fn execute(&self, package_path: &Path) -> Result<InstallReport> {
        let package = Package::open(self.fs, package_path)?;
        package.manifest.layout(&package.name)?;

        let mut report = InstallReport {
            name: package.name.clone(),
            ..InstallReport::default()
        };

        if self.settings.deploy {
            debug!("deploy mode, skipping application components");
        } else {
            info!(
                "installing barclamp {} from {}",
                package.name,
                package.path.display()
            );
            report.files = self.install_application(&package)?;
            report.filelist = Some(filelist::write(
                self.fs,
                self.settings,
                &package.name,
                &report.files,
            )?);
            registry::register(self.fs, self.settings, &package)?;
        }

        if !self.settings.no_files {
            debug!("installing cache components");
            cache::install_cache(self.fs, self.settings, &package)?;
        }

        if !self.settings.no_install_actions {
            debug!("performing install actions");
            report.actions = ActionRunner::new(self.fs, self.runner, self.settings).run(
                &package.name,
                &package.path,
                Stage::Install,
            )?;
        }

        registry::catalog(self.fs, self.settings)?;
        debug!(
            "barclamp {} (format v{}) added to the framework",
            package.name,
            package.manifest.layout_number()
        );
        Ok(report)
    }

    /// Clone every application subtree, returning the files written
    fn install_application(&self, package: &Package) -> Result<Vec<PathBuf>> {
        let ctx = SubstitutionContext::now(package.name.as_str(), DEFAULT_ENTITY);
        let cloner = TreeCloner::new(self.fs, &ctx);
        let settings = self.settings;
        let base = settings.base_path();
        let has = |entry: &str| self.fs.exists(&package.path.join(entry));
        let mut files = Vec::new();

        if has(engine::ENGINE_DIR) {
            debug!("package ships an engine, mounting it");
            engine::mount_engine(self.fs, settings, package)?;
        } else if has("crowbar_framework") {
            files.extend(cloner.clone_tree("crowbar_framework", &package.path, base, false)?);
            framework_permissions(self.fs, settings)?;
        }

        merge_stylesheet(self.fs, settings, package, MergeDirection::Install)?;

        if has("bin") {
            files.extend(cloner.clone_tree("bin", &package.path, base, false)?);
            chmod_recursive(self.fs, EXECUTABLE_MODE, &settings.bin_path())?;
        }

        if has("setup") {
            let target = settings.setup_path().join(&package.name);
            self.create_dir_all(&target)?;
            files.extend(cloner.clone_tree("", &package.path.join("setup"), &target, false)?);
            chmod_recursive(self.fs, EXECUTABLE_MODE, &target)?;
            debug!("staged install actions in {}", target.display());
        } else {
            debug!("no install actions to copy");
        }

        if has("updates") && !settings.no_files {
            self.create_dir_all(&settings.root_dir)?;
            files.extend(cloner.clone_tree("updates", &package.path, &settings.root_dir, false)?);
            chmod_recursive(self.fs, EXECUTABLE_MODE, &settings.update_path())?;
        }

        for entry in ["chef", "BDD"] {
            if has(entry) {
                files.extend(cloner.clone_tree(entry, &package.path, base, false)?);
            }
        }

        if has("doc") {
            let target = settings.doc_path().join(&package.name);
            self.create_dir_all(&target)?;
            files.extend(cloner.clone_tree("", &package.path.join("doc"), &target, false)?);
        } else {
            debug!("no docs to copy");
        }

        schema::migrate_schema(self.fs, settings, package)?;
        Ok(files)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.fs
            .create_dir_all(path)
            .map_err(|e| error::fs::write_failed(path, &e))
    }
}
