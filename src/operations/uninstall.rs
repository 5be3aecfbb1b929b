//! Uninstall operation
//!
//! Reverses an install using the package's own manifest and the file list
//! recorded at install time: remove actions run first, then the stylesheet
//! merge is undone and every recorded file is deleted.

use std::path::{Path, PathBuf};

use inquire::Confirm;
use tracing::{debug, info, warn};

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, Result};
use crate::installer::merge::{MergeDirection, merge_stylesheet};
use crate::installer::{ActionRunner, CommandRunner, Stage, filelist, registry};

/// Outcome of a successful uninstall
#[derive(Debug, Clone, Default)]
pub struct UninstallReport {
    /// Package identifier
    pub name: String,
    /// Recorded files that were deleted
    pub removed: Vec<PathBuf>,
    /// Recorded files that were already gone
    pub missing: Vec<PathBuf>,
    /// Lifecycle actions that ran
    pub actions: Vec<PathBuf>,
}

/// High-level uninstall operation
pub struct UninstallOperation<'a> {
    fs: &'a dyn FileSystem,
    runner: &'a dyn CommandRunner,
    settings: &'a Settings,
}

impl<'a> UninstallOperation<'a> {
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

    /// Uninstall the package whose source is at `package_path`
    pub fn execute(&self, package_path: &Path) -> Result<UninstallReport> {
        let package = Package::open(self.fs, package_path)?;
        info!("uninstalling barclamp {}", package.name);

        let mut report = UninstallReport {
            name: package.name.clone(),
            ..UninstallReport::default()
        };

        if !self.settings.no_install_actions {
            report.actions = ActionRunner::new(self.fs, self.runner, self.settings).run(
                &package.name,
                &package.path,
                Stage::Remove,
            )?;
        }

        merge_stylesheet(self.fs, self.settings, &package, MergeDirection::Uninstall)?;

        for file in filelist::read(self.fs, self.settings, &package.name)? {
            if self.fs.exists(&file) || self.fs.is_symlink(&file) {
                self.fs
                    .remove_file(&file)
                    .map_err(|e| error::fs::write_failed(&file, &e))?;
                debug!("removed {}", file.display());
                report.removed.push(file);
            } else {
                warn!("{} already removed", file.display());
                report.missing.push(file);
            }
        }

        filelist::remove(self.fs, self.settings, &package.name)?;
        registry::unregister(self.fs, self.settings, &package.name)?;
        Ok(report)
    }
}

/// Ask before removing `name`, listing how many recorded files go with it
pub fn confirm_uninstall(fs: &dyn FileSystem, settings: &Settings, name: &str) -> Result<bool> {
    let files = filelist::read(fs, settings, name)?;
    println!("\nThe barclamp {name} will be uninstalled.");
    if !files.is_empty() {
        println!("  {} file(s) will be removed", files.len());
    }
    println!();

    Ok(Confirm::new("Proceed with uninstall?")
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fs::StdFileSystem;
    use crate::error::BarclampError;
    use crate::installer::actions::MockCommandRunner;
    use crate::operations::install::InstallOperation;
    use crate::test_fixtures::{create_host, create_package, create_test_files};
    use mockall::Sequence;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    fn output(code: i32, text: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: text.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn test_install_then_uninstall_restores_host() {
        let (temp, settings) = create_host();
        let sass = settings.application_sass();
        let original_sass = "// styles\n// top of import list\n@import layout\n";
        create_test_files(sass.parent().unwrap(), &[("application.sass", original_sass)]);
        let path = create_package(
            &temp,
            "dns",
            "barclamp:\n  name: dns\ncrowbar:\n  layout: 2\n  proposal_schema_version: 2\n",
        );
        create_test_files(
            &path,
            &[
                ("bin/dns-tool", "x"),
                ("setup/10-dns.install", "x"),
                ("setup/10-dns.remove", "x"),
                ("crowbar_framework/app/assets/stylesheets/_dns.sass", ".dns"),
            ],
        );

        let mut seq = Sequence::new();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|program, _| program.ends_with("10-dns.install"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(output(0, "")));
        runner
            .expect_run()
            .withf(|program, _| program.ends_with("10-dns.remove"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(output(0, "")));

        let installed = InstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap();
        assert!(std::fs::read_to_string(&sass).unwrap().contains("@import dns"));

        let report = UninstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap();

        assert_eq!(report.removed, installed.files);
        assert!(report.missing.is_empty());
        for file in &installed.files {
            assert!(!file.exists(), "{} still present", file.display());
        }
        assert_eq!(std::fs::read_to_string(&sass).unwrap(), original_sass);
        assert!(!settings.filelist_path("dns").exists());
        assert!(!settings.registry_path().join("dns.yml").exists());
    }

    #[test]
    fn test_non_utf8_file_names_are_removed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (temp, mut settings) = create_host();
        settings.no_install_actions = true;
        let path = create_package(
            &temp,
            "dns",
            "barclamp:\n  name: dns\ncrowbar:\n  layout: 2\n  proposal_schema_version: 2\n",
        );
        create_test_files(&path, &[("bin/dns-tool", "x")]);
        let raw = OsStr::from_bytes(b"r\xe9sum\xe9");
        std::fs::write(path.join("bin").join(raw), "x").unwrap();
        let runner = MockCommandRunner::new();

        let installed = InstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap();
        let copied = settings.bin_path().join(raw);
        assert!(installed.files.contains(&copied));
        assert!(copied.exists());

        let report = UninstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap();

        assert!(report.missing.is_empty());
        assert!(report.removed.contains(&copied));
        assert!(!copied.exists());
    }

    #[test]
    fn test_missing_files_are_reported_not_fatal() {
        let (temp, mut settings) = create_host();
        settings.no_install_actions = true;
        let path = create_package(&temp, "dns", "barclamp:\n  name: dns\n");
        let present = settings.base_dir.join("bin/dns-tool");
        create_test_files(&settings.base_dir, &[("bin/dns-tool", "x")]);
        let gone = settings.base_dir.join("bin/gone");
        filelist::write(&StdFileSystem, &settings, "dns", &[gone.clone(), present.clone()]).unwrap();
        let runner = MockCommandRunner::new();

        let report = UninstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap();

        assert_eq!(report.removed, vec![present]);
        assert_eq!(report.missing, vec![gone]);
    }

    #[test]
    fn test_failed_remove_action_keeps_files() {
        let (temp, settings) = create_host();
        let path = create_package(&temp, "dns", "barclamp:\n  name: dns\n");
        create_test_files(
            &settings.base_dir,
            &[("bin/dns-tool", "x"), ("setup/dns/10-dns.remove", "x")],
        );
        let tool = settings.base_dir.join("bin/dns-tool");
        filelist::write(&StdFileSystem, &settings, "dns", &[tool.clone()]).unwrap();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_, _| Ok(output(1, "service busy")));

        let err = UninstallOperation::new(&StdFileSystem, &runner, &settings)
            .execute(&path)
            .unwrap_err();

        assert!(matches!(err, BarclampError::ActionFailed { .. }));
        assert!(tool.exists());
        assert!(settings.filelist_path("dns").exists());
    }
}
