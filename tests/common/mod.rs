//! Common test utilities for barclamp integration tests

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A staged host tree for integration tests
///
/// ```text
/// <temp>/opt/dell      base directory
/// <temp>/root          file system root
/// <temp>/packages      barclamp sources
/// ```
pub struct TestHost {
    /// Temporary directory
    pub temp: TempDir,
    /// Base installation directory
    pub base: PathBuf,
    /// File system root
    pub root: PathBuf,
}

impl TestHost {
    /// Create a new staged host
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let base = temp.path().join("opt").join("dell");
        let root = temp.path().join("root");
        std::fs::create_dir_all(&base).expect("Failed to create base directory");
        std::fs::create_dir_all(&root).expect("Failed to create root directory");
        Self { temp, base, root }
    }

    /// The barclamp binary pointed at this host, with inherited settings cleared
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("barclamp").expect("Failed to find barclamp binary");
        cmd.env_remove("CROWBAR_DIR")
            .env_remove("DEBUG")
            .env_remove("RUST_LOG")
            .env_remove("BARCLAMP_BASE_DIR")
            .env_remove("BARCLAMP_ROOT")
            .arg("--base-dir")
            .arg(&self.base)
            .arg("--root")
            .arg(&self.root);
        cmd
    }

    /// Create a package source with the given manifest
    pub fn create_package(&self, name: &str, manifest: &str) -> PathBuf {
        let path = self.temp.path().join("packages").join(name);
        std::fs::create_dir_all(&path).expect("Failed to create package directory");
        std::fs::write(path.join("crowbar.yml"), manifest).expect("Failed to write crowbar.yml");
        std::fs::canonicalize(&path).expect("Failed to canonicalize package path")
    }

    /// Write a file, creating parent directories
    pub fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Write an executable shell script
    pub fn write_script(&self, path: &Path, body: &str) {
        self.write_file(path, &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
    }

    /// Read a file
    pub fn read_file(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }

    pub fn crowbar_path(&self) -> PathBuf {
        self.base.join("crowbar_framework")
    }

    pub fn filelist(&self, name: &str) -> PathBuf {
        self.base.join("barclamps").join(format!("{name}-filelist.txt"))
    }

    pub fn application_sass(&self) -> PathBuf {
        self.crowbar_path()
            .join("app/assets/stylesheets/application.sass")
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission bits of a path
pub fn mode_of(path: &Path) -> u32 {
    std::fs::metadata(path)
        .expect("Failed to stat path")
        .permissions()
        .mode()
        & 0o777
}
