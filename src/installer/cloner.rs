//! Recursive tree cloning
//!
//! Copies one entry of a package (a file or a whole subtree) into the host
//! tree and reports every file it wrote, in depth-first pre-order. Hidden
//! entries are skipped. When `rewrite` is set, both names and file contents
//! go through the placeholder substitutor; this is only used to generate a
//! new package from the model.
//!
//! Cloning is not transactional: the first I/O failure aborts the walk and
//! whatever was already written stays on disk.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::fs::{FileSystem, visible_entries};
use crate::error::{self, Result};

use super::substitute::{SubstitutionContext, substitute};

/// Clones package entries into a target tree
pub struct TreeCloner<'a> {
    fs: &'a dyn FileSystem,
    ctx: &'a SubstitutionContext,
}

impl<'a> TreeCloner<'a> {
    pub fn new(fs: &'a dyn FileSystem, ctx: &'a SubstitutionContext) -> Self {
        Self { fs, ctx }
    }

    /// Clone `source_dir/entry` to `target_dir/entry`, returning the files written
    ///
    /// An empty `entry` clones the contents of `source_dir` into `target_dir`.
    /// The target directory itself must already exist. Names that are not
    /// valid UTF-8 are copied as they are, even when rewriting.
    pub fn clone_tree(
        &self,
        entry: impl AsRef<OsStr>,
        source_dir: &Path,
        target_dir: &Path,
        rewrite: bool,
    ) -> Result<Vec<PathBuf>> {
        let entry = entry.as_ref();
        let target_name = self.target_name(entry, rewrite);
        let source = join_entry(source_dir, entry);
        let target = join_entry(target_dir, &target_name);
        debug!(
            source = %source.display(),
            target = %target.display(),
            rewrite,
            "cloning"
        );

        if !self.fs.exists(&source) {
            return Err(error::fs::not_found(&source));
        }

        if self.fs.is_dir(&source) {
            self.clone_dir(&source, &target, rewrite)
        } else {
            self.clone_file(&source, &target, rewrite)?;
            Ok(vec![target])
        }
    }

    fn target_name(&self, entry: &OsStr, rewrite: bool) -> OsString {
        match entry.to_str() {
            Some(name) if rewrite => substitute(name, self.ctx).into(),
            _ => entry.to_os_string(),
        }
    }

    fn clone_dir(&self, source: &Path, target: &Path, rewrite: bool) -> Result<Vec<PathBuf>> {
        if !self.fs.is_dir(target) {
            debug!("creating directory {}", target.display());
            self.fs
                .create_dir(target)
                .map_err(|e| error::fs::write_failed(target, &e))?;
        }

        let children =
            visible_entries(self.fs, source).map_err(|e| error::fs::read_failed(source, &e))?;

        let mut files = Vec::new();
        for child in children {
            files.extend(self.clone_tree(&child, source, target, rewrite)?);
        }
        Ok(files)
    }

    fn clone_file(&self, source: &Path, target: &Path, rewrite: bool) -> Result<()> {
        if rewrite {
            debug!("creating file {}", target.display());
            let content = self
                .fs
                .read_to_string(source)
                .map_err(|e| error::fs::read_failed(source, &e))?;
            self.fs
                .write(target, substitute(&content, self.ctx).as_bytes())
                .map_err(|e| error::fs::write_failed(target, &e))
        } else {
            debug!("copying file to {}", target.display());
            self.fs
                .copy_file(source, target)
                .map_err(|e| error::fs::write_failed(target, &e))
        }
    }
}

fn join_entry(dir: &Path, entry: &OsStr) -> PathBuf {
    if entry.is_empty() {
        dir.to_path_buf()
    } else {
        dir.join(entry)
    }
}
