//! File system capability used by every component that touches the host tree
//!
//! All disk access goes through [`FileSystem`] so that the cloner, the
//! permission normalizer and the action runner can be exercised against a
//! temporary tree, and so the on-disk layout stays the only contract with
//! the hook scripts.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use walkdir::WalkDir;

/// Leading byte that marks an entry as hidden
pub const HIDDEN_MARKER: u8 = b'.';

/// Whether an entry name is hidden and therefore never cloned, chmodded or run
///
/// Names are raw bytes on disk and need not be valid UTF-8.
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&HIDDEN_MARKER)
}

/// Disk operations needed by the installer
pub trait FileSystem {
    /// Whether the path exists (following symlinks)
    fn exists(&self, path: &Path) -> bool;

    /// Whether the path is a directory (following symlinks)
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the path itself is a symbolic link
    fn is_symlink(&self, path: &Path) -> bool;

    /// Names of all entries directly inside `path`, sorted by byte order
    fn entries(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Create a single directory; the parent must exist
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy a file byte for byte, overwriting the target
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write `contents` to `path`, truncating any existing file
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Set the permission bits of a single entry
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Set the permission bits of `path` and everything below it
    fn set_mode_recursive(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Create `link` pointing at `original`
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()>;
}

/// Non-hidden entry names directly inside `path`, sorted by byte order
pub fn visible_entries(fs: &dyn FileSystem, path: &Path) -> io::Result<Vec<OsString>> {
    Ok(fs
        .entries(path)?
        .into_iter()
        .filter(|name| !is_hidden(name))
        .collect())
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn entries(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name());
        }
        names.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        Ok(names)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    fn set_mode_recursive(&self, path: &Path, mode: u32) -> io::Result<()> {
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(io::Error::other)?;
            // chmod on a link would change its target, which may live outside the tree
            if entry.path_is_symlink() {
                continue;
            }
            self.set_mode(entry.path(), mode)?;
        }
        Ok(())
    }

    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(original, link)
    }
}
