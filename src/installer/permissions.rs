//! Permission normalization after cloning

use std::path::Path;

use tracing::{debug, warn};

use crate::common::fs::{FileSystem, visible_entries};
use crate::config::Settings;
use crate::error::{self, Result};

/// Mode for directories and executables
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Mode for plain files
pub const FILE_MODE: u32 = 0o644;

/// Set `mode` on every non-hidden entry directly inside `path`
///
/// Entries that vanish before the chmod, or whose chmod fails, are reported
/// as warnings and the remaining siblings are still processed. Only failing
/// to list `path` itself is an error. Never recurses.
pub fn normalize(fs: &dyn FileSystem, mode: u32, path: &Path) -> Result<()> {
    let entries = visible_entries(fs, path).map_err(|e| error::fs::read_failed(path, &e))?;
    for name in entries {
        let entry = path.join(&name);
        if !fs.exists(&entry) {
            warn!(
                "missing file {} for chmod {:o} operation",
                entry.display(),
                mode
            );
            continue;
        }
        match fs.set_mode(&entry, mode) {
            Ok(()) => debug!("chmod 0{:o} for {}", mode, entry.display()),
            Err(e) => warn!("chmod 0{:o} failed for {}: {}", mode, entry.display(), e),
        }
    }
    Ok(())
}

/// Set `mode` on a single path
pub fn chmod(fs: &dyn FileSystem, mode: u32, path: &Path) -> Result<()> {
    fs.set_mode(path, mode)
        .map_err(|e| error::fs::permission_failed(path, &e))
}

/// Set `mode` on a path and everything below it
pub fn chmod_recursive(fs: &dyn FileSystem, mode: u32, path: &Path) -> Result<()> {
    fs.set_mode_recursive(path, mode)
        .map_err(|e| error::fs::permission_failed(path, &e))
}

/// Restore the framework's writable directories after cloning into it
///
/// `db` and `tmp` get 0755 with their immediate entries at 0644, except
/// `db/migrate` which stays traversable.
pub fn framework_permissions(fs: &dyn FileSystem, settings: &Settings) -> Result<()> {
    let crowbar_path = settings.crowbar_path();

    let db = crowbar_path.join("db");
    if fs.exists(&db) {
        chmod(fs, EXECUTABLE_MODE, &db)?;
        normalize(fs, FILE_MODE, &db)?;
        let migrate = db.join("migrate");
        if fs.exists(&migrate) {
            chmod(fs, EXECUTABLE_MODE, &migrate)?;
        } else {
            warn!("missing directory {} for chmod", migrate.display());
        }
    }

    let tmp = crowbar_path.join("tmp");
    if fs.exists(&tmp) {
        chmod(fs, EXECUTABLE_MODE, &tmp)?;
        normalize(fs, FILE_MODE, &tmp)?;
    }

    debug!("normalized framework permissions under {}", crowbar_path.display());
    Ok(())
}
