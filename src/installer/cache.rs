//! Boot-file cache installation
//!
//! A package may carry a `cache/` directory:
//!
//! ```text
//! cache/
//! ├── files/              # copied to <tftpboot>/files
//! ├── gems/*.gem          # linked into <tftpboot>/gemsite/gems/
//! └── <os>/pkgs/          # linked as <tftpboot>/<os>/crowbar-extra/<package dir>
//! ```

use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::fs::{FileSystem, visible_entries};
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, Result};

use super::cloner::TreeCloner;
use super::substitute::{DEFAULT_ENTITY, SubstitutionContext};

const CACHE_DIR: &str = "cache";

/// Install the package's cache into the boot-file tree
pub fn install_cache(fs: &dyn FileSystem, settings: &Settings, package: &Package) -> Result<()> {
    let cache = package.path.join(CACHE_DIR);
    if !fs.is_dir(&cache) {
        return Ok(());
    }
    let tftpboot = settings.tftpboot_path();

    for entry in visible_entries(fs, &cache).map_err(|e| error::fs::read_failed(&cache, &e))? {
        let source = cache.join(&entry);
        if entry == "files" {
            debug!("copying cached files into {}", tftpboot.display());
            create_dir_all(fs, &tftpboot)?;
            let ctx = SubstitutionContext::now(package.name.as_str(), DEFAULT_ENTITY);
            TreeCloner::new(fs, &ctx).clone_tree(&entry, &cache, &tftpboot, false)?;
        } else if entry == "gems" {
            link_gems(fs, &source, &tftpboot.join("gemsite").join("gems"))?;
        } else if fs.is_dir(&source.join("pkgs")) {
            let extra = tftpboot.join(&entry).join("crowbar-extra");
            create_dir_all(fs, &extra)?;
            link(fs, &source.join("pkgs"), &extra.join(package.dir_name()))?;
        }
    }
    Ok(())
}

fn link_gems(fs: &dyn FileSystem, gems: &Path, target: &Path) -> Result<()> {
    let names = visible_entries(fs, gems).map_err(|e| error::fs::read_failed(gems, &e))?;
    for gem in names.iter().filter(|name| name.as_bytes().ends_with(b".gem")) {
        create_dir_all(fs, target)?;
        link(fs, &gems.join(gem), &target.join(gem))?;
    }
    Ok(())
}

fn link(fs: &dyn FileSystem, original: &Path, link: &Path) -> Result<()> {
    if fs.is_symlink(link) {
        warn!("{} already linked, leaving it in place", link.display());
        return Ok(());
    }
    debug!("linking {} to {}", link.display(), original.display());
    fs.symlink(original, link)
        .map_err(|e| error::fs::symlink_failed(link, &e))
}

fn create_dir_all(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    fs.create_dir_all(path)
        .map_err(|e| error::fs::write_failed(path, &e))
}
