//! Proposal schema migration for packages written against schema version 1

use std::path::PathBuf;

use tracing::debug;

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::domain::Package;
use crate::error::{self, Result};

/// First schema version that carries the status keys itself
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

/// The new keys go right before lines mentioning this key
const ANCHOR_KEY: &str = "crowbar-committing";

const STATUS_KEYS: [&str; 2] = [
    "  \"crowbar-status\": { \"type\": \"str\" },\n",
    "  \"crowbar-failed\": { \"type\": \"str\" },\n",
];

/// Installed proposal schema of a package
pub fn schema_path(settings: &Settings, name: &str) -> PathBuf {
    settings
        .base_path()
        .join("chef")
        .join("data_bags")
        .join("crowbar")
        .join(format!("bc-template-{name}.schema"))
}

/// Add the status keys before each anchor line; `None` when already migrated
pub fn add_status_keys(content: &str) -> Option<String> {
    if content.contains("crowbar-status") {
        return None;
    }
    let mut migrated = String::with_capacity(content.len() + 128);
    for line in content.split_inclusive('\n') {
        if line.contains(ANCHOR_KEY) {
            STATUS_KEYS.iter().for_each(|key| migrated.push_str(key));
        }
        migrated.push_str(line);
    }
    Some(migrated)
}

/// Migrate the installed schema when the package predates schema version 2
pub fn migrate_schema(fs: &dyn FileSystem, settings: &Settings, package: &Package) -> Result<()> {
    if package.manifest.proposal_schema_version() >= CURRENT_SCHEMA_VERSION {
        return Ok(());
    }
    let path = schema_path(settings, &package.name);
    if !fs.exists(&path) {
        return Ok(());
    }

    let content = fs
        .read_to_string(&path)
        .map_err(|e| error::fs::read_failed(&path, &e))?;
    if let Some(migrated) = add_status_keys(&content) {
        fs.write(&path, migrated.as_bytes())
            .map_err(|e| error::fs::write_failed(&path, &e))?;
        debug!("migrated proposal schema {}", path.display());
    }
    Ok(())
}
