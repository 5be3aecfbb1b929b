//! Framework registry of installed packages
//!
//! The framework reads installed manifests from `<registry>/<name>.yml` and
//! proposal templates and schemas from `templates/` and `schemas/` beside it.
//! The catalog mirrors every registered manifest as JSON under `bc_meta/`,
//! tagged with the package id.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::config::manifest::MANIFEST_FILE;
use crate::domain::Package;
use crate::error::{self, Result};

use super::filelist::remove_if_exists;

/// Catalog directory inside the registry
const CATALOG_DIR: &str = "bc_meta";

/// Registered manifest of `name`
pub fn manifest_path(settings: &Settings, name: &str) -> PathBuf {
    settings.registry_path().join(format!("{name}.yml"))
}

/// Copy the package's manifest, proposal templates and schema into the registry
pub fn register(fs: &dyn FileSystem, settings: &Settings, package: &Package) -> Result<()> {
    let registry = settings.registry_path();
    let templates = registry.join("templates");
    let schemas = registry.join("schemas");
    for dir in [&registry, &templates, &schemas] {
        fs.create_dir_all(dir)
            .map_err(|e| error::fs::write_failed(dir, &e))?;
    }

    copy(
        fs,
        &package.path.join(MANIFEST_FILE),
        &manifest_path(settings, &package.name),
    )?;

    let data_bag = package
        .path
        .join("chef")
        .join("data_bags")
        .join("crowbar");
    let name = &package.name;
    for (file, target) in [
        (format!("bc-template-{name}.json"), &templates),
        (format!("bc-template-{name}.schema"), &schemas),
        (format!("bc-template-{name}-new.json"), &templates),
    ] {
        let source = data_bag.join(&file);
        if fs.exists(&source) {
            copy(fs, &source, &target.join(&file))?;
        }
    }
    Ok(())
}

/// Regenerate `bc_meta/<file>.json` for every registered manifest
///
/// Returns the catalog entries written.
pub fn catalog(fs: &dyn FileSystem, settings: &Settings) -> Result<Vec<PathBuf>> {
    let registry = settings.registry_path();
    if !fs.is_dir(&registry) {
        return Ok(Vec::new());
    }
    let meta = registry.join(CATALOG_DIR);
    let names = fs
        .entries(&registry)
        .map_err(|e| error::fs::read_failed(&registry, &e))?;

    let mut written = Vec::new();
    let manifests = names
        .iter()
        .filter_map(|name| name.to_str())
        .filter(|name| name.ends_with(".yml"));
    for file in manifests {
        fs.create_dir_all(&meta)
            .map_err(|e| error::fs::write_failed(&meta, &e))?;
        let source = registry.join(file);
        let content = fs
            .read_to_string(&source)
            .map_err(|e| error::fs::read_failed(&source, &e))?;
        let document: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
            error::package::manifest_parse_failed(source.display().to_string(), e.to_string())
        })?;

        let mut entry = match serde_json::to_value(document)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let id = file.split('.').next().unwrap_or_default();
        entry.insert("id".to_string(), serde_json::Value::String(id.to_string()));

        let target = meta.join(format!("{file}.json"));
        let json = serde_json::to_string_pretty(&serde_json::Value::Object(entry))?;
        fs.write(&target, format!("{json}\n").as_bytes())
            .map_err(|e| error::fs::write_failed(&target, &e))?;
        debug!("cataloged {}", target.display());
        written.push(target);
    }
    Ok(written)
}

/// Forget the registered manifest of `name` and its catalog entry
pub fn unregister(fs: &dyn FileSystem, settings: &Settings, name: &str) -> Result<()> {
    let catalog_entry = settings
        .registry_path()
        .join(CATALOG_DIR)
        .join(format!("{name}.yml.json"));
    remove_if_exists(fs, &catalog_entry)?;
    remove_if_exists(fs, &manifest_path(settings, name))
}

fn copy(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<()> {
    debug!("registering {}", to.display());
    fs.copy_file(from, to)
        .map_err(|e| error::fs::write_failed(to, &e))
}
