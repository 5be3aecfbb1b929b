//! Persisted clone manifest
//!
//! Every file written during install is recorded, one absolute path per
//! line, in `<barclamp_path>/<name>-filelist.txt`. Uninstall reads it back.
//! Paths are stored as their raw bytes.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::fs::FileSystem;
use crate::config::Settings;
use crate::error::{self, Result};

/// Write the file list for `name`, replacing any previous one
pub fn write(fs: &dyn FileSystem, settings: &Settings, name: &str, files: &[PathBuf]) -> Result<PathBuf> {
    let path = settings.filelist_path(name);
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)
            .map_err(|e| error::fs::write_failed(parent, &e))?;
    }
    let mut content = Vec::new();
    for file in files {
        content.extend_from_slice(file.as_os_str().as_bytes());
        content.push(b'\n');
    }
    fs.write(&path, &content)
        .map_err(|e| error::fs::write_failed(&path, &e))?;
    debug!("recorded {} files in {}", files.len(), path.display());
    Ok(path)
}

/// Paths recorded for `name`; empty when no list was ever written
pub fn read(fs: &dyn FileSystem, settings: &Settings, name: &str) -> Result<Vec<PathBuf>> {
    let path = settings.filelist_path(name);
    if !fs.exists(&path) {
        return Ok(Vec::new());
    }
    let content = fs
        .read(&path)
        .map_err(|e| error::fs::read_failed(&path, &e))?;
    Ok(parse(&content))
}

/// One path per line; only a trailing `\r` is dropped, other whitespace is part of the path
fn parse(content: &[u8]) -> Vec<PathBuf> {
    content
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| PathBuf::from(OsStr::from_bytes(line)))
        .collect()
}

/// Names of packages with a recorded file list, sorted
pub fn installed(fs: &dyn FileSystem, settings: &Settings) -> Result<Vec<String>> {
    let dir = settings.barclamp_path();
    if !fs.is_dir(&dir) {
        return Ok(Vec::new());
    }
    let names = fs
        .entries(&dir)
        .map_err(|e| error::fs::read_failed(&dir, &e))?;
    Ok(names
        .iter()
        .filter_map(|name| name.to_str())
        .filter_map(|name| name.strip_suffix("-filelist.txt"))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Remove the file list for `name` if present
pub fn remove(fs: &dyn FileSystem, settings: &Settings, name: &str) -> Result<()> {
    let path = settings.filelist_path(name);
    remove_if_exists(fs, &path)
}

pub(crate) fn remove_if_exists(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if fs.exists(path) {
        fs.remove_file(path)
            .map_err(|e| error::fs::write_failed(path, &e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fs::StdFileSystem;
    use crate::test_fixtures::create_host;

    #[test]
    fn test_written_list_reads_back_in_order() {
        let (_temp, settings) = create_host();
        let files = vec![
            settings.base_dir.join("bin/dns-tool"),
            settings.base_dir.join("chef/cookbooks/dns/recipes/default.rb"),
            settings.base_dir.join("bin/dns-tool"),
        ];

        let path = write(&StdFileSystem, &settings, "dns", &files).unwrap();

        assert_eq!(path, settings.filelist_path("dns"));
        assert_eq!(read(&StdFileSystem, &settings, "dns").unwrap(), files);
        assert_eq!(installed(&StdFileSystem, &settings).unwrap(), vec!["dns"]);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let (_temp, settings) = create_host();
        assert!(read(&StdFileSystem, &settings, "dns").unwrap().is_empty());
        assert!(installed(&StdFileSystem, &settings).unwrap().is_empty());
    }

    #[test]
    fn test_remove() {
        let (_temp, settings) = create_host();
        write(&StdFileSystem, &settings, "dns", &[]).unwrap();

        remove(&StdFileSystem, &settings, "dns").unwrap();
        remove(&StdFileSystem, &settings, "dns").unwrap();

        assert!(!settings.filelist_path("dns").exists());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        assert_eq!(parse(b"/a\n\n/b\r\n"), vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    }

    #[test]
    fn test_parse_keeps_trailing_whitespace() {
        assert_eq!(
            parse(b"/srv/notes \n/srv/tab\t\r\n"),
            vec![PathBuf::from("/srv/notes "), PathBuf::from("/srv/tab\t")]
        );
    }

    #[test]
    fn test_non_utf8_and_padded_paths_round_trip() {
        let (_temp, settings) = create_host();
        let raw = settings
            .base_dir
            .join(OsStr::from_bytes(b"tftpboot/caf\xe9.txt"));
        let padded = settings.base_dir.join("doc/readme ");
        let files = vec![raw, padded];

        write(&StdFileSystem, &settings, "dns", &files).unwrap();

        assert_eq!(read(&StdFileSystem, &settings, "dns").unwrap(), files);
    }
}
