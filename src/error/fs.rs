//! File system errors

use std::path::Path;

use super::BarclampError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> BarclampError {
    BarclampError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read error from an I/O failure
pub fn read_failed(path: &Path, e: &std::io::Error) -> BarclampError {
    BarclampError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a file write error from an I/O failure
pub fn write_failed(path: &Path, e: &std::io::Error) -> BarclampError {
    BarclampError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a permission change error from an I/O failure
pub fn permission_failed(path: &Path, e: &std::io::Error) -> BarclampError {
    BarclampError::PermissionFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a symlink error from an I/O failure
pub fn symlink_failed(link: &Path, e: &std::io::Error) -> BarclampError {
    BarclampError::SymlinkFailed {
        link: link.display().to_string(),
        reason: e.to_string(),
    }
}
