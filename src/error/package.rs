//! Package and manifest errors

use super::BarclampError;

/// Creates a package not found error
pub fn not_found(path: impl Into<String>) -> BarclampError {
    BarclampError::PackageNotFound { path: path.into() }
}

/// Creates a manifest not found error
pub fn manifest_not_found(path: impl Into<String>) -> BarclampError {
    BarclampError::ManifestNotFound { path: path.into() }
}

/// Creates a manifest parse failed error
pub fn manifest_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BarclampError {
    BarclampError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an unknown layout error
pub fn unknown_layout(name: impl Into<String>, layout: impl Into<String>) -> BarclampError {
    BarclampError::UnknownLayout {
        name: name.into(),
        layout: layout.into(),
    }
}
