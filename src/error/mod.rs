//! Error types and handling for the barclamp installer
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`package`]: Package and manifest errors
//! - [`action`]: Lifecycle action errors
//! - [`fs`]: File system errors

pub mod action;
pub mod fs;
pub mod package;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for barclamp operations
#[derive(Error, Diagnostic, Debug)]
pub enum BarclampError {
    // Package errors
    #[error("Package source not found: {path}")]
    #[diagnostic(
        code(barclamp::package::not_found),
        help("Pass the path of an unpacked barclamp directory")
    )]
    PackageNotFound { path: String },

    #[error("Manifest not found: {path}")]
    #[diagnostic(
        code(barclamp::package::manifest_not_found),
        help("Every barclamp carries a crowbar.yml at its root")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest {path}: {reason}")]
    #[diagnostic(code(barclamp::package::manifest_parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Crowbar 1.x barclamp formats ({name}) are not supported")]
    #[diagnostic(
        code(barclamp::package::unsupported_layout),
        help("Convert the barclamp to layout 1.9 or 2")
    )]
    UnsupportedLayout { name: String },

    #[error("Could not install barclamp {name} because layout '{layout}' is unknown")]
    #[diagnostic(code(barclamp::package::unknown_layout))]
    UnknownLayout { name: String, layout: String },

    #[error("Barclamp model not found: {path}")]
    #[diagnostic(
        code(barclamp::package::model_not_found),
        help("Set CROWBAR_DIR to a Crowbar checkout or install the crowbar barclamp first")
    )]
    ModelNotFound { path: String },

    // Lifecycle action errors
    #[error("Unknown barclamp lifecycle stage: {stage}")]
    #[diagnostic(
        code(barclamp::action::unknown_stage),
        help("Valid stages: install, remove")
    )]
    UnknownStage { stage: String },

    #[error("Action {action} not found for {package}")]
    #[diagnostic(code(barclamp::action::not_found))]
    ActionNotFound { action: String, package: String },

    #[error("Action {action} failed for {package}{log_hint}:\n {output}")]
    #[diagnostic(code(barclamp::action::failed))]
    ActionFailed {
        action: String,
        package: String,
        output: String,
        log_hint: String,
    },

    #[error("Failed to execute action {action}: {reason}")]
    #[diagnostic(code(barclamp::action::spawn_failed))]
    ActionSpawnFailed { action: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(barclamp::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {reason}")]
    #[diagnostic(code(barclamp::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(barclamp::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to change permissions of {path}: {reason}")]
    #[diagnostic(code(barclamp::fs::permission_failed))]
    PermissionFailed { path: String, reason: String },

    #[error("Failed to link {link}: {reason}")]
    #[diagnostic(code(barclamp::fs::symlink_failed))]
    SymlinkFailed { link: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(barclamp::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(barclamp::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(barclamp::cancelled))]
    Cancelled,
}

impl From<std::io::Error> for BarclampError {
    fn from(err: std::io::Error) -> Self {
        BarclampError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BarclampError {
    fn from(err: serde_yaml::Error) -> Self {
        BarclampError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BarclampError {
    fn from(err: serde_json::Error) -> Self {
        BarclampError::ConfigInvalid {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for BarclampError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => BarclampError::Cancelled,
            other => BarclampError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BarclampError>;
