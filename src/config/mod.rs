//! Configuration handling for the barclamp installer
//!
//! This module contains:
//! - `crowbar.yml` - the package manifest
//! - [`Settings`] - per-invocation host paths and toggles

pub mod manifest;
pub mod settings;

// Re-export commonly used types
pub use manifest::{Layout, Manifest};
pub use settings::Settings;
