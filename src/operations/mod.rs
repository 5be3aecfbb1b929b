//! Operations module for installing and removing barclamps
//!
//! This module provides high-level operations that coordinate:
//! - InstallOperation: Complete installation workflow
//! - UninstallOperation: Reverse an installation from its file list
//! - CreateOperation: Generate a package skeleton from the model
//! - ListOperation: List installed packages
//!
//! Each operation borrows the file system, the host settings and, where
//! actions run, the command runner.

pub mod create;
pub mod install;
pub mod list;
pub mod uninstall;

pub use create::{CreateOperation, CreateOptions};
pub use install::InstallOperation;
pub use list::ListOperation;
pub use uninstall::UninstallOperation;
