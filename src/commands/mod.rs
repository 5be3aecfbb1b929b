//! Command implementations for the barclamp CLI

pub mod actions;
pub mod completions;
pub mod create;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod version;
