//! Package installation building blocks
//!
//! This module handles:
//! - Cloning package subtrees into the host tree, with optional placeholder rewriting
//! - Restoring framework permissions after a clone
//! - Merging stylesheet imports into the shared `application.sass`
//! - Staging and running lifecycle actions
//! - Engine mounts, schema migration and boot-file caches
//! - Recording what was installed

pub mod actions;
pub mod cache;
pub mod cloner;
pub mod engine;
pub mod filelist;
pub mod merge;
pub mod permissions;
pub mod registry;
pub mod schema;
pub mod substitute;

pub use actions::{ActionRunner, CommandRunner, Stage, SystemCommandRunner};
pub use cloner::TreeCloner;
pub use merge::MergeDirection;
pub use substitute::SubstitutionContext;
