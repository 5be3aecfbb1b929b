//! Domain types

pub mod package;

pub use package::Package;
