//! Model placeholder substitution
//!
//! The barclamp model tree is written in terms of four placeholder tokens.
//! Generating a new package from the model replaces each token with a form of
//! the package name and restamps the legacy copyright line.

use chrono::Datelike;

use crate::common::string_utils::{camelize, capitalize, humanize};

/// Replaced with the package name verbatim
pub const MODEL_BASE: &str = "==BC-MODEL==";

/// Replaced with the upper camel case package name
pub const MODEL_CAMEL: &str = "==^BC-MODEL==";

/// Replaced with the human readable package name
pub const MODEL_HUMAN: &str = "==*BC-MODEL==";

/// Replaced with the capitalized package name
pub const MODEL_CAPITALIZED: &str = "==%BC-MODEL==";

/// Copyright line carried by the model files
pub const LEGACY_COPYRIGHT: &str = "Copyright 2012, Dell";

/// Owner stamped into generated packages unless another is given
pub const DEFAULT_ENTITY: &str = "Dell";

/// Values stamped into a generated package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionContext {
    /// Package identifier
    pub package: String,

    /// Owner named in the copyright line
    pub entity: String,

    /// Year stamped in the copyright line
    pub year: i32,
}

impl SubstitutionContext {
    pub fn new(package: impl Into<String>, entity: impl Into<String>, year: i32) -> Self {
        Self {
            package: package.into(),
            entity: entity.into(),
            year,
        }
    }

    /// Context stamped with the current local year
    pub fn now(package: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::new(package, entity, chrono::Local::now().year())
    }
}

/// Replace every model placeholder and the legacy copyright line in `text`
pub fn substitute(text: &str, ctx: &SubstitutionContext) -> String {
    text.replace(MODEL_BASE, &ctx.package)
        .replace(MODEL_CAMEL, &camelize(&ctx.package))
        .replace(MODEL_HUMAN, &humanize(&ctx.package))
        .replace(MODEL_CAPITALIZED, &capitalize(&ctx.package))
        .replace(
            LEGACY_COPYRIGHT,
            &format!("Copyright {}, {}", ctx.year, ctx.entity),
        )
}
