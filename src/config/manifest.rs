//! Package manifest (crowbar.yml)
//!
//! Only the keys the installer acts on are modelled; everything else in the
//! document is ignored.
//!
//! ```yaml
//! barclamp:
//!   name: network
//! crowbar:
//!   layout: 2
//!   proposal_schema_version: 2
//! application_sass:
//!   add: top
//!   remove:
//!     - "@import legacy_network"
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::common::fs::FileSystem;
use crate::error::{self, Result};

/// Manifest filename at the root of every package
pub const MANIFEST_FILE: &str = "crowbar.yml";

/// Parsed `crowbar.yml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub barclamp: BarclampSection,

    #[serde(default)]
    pub crowbar: CrowbarSection,

    /// Directive for the shared stylesheet
    #[serde(default)]
    pub application_sass: Option<StylesheetDirective>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarclampSection {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrowbarSection {
    /// Layout version tag; YAML may carry it as a number or a string
    #[serde(default, deserialize_with = "scalar_string")]
    pub layout: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub proposal_schema_version: Option<String>,
}

/// `application_sass` directive
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesheetDirective {
    /// `top` inserts after the sentinel line; anything else appends
    #[serde(default)]
    pub add: Option<String>,

    /// Literal lines the package takes out of the stylesheet while installed
    #[serde(default)]
    pub remove: Option<Vec<String>>,
}

/// Package layout versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Crowbar 1.x format, no longer installable
    Legacy,
    /// Transitional 1.9 format
    Transitional,
    /// Crowbar 2 format
    Current,
}

impl Manifest {
    /// Read and parse `<package_path>/crowbar.yml`
    pub fn load(fs: &dyn FileSystem, package_path: &Path) -> Result<Self> {
        let path = package_path.join(MANIFEST_FILE);
        if !fs.exists(&path) {
            return Err(error::package::manifest_not_found(
                path.display().to_string(),
            ));
        }
        let content = fs
            .read_to_string(&path)
            .map_err(|e| error::fs::read_failed(&path, &e))?;
        Self::parse(&content).map_err(|e| match e {
            error::BarclampError::ManifestParseFailed { reason, .. } => {
                error::package::manifest_parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Option<Self> = serde_yaml::from_str(content)?;
        Ok(manifest.unwrap_or_default())
    }

    /// Classify the layout tag, rejecting unsupported and unknown versions
    pub fn layout(&self, name: &str) -> Result<Layout> {
        match self.crowbar.layout.as_deref().unwrap_or_default() {
            "1" => Err(error::BarclampError::UnsupportedLayout {
                name: name.to_string(),
            }),
            "1.9" => Ok(Layout::Transitional),
            "2" => Ok(Layout::Current),
            other => Err(error::package::unknown_layout(name, other)),
        }
    }

    /// Layout as an integer, for messages only (`1.9` reads as 1)
    pub fn layout_number(&self) -> i64 {
        self.crowbar.layout.as_deref().map_or(2, leading_integer)
    }

    /// Proposal schema version; a missing value counts as 0
    pub fn proposal_schema_version(&self) -> i64 {
        self.crowbar
            .proposal_schema_version
            .as_deref()
            .map_or(0, leading_integer)
    }

    /// Files named `remove` in the stylesheet directive
    pub fn stylesheet_removals(&self) -> &[String] {
        self.application_sass
            .as_ref()
            .and_then(|directive| directive.remove.as_deref())
            .unwrap_or_default()
    }

    /// Whether the directive asks for insertion at the top of the import list
    pub fn stylesheet_at_top(&self) -> bool {
        self.application_sass
            .as_ref()
            .and_then(|directive| directive.add.as_deref())
            == Some("top")
    }
}

/// Leading decimal integer of a string; `"1.9"` is 1 and `"abc"` is 0
fn leading_integer(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected a scalar value")),
    }
}
