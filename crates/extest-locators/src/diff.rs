//! Locator diffs: sparse overlays tied to one application version.
//!
//! A diff file records what changed arriving at its version:
//!
//! ```yaml
//! version: "1.41.0"
//! locators:
//!   ViewSection:
//!     header: {class_name: pane-header}
//! extras:
//!   someFlag: true
//! ```

use crate::result::{LocatorError, LocatorResult};
use crate::schema::LocatorSchema;
use crate::table::LocatorNode;
use crate::version::Version;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiffDocument {
    version: Value,
    #[serde(default)]
    locators: Value,
    #[serde(default)]
    extras: Map<String, Value>,
}

/// A validated sparse overlay for one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorDiff {
    /// Parsed version the diff arrives at
    pub version: Version,
    /// Version as written in the file
    pub raw_version: String,
    /// Partial locator tree
    pub overlay: LocatorNode,
    /// Free-form values carried alongside the locators
    pub extras: Map<String, Value>,
}

impl LocatorDiff {
    /// Build a diff from an already-validated overlay
    pub fn new(
        version: &str,
        overlay: LocatorNode,
        extras: Map<String, Value>,
    ) -> LocatorResult<Self> {
        Ok(Self {
            version: Version::parse(version)?,
            raw_version: version.to_string(),
            overlay,
            extras,
        })
    }

    /// Parse and validate a diff document
    pub fn from_yaml(text: &str, origin: &str, schema: &LocatorSchema) -> LocatorResult<Self> {
        let document: DiffDocument =
            serde_yaml_ng::from_str(text).map_err(|e| LocatorError::parse(origin, e))?;
        let raw_version = match document.version {
            Value::String(version) => version,
            Value::Number(number) => number.to_string(),
            other => {
                return Err(LocatorError::parse(
                    origin,
                    format!("version must be a string, found {other}"),
                ))
            }
        };
        let overlay = LocatorNode::from_value(&document.locators, schema)?;
        Self::new(&raw_version, overlay, document.extras)
    }

    /// Dotted paths this diff changes
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.overlay
            .leaves()
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }
}
