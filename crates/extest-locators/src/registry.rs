//! Locator registries: a schema, a base table and the diffs around it.
//!
//! The embedded registry is compiled into the crate. A registry can also be
//! loaded from a directory laid out like `locators/`:
//!
//! ```text
//! <dir>/<base>.yaml      complete base table (required)
//! <dir>/schema.yaml      optional, defaults to the standard schema
//! <dir>/diffs/*.yaml     zero or more diffs
//! ```

use crate::diff::LocatorDiff;
use crate::resolver::{self, Resolution};
use crate::result::{LocatorError, LocatorResult};
use crate::schema::LocatorSchema;
use crate::table::LocatorTable;
use crate::version::Version;
use std::path::Path;
use tracing::debug;

/// Version the embedded base table describes
pub const BASE_VERSION: &str = "1.37.0";

const EMBEDDED_BASE: &str = include_str!("../locators/1.37.0.yaml");

const EMBEDDED_DIFFS: &[(&str, &str)] = &[
    ("1.38.0.yaml", include_str!("../locators/diffs/1.38.0.yaml")),
    ("1.39.0.yaml", include_str!("../locators/diffs/1.39.0.yaml")),
    ("1.40.0.yaml", include_str!("../locators/diffs/1.40.0.yaml")),
    ("1.41.0.yaml", include_str!("../locators/diffs/1.41.0.yaml")),
    ("1.43.0.yaml", include_str!("../locators/diffs/1.43.0.yaml")),
    ("1.44.0.yaml", include_str!("../locators/diffs/1.44.0.yaml")),
    ("1.45.0.yaml", include_str!("../locators/diffs/1.45.0.yaml")),
    ("1.47.0.yaml", include_str!("../locators/diffs/1.47.0.yaml")),
    ("1.49.0.yaml", include_str!("../locators/diffs/1.49.0.yaml")),
    ("1.50.0.yaml", include_str!("../locators/diffs/1.50.0.yaml")),
];

/// Everything needed to resolve a locator table for any version
#[derive(Debug, Clone)]
pub struct LocatorRegistry {
    schema: LocatorSchema,
    base_version: String,
    base: LocatorTable,
    diffs: Vec<LocatorDiff>,
}

impl LocatorRegistry {
    /// Assemble a registry, rejecting two diffs for the same version
    pub fn new(
        schema: LocatorSchema,
        base_version: &str,
        base: LocatorTable,
        mut diffs: Vec<LocatorDiff>,
    ) -> LocatorResult<Self> {
        Version::parse(base_version)?;
        diffs.sort_by(|a, b| a.version.cmp(&b.version));
        if let Some(pair) = diffs.windows(2).find(|w| w[0].version == w[1].version) {
            return Err(LocatorError::DuplicateDiff {
                version: pair[1].raw_version.clone(),
            });
        }
        Ok(Self {
            schema,
            base_version: base_version.to_string(),
            base,
            diffs,
        })
    }

    /// The tables compiled into this crate
    pub fn embedded() -> LocatorResult<Self> {
        let schema = LocatorSchema::standard()?;
        let base = LocatorTable::from_yaml(EMBEDDED_BASE, "1.37.0.yaml", &schema).map_err(|e| {
            LocatorError::BaseTableUnavailable {
                version: BASE_VERSION.to_string(),
                message: e.to_string(),
            }
        })?;
        let diffs = EMBEDDED_DIFFS
            .iter()
            .map(|(origin, text)| LocatorDiff::from_yaml(text, origin, &schema))
            .collect::<LocatorResult<Vec<_>>>()?;
        Self::new(schema, BASE_VERSION, base, diffs)
    }

    /// Load a registry from a directory
    pub fn from_dir(dir: impl AsRef<Path>, base_version: &str) -> LocatorResult<Self> {
        let dir = dir.as_ref();
        let unavailable = |message: String| LocatorError::BaseTableUnavailable {
            version: base_version.to_string(),
            message,
        };

        let schema_path = dir.join("schema.yaml");
        let schema = if schema_path.is_file() {
            let text = std::fs::read_to_string(&schema_path)?;
            LocatorSchema::from_yaml(&text, &schema_path.display().to_string())?
        } else {
            LocatorSchema::standard()?
        };

        let base_name = format!("{}.yaml", Version::normalize(base_version));
        let base_path = dir.join(&base_name);
        let text = std::fs::read_to_string(&base_path)
            .map_err(|e| unavailable(format!("{}: {e}", base_path.display())))?;
        let base = LocatorTable::from_yaml(&text, &base_name, &schema)
            .map_err(|e| unavailable(e.to_string()))?;

        let mut diffs = Vec::new();
        let diff_dir = dir.join("diffs");
        if diff_dir.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&diff_dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
                    files.push(path);
                }
            }
            files.sort();
            for path in files {
                let text = std::fs::read_to_string(&path)?;
                diffs.push(LocatorDiff::from_yaml(
                    &text,
                    &path.display().to_string(),
                    &schema,
                )?);
            }
        }
        debug!(dir = %dir.display(), diffs = diffs.len(), "Loaded locator registry");

        Self::new(schema, base_version, base, diffs)
    }

    /// Resolve the table for `target`
    pub fn resolve(&self, target: &str) -> LocatorResult<LocatorTable> {
        resolver::resolve(target, &self.base_version, &self.base, &self.diffs)
    }

    /// Resolve the table for `target` and report the diff chain
    pub fn resolve_detailed(&self, target: &str) -> LocatorResult<Resolution> {
        resolver::resolve_detailed(target, &self.base_version, &self.base, &self.diffs)
    }

    /// Base version and every diff version, ascending
    pub fn supported_versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self.diffs.iter().map(|d| d.version).collect();
        if let Ok(base) = Version::parse(&self.base_version) {
            versions.push(base);
        }
        versions.sort();
        versions.dedup();
        versions
    }

    /// The schema tables are checked against
    #[must_use]
    pub fn schema(&self) -> &LocatorSchema {
        &self.schema
    }

    /// The base version string
    #[must_use]
    pub fn base_version(&self) -> &str {
        &self.base_version
    }

    /// The base table
    #[must_use]
    pub fn base(&self) -> &LocatorTable {
        &self.base
    }

    /// Diffs in ascending version order
    #[must_use]
    pub fn diffs(&self) -> &[LocatorDiff] {
        &self.diffs
    }
}
