//! Locator resolution: base table plus an ordered chain of diffs.
//!
//! Diffs describe what changed arriving at their version. Going up from the
//! base applies every diff in `(base, target]` oldest first. Going down applies
//! every diff in `[target, base)` newest first, so the diff nearest the target
//! is the last one written. Pre-release suffixes are dropped before any
//! comparison.

use crate::diff::LocatorDiff;
use crate::result::LocatorResult;
use crate::table::LocatorTable;
use crate::version::Version;
use std::fmt;
use tracing::{debug, info};

/// Which way the chain runs from the base version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Target equals the base; no diffs apply
    Identity,
    /// Target is newer than the base
    Upgrade,
    /// Target is older than the base
    Downgrade,
}

impl Direction {
    /// Direction from `base` to `target`
    #[must_use]
    pub fn between(base: Version, target: Version) -> Self {
        match base.cmp(&target) {
            std::cmp::Ordering::Equal => Self::Identity,
            std::cmp::Ordering::Less => Self::Upgrade,
            std::cmp::Ordering::Greater => Self::Downgrade,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identity => "identity",
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
        };
        f.write_str(name)
    }
}

/// Outcome of a resolution, with the chain that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Version string as requested
    pub requested: String,
    /// Numeric version resolved against
    pub version: Version,
    /// Chain direction
    pub direction: Direction,
    /// Diff versions in the order they were applied
    pub applied: Vec<Version>,
    /// The resolved table
    pub table: LocatorTable,
}

/// Pick and order the diffs that lead from `base` to `target`
#[must_use]
pub fn select_diffs(target: Version, base: Version, diffs: &[LocatorDiff]) -> Vec<&LocatorDiff> {
    let mut chain: Vec<&LocatorDiff> = match Direction::between(base, target) {
        Direction::Identity => Vec::new(),
        Direction::Upgrade => diffs
            .iter()
            .filter(|d| base < d.version && d.version <= target)
            .collect(),
        Direction::Downgrade => diffs
            .iter()
            .filter(|d| target <= d.version && d.version < base)
            .collect(),
    };
    match Direction::between(base, target) {
        Direction::Downgrade => chain.sort_by(|a, b| b.version.cmp(&a.version)),
        _ => chain.sort_by(|a, b| a.version.cmp(&b.version)),
    }
    chain
}

/// Resolve the table for `target` and report the chain used
pub fn resolve_detailed(
    target: &str,
    base_version: &str,
    base: &LocatorTable,
    diffs: &[LocatorDiff],
) -> LocatorResult<Resolution> {
    let version = Version::parse(target)?;
    let base_parsed = Version::parse(base_version)?;
    let direction = Direction::between(base_parsed, version);

    if direction == Direction::Identity {
        debug!(requested = target, base = base_version, "Locator resolution is identity");
        return Ok(Resolution {
            requested: target.to_string(),
            version,
            direction,
            applied: Vec::new(),
            table: base.clone(),
        });
    }

    let chain = select_diffs(version, base_parsed, diffs);
    let mut table = base.clone();
    for diff in &chain {
        debug!(diff = %diff.version, paths = diff.paths().len(), "Applying locator diff");
        table.apply(&diff.overlay, &diff.extras);
    }
    let applied: Vec<Version> = chain.iter().map(|d| d.version).collect();

    info!(
        requested = target,
        base = base_version,
        %direction,
        applied = applied.len(),
        "Resolved locator table"
    );

    Ok(Resolution {
        requested: target.to_string(),
        version,
        direction,
        applied,
        table,
    })
}

/// Resolve the table for `target`
pub fn resolve(
    target: &str,
    base_version: &str,
    base: &LocatorTable,
    diffs: &[LocatorDiff],
) -> LocatorResult<LocatorTable> {
    resolve_detailed(target, base_version, base, diffs).map(|resolution| resolution.table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::LocatorSchema;
    use crate::table::LocatorNode;
    use serde_json::{json, Map};

    fn schema() -> LocatorSchema {
        LocatorSchema::from_yaml("Panel:\n  header: selector\n  title: selector\n", "inline")
            .unwrap()
    }

    fn base() -> LocatorTable {
        let schema = schema();
        let value = json!({"Panel": {"header": {"class_name": "h0"}, "title": {"tag": "h2"}}});
        LocatorTable::from_node(LocatorNode::from_value(&value, &schema).unwrap(), &schema)
            .unwrap()
    }

    fn diff(version: &str, header: &str) -> LocatorDiff {
        let value = json!({"Panel": {"header": {"class_name": header}}});
        let overlay = LocatorNode::from_value(&value, &schema()).unwrap();
        LocatorDiff::new(version, overlay, Map::new()).unwrap()
    }

    fn header(table: &LocatorTable) -> String {
        table.selector("Panel.header").unwrap().to_string()
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_upgrade_is_ascending_and_inclusive() {
            let diffs = vec![diff("1.3.0", "c"), diff("1.1.0", "a"), diff("1.2.0", "b")];
            let chain = select_diffs(Version::new(1, 2, 0), Version::new(1, 0, 0), &diffs);
            let versions: Vec<_> = chain.iter().map(|d| d.version.to_string()).collect();
            assert_eq!(versions, vec!["1.1.0", "1.2.0"]);
        }

        #[test]
        fn test_downgrade_is_descending_and_includes_target() {
            let diffs = vec![diff("1.1.0", "a"), diff("1.3.0", "c"), diff("1.2.0", "b")];
            let chain = select_diffs(Version::new(1, 2, 0), Version::new(1, 4, 0), &diffs);
            let versions: Vec<_> = chain.iter().map(|d| d.version.to_string()).collect();
            assert_eq!(versions, vec!["1.3.0", "1.2.0"]);
        }

        #[test]
        fn test_base_diff_never_selected() {
            let diffs = vec![diff("1.0.0", "self")];
            assert!(select_diffs(Version::new(1, 5, 0), Version::new(1, 0, 0), &diffs).is_empty());
            assert!(select_diffs(Version::new(0, 5, 0), Version::new(1, 0, 0), &diffs).is_empty());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_identity_returns_base() {
            let resolution = resolve_detailed("1.0.0", "1.0.0", &base(), &[diff("1.1.0", "a")]).unwrap();
            assert_eq!(resolution.direction, Direction::Identity);
            assert!(resolution.applied.is_empty());
            assert_eq!(resolution.table, base());
        }

        #[test]
        fn test_later_diff_wins() {
            let diffs = vec![diff("1.2.0", "b"), diff("1.1.0", "a")];
            let table = resolve("1.5.0", "1.0.0", &base(), &diffs).unwrap();
            assert_eq!(header(&table), "class=b");
            assert_eq!(table.selector("Panel.title").unwrap().to_string(), "tag=h2");
        }

        #[test]
        fn test_no_diffs_is_not_an_error() {
            let table = resolve("2.0.0", "1.0.0", &base(), &[]).unwrap();
            assert_eq!(table, base());
        }

        #[test]
        fn test_downgrade_lands_on_nearest_diff() {
            let diffs = vec![diff("1.1.0", "a"), diff("1.3.0", "c")];
            let resolution = resolve_detailed("1.2.0", "1.4.0", &base(), &diffs).unwrap();
            assert_eq!(resolution.direction, Direction::Downgrade);
            assert_eq!(resolution.applied, vec![Version::new(1, 3, 0)]);
            assert_eq!(header(&resolution.table), "class=c");
        }

        #[test]
        fn test_insider_matches_stable() {
            let diffs = vec![diff("1.1.0", "a"), diff("1.2.0", "b")];
            let insider = resolve_detailed("1.2.0-insider", "1.0.0", &base(), &diffs).unwrap();
            let stable = resolve_detailed("1.2.0", "1.0.0", &base(), &diffs).unwrap();
            assert_eq!(insider.applied, stable.applied);
            assert_eq!(insider.table, stable.table);
        }

        #[test]
        fn test_invalid_target() {
            assert!(resolve("latest", "1.0.0", &base(), &[]).is_err());
        }
    }
}
