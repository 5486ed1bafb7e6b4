//! Resolution tests against the embedded and on-disk registries.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use extest_locators::{
    resolve, select_diffs, Direction, Locator, LocatorError, LocatorRegistry, Selector, Version,
};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

const BASE_TABLE: &str = include_str!("../locators/1.37.0.yaml");

fn registry() -> LocatorRegistry {
    LocatorRegistry::embedded().expect("embedded registry loads")
}

// ============================================================================
// Identity and totality
// ============================================================================

#[test]
fn test_base_version_resolves_to_base_table() {
    let registry = registry();
    let table = registry.resolve("1.37.0").unwrap();
    assert_eq!(&table, registry.base());
    assert!(table.extras().is_empty());
}

#[test]
fn test_every_supported_version_is_total() {
    let registry = registry();
    let expected = registry.schema().fields();
    for version in registry.supported_versions() {
        let table = registry.resolve(&version.to_string()).unwrap();
        let paths = table.paths();
        assert_eq!(
            paths,
            expected.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>(),
            "paths differ at {version}"
        );
        for (path, kind) in &expected {
            assert_eq!(table.get(path).unwrap().kind(), *kind, "{path} at {version}");
        }
    }
}

#[test]
fn test_unreleased_version_uses_newest_diffs() {
    let registry = registry();
    let latest = registry.resolve("1.50.0").unwrap();
    assert_eq!(registry.resolve("1.99.3").unwrap(), latest);
}

// ============================================================================
// The 1.37.0 -> 1.42.0 scenario
// ============================================================================

#[test]
fn test_header_rename_reaches_1_42() {
    let registry = registry();
    let resolution = registry.resolve_detailed("1.42.0").unwrap();

    assert_eq!(resolution.direction, Direction::Upgrade);
    assert_eq!(
        resolution.applied,
        vec![
            Version::new(1, 38, 0),
            Version::new(1, 39, 0),
            Version::new(1, 40, 0),
            Version::new(1, 41, 0),
        ]
    );
    assert_eq!(
        resolution.table.get("ViewSection.header").unwrap(),
        &Locator::ClassName("pane-header".into())
    );
    assert_eq!(
        resolution.table.selector("Workbench.constructor").unwrap(),
        Selector::class_name("monaco-workbench")
    );
    assert_eq!(
        resolution.table.get("Workbench.constructor").unwrap(),
        registry.base().get("Workbench.constructor").unwrap()
    );
}

#[test]
fn test_before_rename_keeps_panel_header() {
    let table = registry().resolve("1.40.2").unwrap();
    assert_eq!(
        table.selector("ViewSection.header").unwrap(),
        Selector::class_name("panel-header")
    );
}

#[test]
fn test_extras_accumulate_along_chain() {
    let registry = registry();
    let at_45 = registry.resolve("1.45.0").unwrap();
    assert_eq!(at_45.extra("codicons"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(at_45.extra("settingsSearchDebounceMs"), None);

    let at_47 = registry.resolve("1.47.0").unwrap();
    assert_eq!(at_47.extra("codicons"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(
        at_47.extra("settingsSearchDebounceMs"),
        Some(&serde_json::json!(1000))
    );
}

#[test]
fn test_insider_build_resolves_like_stable() {
    let registry = registry();
    let insider = registry.resolve_detailed("1.50.0-insider").unwrap();
    let stable = registry.resolve_detailed("1.50.0").unwrap();
    assert_eq!(insider.applied, stable.applied);
    assert_eq!(insider.table, stable.table);
    assert_eq!(insider.requested, "1.50.0-insider");
}

// ============================================================================
// Downgrade
// ============================================================================

fn write_downgrade_registry() -> TempDir {
    let dir = TempDir::new().unwrap();
    let base = BASE_TABLE.replace(
        "header: {class_name: panel-header}",
        "header: {class_name: pane-header}",
    );
    fs::write(dir.path().join("1.45.0.yaml"), base).unwrap();
    fs::create_dir(dir.path().join("diffs")).unwrap();
    fs::write(
        dir.path().join("diffs/1.40.0.yaml"),
        "version: \"1.40.0\"\nlocators:\n  ViewSection:\n    header: {class_name: panel-header}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("diffs/1.43.0.yaml"),
        "version: \"1.43.0\"\nlocators:\n  ProblemsView:\n    icon: {class_name: octicon}\n",
    )
    .unwrap();
    dir
}

#[test]
fn test_downgrade_applies_diffs_between_target_and_base() {
    let dir = write_downgrade_registry();
    let registry = LocatorRegistry::from_dir(dir.path(), "1.45.0").unwrap();

    let at_41 = registry.resolve_detailed("1.41.0").unwrap();
    assert_eq!(at_41.direction, Direction::Downgrade);
    assert_eq!(at_41.applied, vec![Version::new(1, 43, 0)]);
    assert_eq!(
        at_41.table.selector("ViewSection.header").unwrap(),
        Selector::class_name("pane-header")
    );
    assert_eq!(
        at_41.table.selector("ProblemsView.icon").unwrap(),
        Selector::class_name("octicon")
    );
}

#[test]
fn test_downgrade_includes_target_diff_and_runs_newest_first() {
    let dir = write_downgrade_registry();
    let registry = LocatorRegistry::from_dir(dir.path(), "1.45.0").unwrap();

    let at_40 = registry.resolve_detailed("1.40.0").unwrap();
    assert_eq!(
        at_40.applied,
        vec![Version::new(1, 43, 0), Version::new(1, 40, 0)]
    );
    assert_eq!(
        at_40.table.selector("ViewSection.header").unwrap(),
        Selector::class_name("panel-header")
    );
}

#[test]
fn test_downgrade_from_resolved_table_is_reachable() {
    let registry = registry();
    let at_45 = registry.resolve("1.45.0").unwrap();
    let diffs = registry.diffs();

    let chain: Vec<_> = select_diffs(Version::new(1, 41, 0), Version::new(1, 45, 0), diffs)
        .iter()
        .map(|d| d.version)
        .collect();
    assert_eq!(
        chain,
        vec![
            Version::new(1, 44, 0),
            Version::new(1, 43, 0),
            Version::new(1, 41, 0)
        ]
    );
    assert!(resolve("1.41.0", "1.45.0", &at_45, diffs).is_ok());
}

// ============================================================================
// On-disk registries
// ============================================================================

#[test]
fn test_from_dir_matches_embedded() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.37.0.yaml"), BASE_TABLE).unwrap();
    let registry = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap();
    assert!(registry.diffs().is_empty());
    assert_eq!(registry.resolve("1.50.0").unwrap(), *registry.base());
}

#[test]
fn test_missing_base_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap_err();
    assert!(matches!(err, LocatorError::BaseTableUnavailable { ref version, .. } if version == "1.37.0"));
}

#[test]
fn test_incomplete_base_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let base = BASE_TABLE.replace("  constructor: {class_name: monaco-workbench}\n", "");
    fs::write(dir.path().join("1.37.0.yaml"), base).unwrap();
    let err = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap_err();
    assert!(matches!(err, LocatorError::BaseTableUnavailable { .. }));
}

#[test]
fn test_malformed_diff_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.37.0.yaml"), BASE_TABLE).unwrap();
    fs::create_dir(dir.path().join("diffs")).unwrap();
    fs::write(
        dir.path().join("diffs/1.41.0.yaml"),
        "version: \"1.41.0\"\nlocators:\n  ViewSection:\n    header: {attribute: class}\n",
    )
    .unwrap();
    let err = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap_err();
    assert!(
        matches!(err, LocatorError::SchemaViolation { ref path, .. } if path == "ViewSection.header")
    );
}

#[test]
fn test_unreadable_diff_fails_the_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.37.0.yaml"), BASE_TABLE).unwrap();
    fs::create_dir_all(dir.path().join("diffs/1.41.0.yaml")).unwrap();
    let err = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap_err();
    assert!(matches!(err, LocatorError::Io(_)));
}

#[test]
fn test_non_yaml_files_in_diffs_are_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1.37.0.yaml"), BASE_TABLE).unwrap();
    fs::create_dir(dir.path().join("diffs")).unwrap();
    fs::write(dir.path().join("diffs/README.md"), "notes").unwrap();
    let registry = LocatorRegistry::from_dir(dir.path(), "1.37.0").unwrap();
    assert!(registry.diffs().is_empty());
}

// ============================================================================
// Resolution laws
// ============================================================================

fn known_versions() -> Vec<String> {
    registry()
        .supported_versions()
        .iter()
        .map(ToString::to_string)
        .collect()
}

proptest! {
    #[test]
    fn prop_resolution_is_deterministic(minor in 30u64..60, patch in 0u64..4) {
        let registry = registry();
        let target = format!("1.{minor}.{patch}");
        prop_assert_eq!(registry.resolve(&target).unwrap(), registry.resolve(&target).unwrap());
    }

    #[test]
    fn prop_insider_selects_same_chain(minor in 30u64..60, patch in 0u64..4) {
        let registry = registry();
        let stable = Version::new(1, minor, patch);
        let insider = Version::parse(&format!("{stable}-insider")).unwrap();
        let base = Version::parse(registry.base_version()).unwrap();
        let a: Vec<_> = select_diffs(stable, base, registry.diffs()).iter().map(|d| d.version).collect();
        let b: Vec<_> = select_diffs(insider, base, registry.diffs()).iter().map(|d| d.version).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_chain_decomposes(i in 0usize..11, j in 0usize..11) {
        let versions = known_versions();
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        let (v2, v3) = (&versions[lo], &versions[hi]);

        let registry = registry();
        let direct = registry.resolve(v3).unwrap();
        let intermediate = registry.resolve(v2).unwrap();
        let stepped = resolve(v3, v2, &intermediate, registry.diffs()).unwrap();
        prop_assert_eq!(direct, stepped);
    }
}
