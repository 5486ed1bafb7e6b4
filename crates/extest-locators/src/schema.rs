//! The locator schema: every group and field the page objects read.
//!
//! The schema is a language-agnostic YAML document (`locators/schema.yaml`)
//! mapping group names to fields and each field to a [`LocatorKind`]. Groups
//! may nest. Tables and diffs are validated against it when loaded.

use crate::locator::LocatorKind;
use crate::result::{LocatorError, LocatorResult};
use serde_json::Value;
use std::collections::BTreeMap;

const STANDARD_SCHEMA: &str = include_str!("../locators/schema.yaml");

/// One node of the schema tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A named group of fields or further groups
    Group(BTreeMap<String, SchemaNode>),
    /// A field with its declared kind
    Field(LocatorKind),
}

/// The declared shape of a locator table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorSchema {
    root: BTreeMap<String, SchemaNode>,
}

impl LocatorSchema {
    /// The schema the bundled page objects are written against
    pub fn standard() -> LocatorResult<Self> {
        Self::from_yaml(STANDARD_SCHEMA, "schema.yaml")
    }

    /// Parse a schema document
    pub fn from_yaml(text: &str, origin: &str) -> LocatorResult<Self> {
        let value: Value =
            serde_yaml_ng::from_str(text).map_err(|e| LocatorError::parse(origin, e))?;
        let Value::Object(map) = value else {
            return Err(LocatorError::schema(origin, "schema root must be a mapping"));
        };
        let root = parse_group(&map, "")?;
        Ok(Self { root })
    }

    /// Build a schema from already-constructed nodes
    #[must_use]
    pub fn from_nodes(root: BTreeMap<String, SchemaNode>) -> Self {
        Self { root }
    }

    /// Look up the node at a dotted path
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&SchemaNode> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            match current {
                SchemaNode::Group(children) => current = children.get(segment)?,
                SchemaNode::Field(_) => return None,
            }
        }
        Some(current)
    }

    /// Declared kind of the field at a dotted path
    #[must_use]
    pub fn kind_of(&self, path: &str) -> Option<LocatorKind> {
        match self.node(path)? {
            SchemaNode::Field(kind) => Some(*kind),
            SchemaNode::Group(_) => None,
        }
    }

    /// Whether the path names a field
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.kind_of(path).is_some()
    }

    /// Whether the path names a group
    #[must_use]
    pub fn is_group(&self, path: &str) -> bool {
        matches!(self.node(path), Some(SchemaNode::Group(_)))
    }

    /// Every declared field path with its kind, sorted by path
    #[must_use]
    pub fn fields(&self) -> Vec<(String, LocatorKind)> {
        let mut out = Vec::new();
        collect_fields(&self.root, "", &mut out);
        out
    }

    /// Every declared field path, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.fields().into_iter().map(|(path, _)| path).collect()
    }

    /// Top-level groups
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.root.keys().map(String::as_str).collect()
    }
}

pub(crate) fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn parse_group(
    map: &serde_json::Map<String, Value>,
    prefix: &str,
) -> LocatorResult<BTreeMap<String, SchemaNode>> {
    let mut group = BTreeMap::new();
    for (key, value) in map {
        let path = join(prefix, key);
        let node = match value {
            Value::Object(children) => SchemaNode::Group(parse_group(children, &path)?),
            Value::String(_) => {
                let kind: LocatorKind = serde_json::from_value(value.clone())
                    .map_err(|_| LocatorError::schema(&path, format!("unknown kind {value}")))?;
                SchemaNode::Field(kind)
            }
            other => {
                return Err(LocatorError::schema(
                    &path,
                    format!("expected a kind or a group, found {other}"),
                ))
            }
        };
        group.insert(key.clone(), node);
    }
    Ok(group)
}

fn collect_fields(
    group: &BTreeMap<String, SchemaNode>,
    prefix: &str,
    out: &mut Vec<(String, LocatorKind)>,
) {
    for (key, node) in group {
        let path = join(prefix, key);
        match node {
            SchemaNode::Group(children) => collect_fields(children, &path, out),
            SchemaNode::Field(kind) => out.push((path, *kind)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema_parses() {
        let schema = LocatorSchema::standard().unwrap();
        assert!(schema.groups().contains(&"Workbench"));
        assert_eq!(schema.kind_of("Workbench.constructor"), Some(LocatorKind::Selector));
        assert_eq!(schema.kind_of("ViewSection.level"), Some(LocatorKind::Scalar));
        assert_eq!(
            schema.kind_of("DefaultTreeSection.rowWithLabel"),
            Some(LocatorKind::Builder)
        );
    }

    #[test]
    fn test_groups_are_not_fields() {
        let schema = LocatorSchema::standard().unwrap();
        assert!(schema.is_group("ViewSection"));
        assert!(!schema.contains("ViewSection"));
        assert!(!schema.contains("ViewSection.header.deeper"));
        assert!(!schema.contains("Nope.constructor"));
    }

    #[test]
    fn test_nested_groups() {
        let schema = LocatorSchema::from_yaml(
            "Editor:\n  tab:\n    title: selector\n    close: builder\n  name: scalar\n",
            "inline",
        )
        .unwrap();
        assert_eq!(schema.kind_of("Editor.tab.close"), Some(LocatorKind::Builder));
        assert_eq!(
            schema.paths(),
            vec!["Editor.name", "Editor.tab.close", "Editor.tab.title"]
        );
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = LocatorSchema::from_yaml("A:\n  b: widget\n", "inline").unwrap_err();
        assert!(matches!(err, LocatorError::SchemaViolation { ref path, .. } if path == "A.b"));
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        assert!(LocatorSchema::from_yaml("- a\n- b\n", "inline").is_err());
    }
}
