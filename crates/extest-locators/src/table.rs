//! Locator tables: schema-checked trees of locator leaves.
//!
//! A [`LocatorNode`] tree is used both for complete tables and for the sparse
//! overlays carried by diffs. A [`LocatorTable`] is a tree that has passed the
//! totality check: every field the schema declares is present with the
//! declared kind.

use crate::locator::{Locator, LocatorKind, Selector};
use crate::result::{LocatorError, LocatorResult};
use crate::schema::{join, LocatorSchema, SchemaNode};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A node of a locator tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorNode {
    /// Named children
    Group(BTreeMap<String, LocatorNode>),
    /// A single locator
    Leaf(Locator),
}

impl Default for LocatorNode {
    fn default() -> Self {
        Self::Group(BTreeMap::new())
    }
}

impl LocatorNode {
    /// Parse a (possibly partial) tree and check it against the schema.
    ///
    /// Every key must be declared: groups must be mappings, fields must be a
    /// leaf of the declared kind. Missing keys are allowed here; totality is
    /// checked by [`LocatorTable::from_node`].
    pub fn from_value(value: &Value, schema: &LocatorSchema) -> LocatorResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => parse_children(map, "", schema),
            other => Err(LocatorError::schema(
                "<root>",
                format!("expected a mapping of groups, found {other}"),
            )),
        }
    }

    /// Node at a dotted path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Self> {
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Group(children) => children.get(segment),
            Self::Leaf(_) => None,
        })
    }

    /// Every leaf with its dotted path, sorted by path
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &Locator)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Locator)>) {
        match self {
            Self::Leaf(locator) => out.push((prefix.to_string(), locator)),
            Self::Group(children) => {
                for (key, child) in children {
                    child.collect_leaves(&join(prefix, key), out);
                }
            }
        }
    }

    /// Whether the tree holds no leaves
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Group(children) => children.values().all(Self::is_empty),
        }
    }

    /// Deep-merge `overlay` into this node.
    ///
    /// Where both sides are groups the merge recurses; anywhere else the
    /// overlay value replaces the current one.
    pub fn merge(&mut self, overlay: &Self) {
        match (self, overlay) {
            (Self::Group(current), Self::Group(incoming)) => {
                for (key, value) in incoming {
                    match current.get_mut(key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            current.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            (slot, value) => *slot = value.clone(),
        }
    }
}

fn parse_children(
    map: &Map<String, Value>,
    prefix: &str,
    schema: &LocatorSchema,
) -> LocatorResult<LocatorNode> {
    let mut children = BTreeMap::new();
    for (key, value) in map {
        let path = join(prefix, key);
        let node = match schema.node(&path) {
            None => return Err(LocatorError::schema(&path, "not declared in the locator schema")),
            Some(SchemaNode::Group(_)) => match value {
                Value::Object(inner) => parse_children(inner, &path, schema)?,
                other => {
                    return Err(LocatorError::schema(
                        &path,
                        format!("declared as a group, found {other}"),
                    ))
                }
            },
            Some(SchemaNode::Field(kind)) => LocatorNode::Leaf(parse_leaf(value, &path, *kind)?),
        };
        children.insert(key.clone(), node);
    }
    Ok(LocatorNode::Group(children))
}

fn parse_leaf(value: &Value, path: &str, expected: LocatorKind) -> LocatorResult<Locator> {
    let locator: Locator = serde_json::from_value(value.clone())
        .map_err(|e| LocatorError::schema(path, format!("invalid locator: {e}")))?;
    if locator.kind() != expected {
        return Err(LocatorError::schema(
            path,
            format!("declared as {expected}, found a {}", locator.kind()),
        ));
    }
    Ok(locator)
}

/// A complete locator table for one application version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTable {
    root: LocatorNode,
    extras: Map<String, Value>,
}

impl LocatorTable {
    /// Check a tree for totality against the schema and wrap it
    pub fn from_node(root: LocatorNode, schema: &LocatorSchema) -> LocatorResult<Self> {
        for (path, kind) in schema.fields() {
            match root.get(&path) {
                Some(LocatorNode::Leaf(locator)) if locator.kind() == kind => {}
                Some(LocatorNode::Leaf(locator)) => {
                    return Err(LocatorError::schema(
                        &path,
                        format!("declared as {kind}, found a {}", locator.kind()),
                    ))
                }
                Some(LocatorNode::Group(_)) => {
                    return Err(LocatorError::schema(&path, "declared as a field, found a group"))
                }
                None => return Err(LocatorError::schema(&path, "missing from table")),
            }
        }
        Ok(Self {
            root,
            extras: Map::new(),
        })
    }

    /// Parse a complete table from YAML
    pub fn from_yaml(text: &str, origin: &str, schema: &LocatorSchema) -> LocatorResult<Self> {
        let value: Value =
            serde_yaml_ng::from_str(text).map_err(|e| LocatorError::parse(origin, e))?;
        let root = LocatorNode::from_value(&value, schema)?;
        Self::from_node(root, schema)
    }

    /// The underlying tree
    #[must_use]
    pub fn root(&self) -> &LocatorNode {
        &self.root
    }

    /// Free-form values accumulated from diff extras
    #[must_use]
    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// One extras value
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Overlay a validated partial tree and its extras onto this table
    pub(crate) fn apply(&mut self, overlay: &LocatorNode, extras: &Map<String, Value>) {
        self.root.merge(overlay);
        for (key, value) in extras {
            self.extras.insert(key.clone(), value.clone());
        }
    }

    /// The leaf at a dotted path
    pub fn get(&self, path: &str) -> LocatorResult<&Locator> {
        match self.root.get(path) {
            Some(LocatorNode::Leaf(locator)) => Ok(locator),
            _ => Err(LocatorError::UnknownLocator {
                path: path.to_string(),
            }),
        }
    }

    fn expect_kind(&self, path: &str, expected: LocatorKind) -> LocatorResult<&Locator> {
        let locator = self.get(path)?;
        if locator.kind() == expected {
            Ok(locator)
        } else {
            Err(LocatorError::KindMismatch {
                path: path.to_string(),
                expected,
                actual: locator.kind(),
            })
        }
    }

    /// A static selector
    pub fn selector(&self, path: &str) -> LocatorResult<Selector> {
        let locator = self.expect_kind(path, LocatorKind::Selector)?;
        locator.selector().ok_or_else(|| LocatorError::KindMismatch {
            path: path.to_string(),
            expected: LocatorKind::Selector,
            actual: locator.kind(),
        })
    }

    /// A selector built from a template and its arguments
    pub fn build(&self, path: &str, args: &[&str]) -> LocatorResult<Selector> {
        let locator = self.expect_kind(path, LocatorKind::Builder)?;
        locator
            .build(args)
            .ok_or_else(|| LocatorError::TemplateArguments {
                path: path.to_string(),
                expected: locator.arity(),
                actual: args.len(),
            })
    }

    /// A scalar value: an attribute name or literal
    pub fn scalar(&self, path: &str) -> LocatorResult<&str> {
        let locator = self.expect_kind(path, LocatorKind::Scalar)?;
        locator.scalar().ok_or_else(|| LocatorError::KindMismatch {
            path: path.to_string(),
            expected: LocatorKind::Scalar,
            actual: locator.kind(),
        })
    }

    /// Name of the attribute to read
    pub fn attribute(&self, path: &str) -> LocatorResult<&str> {
        self.scalar(path)
    }

    /// Literal value to compare against
    pub fn text(&self, path: &str) -> LocatorResult<&str> {
        self.scalar(path)
    }

    /// Every leaf path, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.root.leaves().into_iter().map(|(path, _)| path).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> LocatorSchema {
        LocatorSchema::from_yaml(
            "Bar:\n  constructor: selector\n  item: builder\n  label: scalar\nPanel:\n  header: selector\n  title:\n    text: scalar\n",
            "inline",
        )
        .unwrap()
    }

    fn full() -> Value {
        json!({
            "Bar": {
                "constructor": {"class_name": "bar"},
                "item": {"xpath_template": ".//li[@aria-label='{0}']"},
                "label": {"attribute": "aria-label"},
            },
            "Panel": {
                "header": {"class_name": "panel-header"},
                "title": {"text": {"text": "Title"}},
            }
        })
    }

    mod node_tests {
        use super::*;

        #[test]
        fn test_partial_overlay_is_accepted() {
            let overlay = json!({"Panel": {"header": {"class_name": "pane-header"}}});
            let node = LocatorNode::from_value(&overlay, &schema()).unwrap();
            assert_eq!(node.leaves().len(), 1);
        }

        #[test]
        fn test_undeclared_key_is_rejected() {
            let overlay = json!({"Panel": {"footer": {"class_name": "x"}}});
            let err = LocatorNode::from_value(&overlay, &schema()).unwrap_err();
            assert!(
                matches!(err, LocatorError::SchemaViolation { ref path, .. } if path == "Panel.footer")
            );
        }

        #[test]
        fn test_wrong_kind_is_rejected() {
            let overlay = json!({"Bar": {"item": {"class_name": "not-a-template"}}});
            assert!(LocatorNode::from_value(&overlay, &schema()).is_err());
        }

        #[test]
        fn test_leaf_where_group_declared_is_rejected() {
            let overlay = json!({"Panel": {"title": {"class_name": "x"}}});
            assert!(LocatorNode::from_value(&overlay, &schema()).is_err());
        }

        #[test]
        fn test_merge_recurses_and_overlay_wins() {
            let schema = schema();
            let mut base = LocatorNode::from_value(&full(), &schema).unwrap();
            let overlay = LocatorNode::from_value(
                &json!({"Panel": {"header": {"css": ".pane-header"}}}),
                &schema,
            )
            .unwrap();
            base.merge(&overlay);
            assert_eq!(
                base.get("Panel.header"),
                Some(&LocatorNode::Leaf(Locator::Css(".pane-header".into())))
            );
            assert_eq!(
                base.get("Panel.title.text"),
                Some(&LocatorNode::Leaf(Locator::Text("Title".into())))
            );
        }

        #[test]
        fn test_empty_overlay() {
            let node = LocatorNode::from_value(&Value::Null, &schema()).unwrap();
            assert!(node.is_empty());
        }
    }

    mod table_tests {
        use super::*;

        fn table() -> LocatorTable {
            let schema = schema();
            LocatorTable::from_node(LocatorNode::from_value(&full(), &schema).unwrap(), &schema)
                .unwrap()
        }

        #[test]
        fn test_missing_field_fails_totality() {
            let schema = schema();
            let mut value = full();
            value["Bar"].as_object_mut().unwrap().remove("label");
            let node = LocatorNode::from_value(&value, &schema).unwrap();
            let err = LocatorTable::from_node(node, &schema).unwrap_err();
            assert!(
                matches!(err, LocatorError::SchemaViolation { ref path, .. } if path == "Bar.label")
            );
        }

        #[test]
        fn test_typed_accessors() {
            let table = table();
            assert_eq!(table.selector("Bar.constructor").unwrap(), Selector::class_name("bar"));
            assert_eq!(
                table.build("Bar.item", &["Open"]).unwrap(),
                Selector::xpath(".//li[@aria-label='Open']")
            );
            assert_eq!(table.attribute("Bar.label").unwrap(), "aria-label");
            assert_eq!(table.text("Panel.title.text").unwrap(), "Title");
        }

        #[test]
        fn test_kind_mismatch() {
            let err = table().selector("Bar.label").unwrap_err();
            assert!(matches!(
                err,
                LocatorError::KindMismatch {
                    expected: LocatorKind::Selector,
                    actual: LocatorKind::Scalar,
                    ..
                }
            ));
        }

        #[test]
        fn test_unknown_path() {
            assert!(matches!(
                table().get("Bar.nope"),
                Err(LocatorError::UnknownLocator { .. })
            ));
            assert!(matches!(
                table().get("Panel.title"),
                Err(LocatorError::UnknownLocator { .. })
            ));
        }

        #[test]
        fn test_template_argument_count() {
            let err = table().build("Bar.item", &[]).unwrap_err();
            assert!(matches!(
                err,
                LocatorError::TemplateArguments {
                    expected: 1,
                    actual: 0,
                    ..
                }
            ));
        }

        #[test]
        fn test_paths_are_sorted() {
            assert_eq!(
                table().paths(),
                vec![
                    "Bar.constructor",
                    "Bar.item",
                    "Bar.label",
                    "Panel.header",
                    "Panel.title.text"
                ]
            );
        }

        #[test]
        fn test_apply_merges_extras() {
            let mut table = table();
            let mut extras = Map::new();
            extras.insert("codicons".into(), json!(true));
            table.apply(&LocatorNode::default(), &extras);
            assert_eq!(table.extra("codicons"), Some(&json!(true)));
        }
    }
}
