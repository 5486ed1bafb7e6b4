//! Locator values: the leaves of a locator table.
//!
//! A leaf is one of three kinds:
//!
//! - a static **selector** (CSS, XPath, class name, id, tag, attribute equality)
//! - a parametric **builder** (a CSS or XPath template with `{0}`, `{1}`, ...
//!   placeholders that yields a selector once arguments are supplied)
//! - a **scalar** (an attribute name to read, or a literal value to compare with)
//!
//! Tables are authored as YAML, so leaves deserialize from externally tagged
//! single-key maps such as `{class_name: monaco-workbench}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A concrete predicate handed to the automation driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g. `".composite.title"`)
    Css(String),
    /// XPath expression, evaluated relative to the enclosing scope
    Xpath(String),
    /// Single class name (space separated names mean all of them)
    ClassName(String),
    /// Element id
    Id(String),
    /// Tag name
    Tag(String),
    /// Attribute equality
    AttributeEquals {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::Xpath(expression.into())
    }

    /// Create a class name selector
    #[must_use]
    pub fn class_name(name: impl Into<String>) -> Self {
        Self::ClassName(name.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a tag selector
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Create an attribute equality selector
    #[must_use]
    pub fn attribute_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Translate into a WebDriver `(using, value)` location strategy pair.
    ///
    /// Class names, ids and attribute predicates are expressed as CSS so that
    /// values containing dots (`workbench.parts.editor`) survive intact.
    #[must_use]
    pub fn to_webdriver(&self) -> (&'static str, String) {
        match self {
            Self::Css(css) => ("css selector", css.clone()),
            Self::Xpath(xpath) => ("xpath", xpath.clone()),
            Self::ClassName(names) => {
                let css: String = names
                    .split_whitespace()
                    .map(|name| format!(".{name}"))
                    .collect();
                ("css selector", css)
            }
            Self::Id(id) => ("css selector", format!("[id={id:?}]")),
            Self::Tag(tag) => ("tag name", tag.clone()),
            Self::AttributeEquals { name, value } => ("css selector", format!("[{name}={value:?}]")),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css={css}"),
            Self::Xpath(xpath) => write!(f, "xpath={xpath}"),
            Self::ClassName(name) => write!(f, "class={name}"),
            Self::Id(id) => write!(f, "id={id}"),
            Self::Tag(tag) => write!(f, "tag={tag}"),
            Self::AttributeEquals { name, value } => write!(f, "[{name}={value:?}]"),
        }
    }
}

/// The three kinds of locator table leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    /// Static predicate
    Selector,
    /// Parametric selector builder
    Builder,
    /// Attribute name or literal value
    Scalar,
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Selector => "selector",
            Self::Builder => "builder",
            Self::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// One leaf of a locator table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// Static CSS selector
    Css(String),
    /// Static XPath selector
    Xpath(String),
    /// Static class name selector
    ClassName(String),
    /// Static id selector
    Id(String),
    /// Static tag selector
    Tag(String),
    /// Static attribute equality selector
    AttributeEquals {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// CSS template with `{n}` placeholders
    CssTemplate(String),
    /// XPath template with `{n}` placeholders
    XpathTemplate(String),
    /// Name of an attribute to read
    Attribute(String),
    /// Literal value, e.g. a class fragment or a label to compare against
    Text(String),
}

#[allow(clippy::expect_used)]
fn placeholder() -> &'static regex::Regex {
    static PLACEHOLDER: OnceLock<regex::Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        regex::Regex::new(r"\{(\d+)\}").expect("placeholder pattern is a valid regex")
    })
}

impl Locator {
    /// The kind of this leaf
    #[must_use]
    pub const fn kind(&self) -> LocatorKind {
        match self {
            Self::Css(_)
            | Self::Xpath(_)
            | Self::ClassName(_)
            | Self::Id(_)
            | Self::Tag(_)
            | Self::AttributeEquals { .. } => LocatorKind::Selector,
            Self::CssTemplate(_) | Self::XpathTemplate(_) => LocatorKind::Builder,
            Self::Attribute(_) | Self::Text(_) => LocatorKind::Scalar,
        }
    }

    /// The static selector, if this leaf is one
    #[must_use]
    pub fn selector(&self) -> Option<Selector> {
        let selector = match self {
            Self::Css(css) => Selector::Css(css.clone()),
            Self::Xpath(xpath) => Selector::Xpath(xpath.clone()),
            Self::ClassName(name) => Selector::ClassName(name.clone()),
            Self::Id(id) => Selector::Id(id.clone()),
            Self::Tag(tag) => Selector::Tag(tag.clone()),
            Self::AttributeEquals { name, value } => Selector::AttributeEquals {
                name: name.clone(),
                value: value.clone(),
            },
            _ => return None,
        };
        Some(selector)
    }

    /// Number of arguments a template references (highest placeholder + 1).
    ///
    /// Zero for non-templates and for templates without placeholders.
    #[must_use]
    pub fn arity(&self) -> usize {
        let pattern = match self {
            Self::CssTemplate(pattern) | Self::XpathTemplate(pattern) => pattern,
            _ => return 0,
        };
        placeholder()
            .captures_iter(pattern)
            .filter_map(|caps| caps[1].parse::<usize>().ok())
            .map(|index| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Complete a template with arguments.
    ///
    /// Returns `None` when this leaf is not a template or fewer arguments than
    /// [`Locator::arity`] were supplied. Extra arguments are ignored.
    #[must_use]
    pub fn build(&self, args: &[&str]) -> Option<Selector> {
        if args.len() < self.arity() {
            return None;
        }
        let fill = |pattern: &str| {
            placeholder()
                .replace_all(pattern, |caps: &regex::Captures<'_>| {
                    caps[1]
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| args.get(index))
                        .map_or_else(|| caps[0].to_string(), |arg| (*arg).to_string())
                })
                .into_owned()
        };
        match self {
            Self::CssTemplate(pattern) => Some(Selector::Css(fill(pattern))),
            Self::XpathTemplate(pattern) => Some(Selector::Xpath(fill(pattern))),
            _ => None,
        }
    }

    /// The scalar value, if this leaf is an attribute name or literal
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        match self {
            Self::Attribute(value) | Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_class_names_become_compound_css() {
            let (using, value) = Selector::class_name("composite title").to_webdriver();
            assert_eq!(using, "css selector");
            assert_eq!(value, ".composite.title");
        }

        #[test]
        fn test_dotted_ids_are_quoted() {
            let (_, value) = Selector::id("workbench.parts.editor").to_webdriver();
            assert_eq!(value, "[id=\"workbench.parts.editor\"]");
        }

        #[test]
        fn test_xpath_passes_through() {
            let (using, value) = Selector::xpath(".//h3").to_webdriver();
            assert_eq!(using, "xpath");
            assert_eq!(value, ".//h3");
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::tag("h2").to_string(), "tag=h2");
            assert_eq!(
                Selector::attribute_equals("role", "tab").to_string(),
                "[role=\"tab\"]"
            );
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_kinds() {
            assert_eq!(Locator::ClassName("x".into()).kind(), LocatorKind::Selector);
            assert_eq!(Locator::XpathTemplate("{0}".into()).kind(), LocatorKind::Builder);
            assert_eq!(Locator::Attribute("aria-level".into()).kind(), LocatorKind::Scalar);
            assert_eq!(Locator::Text("checked".into()).kind(), LocatorKind::Scalar);
        }

        #[test]
        fn test_deserialize_tagged_leaf() {
            let leaf: Locator =
                serde_json::from_value(serde_json::json!({"class_name": "monaco-workbench"}))
                    .unwrap();
            assert_eq!(leaf, Locator::ClassName("monaco-workbench".into()));

            let leaf: Locator = serde_json::from_value(
                serde_json::json!({"attribute_equals": {"name": "role", "value": "tab"}}),
            )
            .unwrap();
            assert_eq!(leaf.kind(), LocatorKind::Selector);
        }

        #[test]
        fn test_template_arity() {
            let one = Locator::XpathTemplate(".//li[@aria-label='{0}']".into());
            let two = Locator::XpathTemplate("{1} and {0} and {1}".into());
            assert_eq!(one.arity(), 1);
            assert_eq!(two.arity(), 2);
            assert_eq!(Locator::Css(".a".into()).arity(), 0);
        }

        #[test]
        fn test_template_build() {
            let template = Locator::XpathTemplate(".//div[@aria-label='{0}']".into());
            let built = template.build(&["Explorer"]).unwrap();
            assert_eq!(built, Selector::xpath(".//div[@aria-label='Explorer']"));
        }

        #[test]
        fn test_template_build_repeats_and_orders() {
            let template = Locator::CssTemplate("[a='{1}'][b='{0}'][c='{1}']".into());
            let built = template.build(&["x", "y"]).unwrap();
            assert_eq!(built, Selector::css("[a='y'][b='x'][c='y']"));
        }

        #[test]
        fn test_template_build_missing_args() {
            let template = Locator::XpathTemplate("{0}/{1}".into());
            assert!(template.build(&["only"]).is_none());
        }

        #[test]
        fn test_non_template_build_is_none() {
            assert!(Locator::Css(".a".into()).build(&[]).is_none());
            assert!(Locator::Css(".a".into()).selector().is_some());
            assert!(Locator::Text("a".into()).selector().is_none());
        }

        #[test]
        fn test_scalar() {
            assert_eq!(Locator::Attribute("title".into()).scalar(), Some("title"));
            assert_eq!(Locator::Id("x".into()).scalar(), None);
        }
    }
}
