//! MockDriver - an in-memory DOM behind the [`AutomationDriver`] trait
//!
//! Tests build a tree of [`MockNode`]s, script how it reacts to clicks and
//! keys, and then drive it through the real page objects:
//!
//! ```
//! use extest::mock::{MockDriver, MockNode};
//!
//! let driver = MockDriver::new();
//! let workbench = driver.dom(|dom| dom.add_root(MockNode::new("div").class("monaco-workbench")));
//! let menu = driver.dom(|dom| dom.add(workbench, MockNode::new("div").class("context-view").hidden()));
//! driver.dom(|dom| dom.on_context_click(workbench, move |dom| dom.set_displayed(menu, true)));
//! ```
//!
//! Simple selectors (class names, ids, tags, attribute equality) are matched
//! structurally. CSS and XPath expressions only match nodes that were told to
//! answer them with [`MockNode::answers`].

use crate::driver::{AutomationDriver, ElementHandle};
use crate::result::{ExtestError, ExtestResult};
use async_trait::async_trait;
use extest_locators::Selector;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Index of a node in a [`MockDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    fn handle_id(self) -> String {
        format!("mock-{}", self.0)
    }

    fn from_handle(handle: &ElementHandle) -> Option<Self> {
        handle
            .id
            .strip_prefix("mock-")
            .and_then(|n| n.parse().ok())
            .map(Self)
    }
}

/// One element of the mock document
#[derive(Debug, Clone)]
pub struct MockNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    displayed: bool,
    enabled: bool,
    selected: bool,
    answers: Vec<Selector>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
}

impl MockNode {
    /// A visible, enabled element with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: String::new(),
            displayed: true,
            enabled: true,
            selected: false,
            answers: Vec::new(),
            parent: None,
            children: Vec::new(),
            removed: false,
        }
    }

    /// Add space separated class names
    #[must_use]
    pub fn class(mut self, names: &str) -> Self {
        let entry = self.attributes.entry("class".to_string()).or_default();
        for name in names.split_whitespace() {
            if !entry.split_whitespace().any(|existing| existing == name) {
                if !entry.is_empty() {
                    entry.push(' ');
                }
                entry.push_str(name);
            }
        }
        self
    }

    /// Set the id attribute
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Set the element's own text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Render the element invisibly
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Mark the element disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark the element selected
    #[must_use]
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Match this CSS or XPath selector as well
    #[must_use]
    pub fn answers(mut self, selector: Selector) -> Self {
        self.answers.push(selector);
        self
    }

    /// Attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Tag name
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name))
    }

    fn matches(&self, selector: &Selector) -> bool {
        if self.answers.contains(selector) {
            return true;
        }
        match selector {
            Selector::ClassName(names) => {
                let mut names = names.split_whitespace().peekable();
                names.peek().is_some() && names.all(|name| self.has_class(name))
            }
            Selector::Id(id) => self.attribute("id") == Some(id.as_str()),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Selector::AttributeEquals { name, value } => {
                self.attribute(name) == Some(value.as_str())
            }
            Selector::Css(_) | Selector::Xpath(_) => false,
        }
    }
}

type Reaction = Arc<dyn Fn(&mut MockDom) + Send + Sync>;
type KeyReaction = Arc<dyn Fn(&mut MockDom, Option<NodeId>, &str) + Send + Sync>;

/// The mock document, its frames, windows and scripted reactions
pub struct MockDom {
    nodes: Vec<MockNode>,
    roots: Vec<NodeId>,
    frame: Option<NodeId>,
    windows: Vec<String>,
    window: usize,
    focused: Option<NodeId>,
    on_click: HashMap<NodeId, Vec<Reaction>>,
    on_context_click: HashMap<NodeId, Vec<Reaction>>,
    on_double_click: HashMap<NodeId, Vec<Reaction>>,
    on_keys: Vec<KeyReaction>,
    script_results: VecDeque<serde_json::Value>,
    history: Vec<String>,
}

impl fmt::Debug for MockDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDom")
            .field("nodes", &self.nodes.len())
            .field("frame", &self.frame)
            .field("window", &self.windows.get(self.window))
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Empty document in a single window
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            frame: None,
            windows: vec!["window-1".to_string()],
            window: 0,
            focused: None,
            on_click: HashMap::new(),
            on_context_click: HashMap::new(),
            on_double_click: HashMap::new(),
            on_keys: Vec::new(),
            script_results: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Add a top-level element
    pub fn add_root(&mut self, node: MockNode) -> NodeId {
        let id = self.insert(node, None);
        self.roots.push(id);
        id
    }

    /// Append an element below `parent`
    pub fn add(&mut self, parent: NodeId, node: MockNode) -> NodeId {
        let id = self.insert(node, Some(parent));
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    fn insert(&mut self, mut node: MockNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        node.removed = false;
        self.nodes.push(node);
        id
    }

    /// A node, removed or not
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MockNode> {
        self.nodes.get(id.0)
    }

    /// Whether the node is still attached
    #[must_use]
    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| !n.removed)
    }

    /// Set an attribute on a node
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Remove an attribute from a node
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attributes.remove(name);
        }
    }

    /// Replace a node's own text
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.text = text.into();
        }
    }

    /// Show or hide a node
    pub fn set_displayed(&mut self, id: NodeId, displayed: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.displayed = displayed;
        }
    }

    /// Select or deselect a node
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.selected = selected;
        }
    }

    /// Detach a node and its subtree; handles to them go stale
    pub fn remove(&mut self, id: NodeId) {
        let parent = self.nodes.get(id.0).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent.0) {
                    parent.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(next.0) {
                node.removed = true;
                pending.extend(node.children.iter().copied());
            }
        }
        if self.frame.is_some_and(|frame| !self.is_live(frame)) {
            self.frame = None;
        }
    }

    /// Remove every child of a node
    pub fn clear_children(&mut self, id: NodeId) {
        let children = self
            .nodes
            .get(id.0)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove(child);
        }
    }

    /// Live children of a node, in order
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Open another window
    pub fn add_window(&mut self, handle: impl Into<String>) {
        self.windows.push(handle.into());
    }

    /// Queue a value for the next script execution
    pub fn push_script_result(&mut self, value: serde_json::Value) {
        self.script_results.push_back(value);
    }

    /// Frame the driver is currently focused on
    #[must_use]
    pub fn current_frame(&self) -> Option<NodeId> {
        self.frame
    }

    /// Handle of the current window
    #[must_use]
    pub fn current_window(&self) -> &str {
        self.windows.get(self.window).map_or("", String::as_str)
    }

    /// Element with keyboard focus
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Give a node keyboard focus
    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    /// Run `reaction` whenever the node is left clicked
    pub fn on_click(&mut self, id: NodeId, reaction: impl Fn(&mut Self) + Send + Sync + 'static) {
        self.on_click.entry(id).or_default().push(Arc::new(reaction));
    }

    /// Run `reaction` whenever the node is right clicked
    pub fn on_context_click(
        &mut self,
        id: NodeId,
        reaction: impl Fn(&mut Self) + Send + Sync + 'static,
    ) {
        self.on_context_click
            .entry(id)
            .or_default()
            .push(Arc::new(reaction));
    }

    /// Run `reaction` whenever the node is double clicked
    pub fn on_double_click(
        &mut self,
        id: NodeId,
        reaction: impl Fn(&mut Self) + Send + Sync + 'static,
    ) {
        self.on_double_click
            .entry(id)
            .or_default()
            .push(Arc::new(reaction));
    }

    /// Run `reaction` for every key sequence sent, with its target
    pub fn on_keys(
        &mut self,
        reaction: impl Fn(&mut Self, Option<NodeId>, &str) + Send + Sync + 'static,
    ) {
        self.on_keys.push(Arc::new(reaction));
    }

    /// Every recorded driver call
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn record(&mut self, entry: String) {
        self.history.push(entry);
    }

    /// Live nodes matching `selector` below `scope`, in document order.
    ///
    /// Without a scope the search covers the current frame's document. The
    /// search never descends into an `iframe`.
    #[must_use]
    pub fn find(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let start: Vec<NodeId> = match scope.or(self.frame) {
            Some(id) => self.children(id),
            None => self.roots.clone(),
        };
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = start.into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            if node.removed {
                continue;
            }
            if node.matches(selector) {
                found.push(id);
            }
            if !node.tag.eq_ignore_ascii_case("iframe") {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        found
    }

    fn displayed(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(next) = current {
            match self.nodes.get(next.0) {
                Some(node) if node.displayed => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn rendered_text(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(id.0) else {
            return String::new();
        };
        if !node.text.is_empty() {
            return node.text.clone();
        }
        node.children
            .iter()
            .filter(|child| self.displayed(**child))
            .map(|child| self.rendered_text(*child))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// [`AutomationDriver`] over a shared [`MockDom`]
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    dom: Arc<Mutex<MockDom>>,
}

impl MockDriver {
    /// Driver over an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver over a prepared document
    #[must_use]
    pub fn with_dom(dom: MockDom) -> Self {
        Self {
            dom: Arc::new(Mutex::new(dom)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockDom> {
        self.dom.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inspect or change the document
    pub fn dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut self.lock())
    }

    /// Handle the driver would return for a node
    #[must_use]
    pub fn handle(&self, id: NodeId) -> ElementHandle {
        let tag = self
            .lock()
            .node(id)
            .map(|n| n.tag.clone())
            .unwrap_or_default();
        ElementHandle::new(id.handle_id(), tag)
    }

    /// Every recorded driver call
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Whether a call with this prefix was recorded
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(method))
    }

    /// Number of recorded calls with this prefix
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .history
            .iter()
            .filter(|c| c.starts_with(method))
            .count()
    }

    fn live(dom: &MockDom, handle: &ElementHandle) -> ExtestResult<NodeId> {
        NodeId::from_handle(handle)
            .filter(|id| dom.is_live(*id))
            .ok_or_else(|| ExtestError::StaleElement {
                id: handle.id.clone(),
            })
    }

    fn react(&self, element: &ElementHandle, kind: &str) -> ExtestResult<()> {
        let mut dom = self.lock();
        let id = Self::live(&dom, element)?;
        dom.record(format!("{kind}:{}", element.id));
        dom.focused = Some(id);
        let reactions = match kind {
            "click" => dom.on_click.get(&id).cloned(),
            "context_click" => dom.on_context_click.get(&id).cloned(),
            "double_click" => dom.on_double_click.get(&id).cloned(),
            _ => None,
        }
        .unwrap_or_default();
        for reaction in reactions {
            reaction(&mut *dom);
        }
        Ok(())
    }

    fn read<T>(
        &self,
        element: &ElementHandle,
        f: impl FnOnce(&MockDom, NodeId, &MockNode) -> T,
    ) -> ExtestResult<T> {
        let dom = self.lock();
        let id = Self::live(&dom, element)?;
        let node = dom.node(id).ok_or_else(|| ExtestError::StaleElement {
            id: element.id.clone(),
        })?;
        Ok(f(&dom, id, node))
    }
}

fn is_printable(c: char) -> bool {
    !('\u{E000}'..='\u{F8FF}').contains(&c)
}

#[async_trait]
impl AutomationDriver for MockDriver {
    async fn find_elements(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> ExtestResult<Vec<ElementHandle>> {
        let mut dom = self.lock();
        let scope = scope.map(|s| Self::live(&dom, s)).transpose()?;
        dom.record(format!("find:{selector}"));
        Ok(dom
            .find(scope, selector)
            .into_iter()
            .filter_map(|id| {
                dom.node(id)
                    .map(|n| ElementHandle::new(id.handle_id(), n.tag.clone()))
            })
            .collect())
    }

    async fn click(&self, element: &ElementHandle) -> ExtestResult<()> {
        self.react(element, "click")
    }

    async fn context_click(&self, element: &ElementHandle) -> ExtestResult<()> {
        self.react(element, "context_click")
    }

    async fn double_click(&self, element: &ElementHandle) -> ExtestResult<()> {
        self.react(element, "double_click")
    }

    async fn hover(&self, element: &ElementHandle) -> ExtestResult<()> {
        let mut dom = self.lock();
        Self::live(&dom, element)?;
        dom.record(format!("hover:{}", element.id));
        Ok(())
    }

    async fn send_keys(&self, element: Option<&ElementHandle>, keys: &str) -> ExtestResult<()> {
        let mut dom = self.lock();
        let target = match element {
            Some(handle) => Some(Self::live(&dom, handle)?),
            None => dom.focused.filter(|id| dom.is_live(*id)),
        };
        let label = element.map_or_else(|| "active".to_string(), |h| h.id.clone());
        dom.record(format!("send_keys:{label}:{keys}"));
        if let Some(id) = target {
            dom.focused = Some(id);
            let typed: String = keys.chars().filter(|c| is_printable(*c)).collect();
            let editable = dom
                .node(id)
                .is_some_and(|n| matches!(n.tag.as_str(), "input" | "textarea"));
            if editable && !typed.is_empty() {
                let current = dom
                    .node(id)
                    .and_then(|n| n.attribute("value"))
                    .unwrap_or_default()
                    .to_string();
                dom.set_attribute(id, "value", format!("{current}{typed}"));
            }
        }
        let reactions = dom.on_keys.clone();
        for reaction in reactions {
            reaction(&mut *dom, target, keys);
        }
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> ExtestResult<()> {
        let mut dom = self.lock();
        let id = Self::live(&dom, element)?;
        dom.record(format!("clear:{}", element.id));
        dom.set_attribute(id, "value", "");
        Ok(())
    }

    async fn text(&self, element: &ElementHandle) -> ExtestResult<String> {
        self.read(element, |dom, id, _| dom.rendered_text(id))
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> ExtestResult<Option<String>> {
        self.read(element, |_, _, node| node.attribute(name).map(str::to_string))
    }

    async fn tag_name(&self, element: &ElementHandle) -> ExtestResult<String> {
        self.read(element, |_, _, node| node.tag.clone())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> ExtestResult<bool> {
        self.read(element, |dom, id, _| dom.displayed(id))
    }

    async fn is_enabled(&self, element: &ElementHandle) -> ExtestResult<bool> {
        self.read(element, |_, _, node| node.enabled)
    }

    async fn is_selected(&self, element: &ElementHandle) -> ExtestResult<bool> {
        self.read(element, |_, _, node| node.selected)
    }

    async fn switch_to_frame(&self, frame: Option<&ElementHandle>) -> ExtestResult<()> {
        let mut dom = self.lock();
        let target = frame.map(|f| Self::live(&dom, f)).transpose()?;
        let label = frame.map_or_else(|| "default".to_string(), |f| f.id.clone());
        dom.record(format!("switch_to_frame:{label}"));
        dom.frame = target;
        Ok(())
    }

    async fn window_handle(&self) -> ExtestResult<String> {
        Ok(self.lock().current_window().to_string())
    }

    async fn switch_to_window(&self, handle: &str) -> ExtestResult<()> {
        let mut dom = self.lock();
        let index = dom
            .windows
            .iter()
            .position(|w| w == handle)
            .ok_or_else(|| ExtestError::Driver {
                message: format!("no such window: {handle}"),
            })?;
        dom.record(format!("switch_to_window:{handle}"));
        dom.window = index;
        dom.frame = None;
        Ok(())
    }

    async fn execute_script(
        &self,
        script: &str,
        _args: &[ElementHandle],
    ) -> ExtestResult<serde_json::Value> {
        let mut dom = self.lock();
        dom.record(format!("execute_script:{script}"));
        Ok(dom
            .script_results
            .pop_front()
            .unwrap_or(serde_json::Value::Null))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> (MockDriver, NodeId, NodeId, NodeId) {
        let driver = MockDriver::new();
        let (root, list, row) = driver.dom(|dom| {
            let root = dom.add_root(MockNode::new("div").class("monaco-workbench"));
            let list = dom.add(root, MockNode::new("div").class("monaco-list"));
            let row = dom.add(
                list,
                MockNode::new("div")
                    .class("monaco-list-row")
                    .attr("aria-level", "1")
                    .text("src"),
            );
            (root, list, row)
        });
        (driver, root, list, row)
    }

    mod dom_tests {
        use super::*;

        #[test]
        fn test_class_name_matching_requires_all_names() {
            let node = MockNode::new("div").class("composite title");
            assert!(node.matches(&Selector::class_name("composite")));
            assert!(node.matches(&Selector::class_name("title composite")));
            assert!(!node.matches(&Selector::class_name("composite panel")));
            assert!(!node.matches(&Selector::class_name("")));
        }

        #[test]
        fn test_registered_selectors_match() {
            let xpath = Selector::xpath(".//h3");
            let node = MockNode::new("h3").answers(xpath.clone());
            assert!(node.matches(&xpath));
            assert!(node.matches(&Selector::tag("H3")));
            assert!(!node.matches(&Selector::css("h3")));
        }

        #[test]
        fn test_find_is_scoped_and_ordered() {
            let (driver, root, list, row) = sample();
            driver.dom(|dom| {
                assert_eq!(dom.find(None, &Selector::class_name("monaco-list-row")), vec![row]);
                assert_eq!(dom.find(Some(list), &Selector::class_name("monaco-list")), vec![]);
                assert_eq!(dom.find(Some(root), &Selector::tag("div")), vec![list, row]);
            });
        }

        #[test]
        fn test_find_does_not_enter_frames() {
            let driver = MockDriver::new();
            driver.dom(|dom| {
                let root = dom.add_root(MockNode::new("div"));
                let frame = dom.add(root, MockNode::new("iframe"));
                let inner = dom.add(frame, MockNode::new("p").class("inside"));
                assert!(dom.find(None, &Selector::class_name("inside")).is_empty());
                dom.frame = Some(frame);
                assert_eq!(dom.find(None, &Selector::class_name("inside")), vec![inner]);
            });
        }

        #[test]
        fn test_remove_marks_subtree() {
            let (driver, _, list, row) = sample();
            driver.dom(|dom| {
                dom.remove(list);
                assert!(!dom.is_live(list));
                assert!(!dom.is_live(row));
            });
        }

        #[test]
        fn test_rendered_text_falls_back_to_children() {
            let (driver, root, _, _) = sample();
            driver.dom(|dom| assert_eq!(dom.rendered_text(root), "src"));
        }
    }

    mod driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_find_and_read() {
            let (driver, _, _, row) = sample();
            let found = driver
                .find_elements(None, &Selector::class_name("monaco-list-row"))
                .await
                .unwrap();
            assert_eq!(found, vec![driver.handle(row)]);
            assert_eq!(
                driver.attribute(&found[0], "aria-level").await.unwrap(),
                Some("1".to_string())
            );
            assert_eq!(driver.text(&found[0]).await.unwrap(), "src");
            assert!(driver.was_called("find:class=monaco-list-row"));
        }

        #[tokio::test]
        async fn test_removed_nodes_are_stale() {
            let (driver, _, _, row) = sample();
            let handle = driver.handle(row);
            driver.dom(|dom| dom.remove(row));
            let err = driver.text(&handle).await.unwrap_err();
            assert!(matches!(err, ExtestError::StaleElement { .. }));
            assert!(driver.click(&handle).await.is_err());
        }

        #[tokio::test]
        async fn test_click_reactions_run() {
            let (driver, _, list, row) = sample();
            driver.dom(|dom| dom.on_click(row, move |dom| dom.set_attribute(list, "data-clicked", "yes")));
            driver.click(&driver.handle(row)).await.unwrap();
            assert_eq!(
                driver.attribute(&driver.handle(list), "data-clicked").await.unwrap(),
                Some("yes".to_string())
            );
            assert_eq!(driver.dom(|dom| dom.focused()), Some(row));
        }

        #[tokio::test]
        async fn test_typing_into_inputs() {
            let driver = MockDriver::new();
            let input = driver.dom(|dom| dom.add_root(MockNode::new("input")));
            let handle = driver.handle(input);
            driver.send_keys(Some(&handle), "abc\u{E007}").await.unwrap();
            assert_eq!(
                driver.attribute(&handle, "value").await.unwrap(),
                Some("abc".to_string())
            );
            driver.clear(&handle).await.unwrap();
            assert_eq!(driver.attribute(&handle, "value").await.unwrap(), Some(String::new()));
        }

        #[tokio::test]
        async fn test_windows_reset_frames() {
            let driver = MockDriver::new();
            let frame = driver.dom(|dom| {
                dom.add_window("window-2");
                dom.add_root(MockNode::new("iframe"))
            });
            driver.switch_to_frame(Some(&driver.handle(frame))).await.unwrap();
            assert_eq!(driver.dom(|dom| dom.current_frame()), Some(frame));
            driver.switch_to_window("window-2").await.unwrap();
            assert_eq!(driver.window_handle().await.unwrap(), "window-2");
            assert_eq!(driver.dom(|dom| dom.current_frame()), None);
            assert!(driver.switch_to_window("nope").await.is_err());
        }

        #[tokio::test]
        async fn test_script_results_are_queued() {
            let driver = MockDriver::new();
            driver.dom(|dom| dom.push_script_result(serde_json::json!(3)));
            assert_eq!(driver.execute_script("return 3", &[]).await.unwrap(), serde_json::json!(3));
            assert_eq!(driver.execute_script("x", &[]).await.unwrap(), serde_json::Value::Null);
        }
    }
}
