//! Shared fixtures for the page-object tests.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use extest::mock::{MockDriver, MockNode, NodeId};
use extest::{Session, SessionConfig};
use std::sync::Arc;

/// Session over a mock driver with millisecond budgets
pub fn session(version: &str) -> (Arc<MockDriver>, Session) {
    session_with(SessionConfig::new().app_version(version))
}

/// Session with fast budgets layered over `config`
pub fn session_with(config: SessionConfig) -> (Arc<MockDriver>, Session) {
    let driver = Arc::new(MockDriver::new());
    let config = config
        .element_timeout_ms(30)
        .poll_interval_ms(1)
        .settle_ms(1);
    let session = Session::start(driver.clone(), config).expect("session starts");
    (driver, session)
}

/// Number of key sequences sent containing `key`
pub fn keys_sent(driver: &MockDriver, key: extest::Key) -> usize {
    driver
        .history()
        .iter()
        .filter(|call| call.starts_with("send_keys:") && call.contains(key.code_point()))
        .count()
}

/// One explorer row
#[derive(Debug, Clone)]
pub struct Row {
    pub label: &'static str,
    pub level: u32,
    pub folder: bool,
}

pub const fn file(label: &'static str, level: u32) -> Row {
    Row {
        label,
        level,
        folder: false,
    }
}

pub const fn folder(label: &'static str, level: u32) -> Row {
    Row {
        label,
        level,
        folder: true,
    }
}

/// Workbench > side bar > content > one expanded explorer section; returns
/// the row list node
pub fn explorer(driver: &MockDriver, session: &Session) -> NodeId {
    let header_class = session
        .selector("ViewSection.header")
        .unwrap()
        .to_string()
        .trim_start_matches("class=")
        .to_string();
    driver.dom(|dom| {
        let workbench = dom.add_root(MockNode::new("div").class("monaco-workbench"));
        let side_bar = dom.add(workbench, MockNode::new("div").id("workbench.parts.sidebar"));
        let content = dom.add(side_bar, MockNode::new("div").class("content"));
        let section = dom.add(content, MockNode::new("div").class("split-view-view"));
        let header = dom.add(
            section,
            MockNode::new("div")
                .class(&header_class)
                .attr("aria-expanded", "true"),
        );
        dom.add(header, MockNode::new("h3").attr("title", "Explorer"));
        let body = dom.add(section, MockNode::new("div").class("explorer-folders-view"));
        dom.add(body, MockNode::new("div").class("monaco-list"))
    })
}

/// Append explorer rows to `list`, numbering them from `first_index`
pub fn add_rows(
    driver: &MockDriver,
    session: &Session,
    list: NodeId,
    first_index: usize,
    rows: &[Row],
) -> Vec<NodeId> {
    let nodes: Vec<MockNode> = rows
        .iter()
        .enumerate()
        .map(|(offset, row)| row_node(session, first_index + offset, row))
        .collect();
    let folders: Vec<bool> = rows.iter().map(|r| r.folder).collect();
    driver.dom(|dom| {
        nodes
            .into_iter()
            .zip(folders)
            .map(|(node, is_folder)| {
                let id = dom.add(list, node);
                let twistie = MockNode::new("div").class("monaco-tl-twistie");
                let twistie = if is_folder { twistie.class("collapsible") } else { twistie };
                dom.add(id, twistie);
                id
            })
            .collect()
    })
}

/// Explorer row node without its twistie
pub fn row_node(session: &Session, index: usize, row: &Row) -> MockNode {
    let mut node = MockNode::new("div")
        .class("monaco-list-row")
        .attr("role", "treeitem")
        .attr("aria-label", row.label)
        .attr("aria-level", row.level.to_string())
        .attr("data-index", index.to_string())
        .answers(
            session
                .build("DefaultTreeSection.rowWithLabel", &[row.label])
                .unwrap(),
        );
    if row.folder {
        node = node.attr("aria-expanded", "true");
    }
    node
}
