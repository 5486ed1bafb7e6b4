//! Tree and list traversal over virtualized rows.
//!
//! The workbench renders trees as a flat list of rows and only keeps the
//! rows near the scroll position in the DOM. Parent, child and sibling
//! relationships are therefore rebuilt from three numbers each row carries
//! (flat index, level and set size) and never from DOM nesting.
//!
//! ```text
//! index  level            child_rows(parent = 0)
//!   0      1   src         ─┐
//!   1      2     lib.rs     ├─ collected (level 2)
//!   2      3       mod.rs   │  skipped (grandchild)
//!   3      2     main.rs    ├─ collected
//!   4      1   Cargo.toml  ─┘  stop (back at level 1)
//! ```

use crate::capability::PageObject;
use crate::driver::Key;
use crate::element::Element;
use crate::page::side_bar::{ViewItemAction, ViewSection};
use crate::result::{ExtestError, ExtestResult};
use async_trait::async_trait;
use std::str::FromStr;
use tracing::{debug, warn};

/// Position facts read from one rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFacts {
    /// Position in the flat render order
    pub index: usize,
    /// Depth in the logical tree
    pub level: u32,
    /// Number of siblings at this level, when the UI reports it
    pub set_size: Option<u32>,
    /// One-based position among those siblings, when reported
    pub position: Option<u32>,
}

fn number<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

impl RowFacts {
    /// Facts for a row with the given index and level
    #[must_use]
    pub const fn new(index: usize, level: u32) -> Self {
        Self {
            index,
            level,
            set_size: None,
            position: None,
        }
    }

    /// Attach sibling counts
    #[must_use]
    pub const fn with_siblings(mut self, position: u32, set_size: u32) -> Self {
        self.position = Some(position);
        self.set_size = Some(set_size);
        self
    }

    /// Read the facts through the attribute names in the session table.
    ///
    /// Rows without a level attribute (flat lists) report level 0.
    pub async fn read(row: &Element) -> ExtestResult<Self> {
        Ok(Self {
            index: number(row.attribute_at("ViewSection.index").await?).unwrap_or_default(),
            level: number(row.attribute_at("ViewSection.level").await?).unwrap_or_default(),
            set_size: number(row.attribute_at("ViewSection.setSize").await?),
            position: number(row.attribute_at("ViewSection.position").await?),
        })
    }

    /// Whether this row is the last of its siblings
    #[must_use]
    pub fn is_last_sibling(&self) -> bool {
        matches!((self.position, self.set_size), (Some(p), Some(s)) if p >= s)
    }
}

/// Outcome of scanning for a parent's children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChildScan {
    /// Positions of the children within the scanned slice, ascending
    pub positions: Vec<usize>,
    /// Whether the scan saw the end of the subtree, either by reaching a row
    /// back at the parent's level or by collecting the last sibling
    pub complete: bool,
}

/// Children of the row at `parent` in a flat run of rows.
///
/// Scans forward from the parent: rows deeper than one level below it are
/// skipped, the first row at or above the parent's level ends the subtree,
/// and rows exactly one level below are collected.
#[must_use]
pub fn child_rows(rows: &[RowFacts], parent: usize) -> ChildScan {
    let Some(parent_row) = rows.get(parent) else {
        return ChildScan::default();
    };
    let child_level = parent_row.level + 1;
    let mut scan = ChildScan::default();
    for (position, row) in rows.iter().enumerate().skip(parent + 1) {
        if row.level <= parent_row.level {
            scan.complete = true;
            break;
        }
        if row.level == child_level {
            scan.positions.push(position);
        }
    }
    if !scan.complete {
        scan.complete = scan
            .positions
            .last()
            .is_some_and(|last| rows[*last].is_last_sibling());
    }
    scan
}

/// Index of the first candidate at `max_level` or shallower; 0 disables the filter
#[must_use]
pub fn first_within_level(levels: impl IntoIterator<Item = u32>, max_level: u32) -> Option<usize> {
    levels
        .into_iter()
        .position(|level| max_level == 0 || level <= max_level)
}

/// A row of a tree section
#[async_trait]
pub trait TreeItem: PageObject + Sized + Send + Sync {
    /// Locator path of the row selector for this kind of tree
    const ROW: &'static str;

    /// Wrap a located row
    fn from_row(row: Element) -> Self;

    /// Visible label
    async fn label(&self) -> ExtestResult<String>;

    /// Index, level and sibling counts
    async fn facts(&self) -> ExtestResult<RowFacts> {
        RowFacts::read(self.element()).await
    }

    /// Whether the row can be expanded
    async fn is_expandable(&self) -> ExtestResult<bool> {
        let Some(twistie) = self.element().children("TreeItem.twistie").await?.into_iter().next()
        else {
            return Ok(false);
        };
        twistie.has_class_at("TreeItem.collapsibleClass").await
    }

    /// Whether the row is expanded
    async fn is_expanded(&self) -> ExtestResult<bool> {
        Ok(self.element().attribute_at("TreeItem.expanded").await?.as_deref() == Some("true"))
    }

    /// Expand a collapsed row; leaves are left alone
    async fn expand(&self) -> ExtestResult<()> {
        if self.is_expandable().await? && !self.is_expanded().await? {
            self.element().click().await?;
        }
        Ok(())
    }

    /// Collapse an expanded row
    async fn collapse(&self) -> ExtestResult<()> {
        if self.is_expandable().await? && self.is_expanded().await? {
            self.element().click().await?;
        }
        Ok(())
    }

    /// Whether the row has children to show
    async fn has_children(&self) -> ExtestResult<bool> {
        self.is_expandable().await
    }

    /// Expand the row and collect the rendered rows one level below it
    async fn children(&self) -> ExtestResult<Vec<Self>> {
        self.expand().await?;
        let own = self.facts().await?;
        let rows = match self.element().enclosing_element() {
            Some(scope) => scope.children(Self::ROW).await?,
            None => self.session().find_all(Self::ROW).await?,
        };
        let mut facts = Vec::with_capacity(rows.len());
        for row in &rows {
            facts.push(RowFacts::read(row).await?);
        }
        let Some(parent) = facts.iter().position(|f| f.index == own.index) else {
            return Ok(Vec::new());
        };
        let scan = child_rows(&facts, parent);
        if !scan.complete {
            debug!(
                index = own.index,
                found = scan.positions.len(),
                "Children may extend past the rendered rows"
            );
        }
        Ok(rows
            .into_iter()
            .enumerate()
            .filter(|(position, _)| scan.positions.binary_search(position).is_ok())
            .map(|(_, row)| Self::from_row(row))
            .collect())
    }

    /// The child with this label
    async fn find_child_item(&self, label: &str) -> ExtestResult<Option<Self>> {
        for child in self.children().await? {
            if child.label().await? == label {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Click the row
    async fn select(&self) -> ExtestResult<()> {
        self.element().click().await
    }

    /// Inline action buttons, revealed by hovering the row
    async fn action_buttons(&self) -> ExtestResult<Vec<ViewItemAction>> {
        self.element().hover().await?;
        let Some(container) = self.element().children("TreeItem.actions").await?.into_iter().next()
        else {
            return Ok(Vec::new());
        };
        Ok(container
            .children("TreeItem.actionLabel")
            .await?
            .into_iter()
            .map(ViewItemAction::new)
            .collect())
    }

    /// The inline action button with this title
    async fn action_button(&self, title: &str) -> ExtestResult<Option<ViewItemAction>> {
        for action in self.action_buttons().await? {
            if action.title().await? == title {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }
}

/// A side bar section rendering a virtualized tree or list
#[async_trait]
pub trait TreeSection: Sync {
    /// Row type of this section
    type Item: TreeItem;

    /// Locator path of the builder matching a row by label
    const ROW_WITH_LABEL: &'static str;

    /// The section's header and body
    fn section(&self) -> &ViewSection;

    /// The scrolling list holding the rows
    async fn row_list(&self) -> ExtestResult<Element> {
        self.section().element().child("ViewSection.rowList").await
    }

    /// Every currently rendered row
    async fn visible_items(&self) -> ExtestResult<Vec<Self::Item>> {
        let list = self.row_list().await?;
        Ok(list
            .children(<Self::Item as TreeItem>::ROW)
            .await?
            .into_iter()
            .map(<Self::Item as TreeItem>::from_row)
            .collect())
    }

    /// Find a row by label, paging through the list from the top.
    ///
    /// With `max_level > 0` only rows at that depth or shallower match.
    /// Paging stops at the end-of-list marker row or once
    /// `Timeouts::max_pages` pages have been read, so at most
    /// `max_pages - 1` PageDown presses are sent.
    async fn find_item(&self, label: &str, max_level: u32) -> ExtestResult<Option<Self::Item>> {
        self.section().expand().await?;
        let list = self.row_list().await?;
        let max_pages = list.session().timeouts().max_pages.max(1);
        list.send_keys(&Key::Home.to_string()).await?;
        for page in 1..=max_pages {
            let candidates = list.children_with(Self::ROW_WITH_LABEL, &[label]).await?;
            let mut levels = Vec::with_capacity(candidates.len());
            for row in &candidates {
                levels.push(RowFacts::read(row).await?.level);
            }
            if let Some(found) = first_within_level(levels, max_level) {
                return Ok(candidates.into_iter().nth(found).map(<Self::Item as TreeItem>::from_row));
            }
            if reached_end(&list, <Self::Item as TreeItem>::ROW).await? {
                debug!(label, page, "Reached the end of the list");
                return Ok(None);
            }
            if page < max_pages {
                list.send_keys(&Key::PageDown.to_string()).await?;
            }
        }
        warn!(label, max_pages, "Stopped paging before the end of the list");
        Ok(None)
    }

    /// Walk a path of labels, expanding one level at a time, and return the
    /// children of the last segment.
    ///
    /// When a segment has no children it is selected, the rest of the path
    /// is ignored and an empty list is returned. A label missing from a
    /// non-empty child list fails with [`ExtestError::ItemNotFound`].
    async fn open_item(&self, path: &[&str]) -> ExtestResult<Vec<Self::Item>> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(Vec::new());
        };
        let mut current = self
            .find_item(first, 1)
            .await?
            .ok_or_else(|| ExtestError::not_found(*first))?;
        for segment in rest {
            let children = current.children().await?;
            if children.is_empty() {
                debug!(segment, "Path continues past an item without children");
                current.select().await?;
                return Ok(Vec::new());
            }
            let mut next = None;
            for child in children {
                if child.label().await? == *segment {
                    next = Some(child);
                    break;
                }
            }
            current = next.ok_or_else(|| ExtestError::not_found(*segment))?;
        }
        let children = current.children().await?;
        if children.is_empty() {
            current.select().await?;
        }
        Ok(children)
    }
}

/// Whether a rendered row carries the end-of-list marker
async fn reached_end(list: &Element, row_path: &str) -> ExtestResult<bool> {
    for row in list.children(row_path).await? {
        if row.attribute_at("ViewSection.lastRowAttribute").await?.as_deref() == Some("true") {
            return Ok(true);
        }
    }
    Ok(false)
}
