//! Explorer trees and extension-contributed trees.

use super::ViewSection;
use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::element::Element;
use crate::result::ExtestResult;
use crate::rows::{TreeItem, TreeSection};
use async_trait::async_trait;

/// The file explorer section
#[derive(Debug, Clone)]
pub struct DefaultTreeSection {
    section: ViewSection,
}

/// A row of the file explorer
#[derive(Debug, Clone)]
pub struct DefaultTreeItem {
    element: Element,
}

/// A tree contributed by an extension
#[derive(Debug, Clone)]
pub struct CustomTreeSection {
    section: ViewSection,
}

/// A row of an extension-contributed tree
#[derive(Debug, Clone)]
pub struct CustomTreeItem {
    element: Element,
}

page_object!(@section DefaultTreeSection, CustomTreeSection);
page_object!(DefaultTreeItem, CustomTreeItem);

impl HasContextMenu for DefaultTreeItem {}
impl HasContextMenu for CustomTreeItem {}

impl DefaultTreeSection {
    pub(crate) const fn new(section: ViewSection) -> Self {
        Self { section }
    }
}

impl TreeSection for DefaultTreeSection {
    type Item = DefaultTreeItem;
    const ROW_WITH_LABEL: &'static str = "DefaultTreeSection.rowWithLabel";

    fn section(&self) -> &ViewSection {
        &self.section
    }
}

#[async_trait]
impl TreeItem for DefaultTreeItem {
    const ROW: &'static str = "DefaultTreeSection.itemRow";

    fn from_row(row: Element) -> Self {
        Self { element: row }
    }

    async fn label(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("DefaultTreeSection.itemLabel")
            .await?
            .unwrap_or_default())
    }
}

impl DefaultTreeItem {
    /// Hover text, usually the full path
    pub async fn tooltip(&self) -> ExtestResult<Option<String>> {
        let Some(label) = self.element.children("DefaultTreeItem.tooltip").await?.into_iter().next()
        else {
            return Ok(None);
        };
        label.attribute_at("DefaultTreeItem.tooltipAttribute").await
    }
}

impl CustomTreeSection {
    pub(crate) const fn new(section: ViewSection) -> Self {
        Self { section }
    }
}

impl TreeSection for CustomTreeSection {
    type Item = CustomTreeItem;
    const ROW_WITH_LABEL: &'static str = "CustomTreeSection.rowWithLabel";

    fn section(&self) -> &ViewSection {
        &self.section
    }
}

#[async_trait]
impl TreeItem for CustomTreeItem {
    const ROW: &'static str = "CustomTreeSection.itemRow";

    fn from_row(row: Element) -> Self {
        Self { element: row }
    }

    async fn label(&self) -> ExtestResult<String> {
        self.element.child("CustomTreeItem.label").await?.text().await
    }
}

impl CustomTreeItem {
    /// Hover text
    pub async fn tooltip(&self) -> ExtestResult<Option<String>> {
        let Some(label) = self.element.children("CustomTreeItem.tooltip").await?.into_iter().next()
        else {
            return Ok(None);
        };
        label.attribute_at("CustomTreeItem.tooltipAttribute").await
    }

    /// Secondary text rendered after the label
    pub async fn description(&self) -> ExtestResult<Option<String>> {
        match self.element.children("CustomTreeItem.description").await?.into_iter().next() {
            Some(description) => Ok(Some(description.text().await?)),
            None => Ok(None),
        }
    }
}
