//! The breakpoints section of the debug view.

use super::ViewSection;
use crate::capability::{page_object, HasContextMenu};
use crate::element::Element;
use crate::result::ExtestResult;
use crate::rows::{TreeItem, TreeSection};
use async_trait::async_trait;

/// Breakpoints list
#[derive(Debug, Clone)]
pub struct DebugBreakpointSection {
    section: ViewSection,
}

/// One breakpoint
#[derive(Debug, Clone)]
pub struct BreakpointSectionItem {
    element: Element,
}

page_object!(@section DebugBreakpointSection);
page_object!(BreakpointSectionItem);

impl HasContextMenu for BreakpointSectionItem {}

impl DebugBreakpointSection {
    pub(crate) const fn new(section: ViewSection) -> Self {
        Self { section }
    }
}

impl TreeSection for DebugBreakpointSection {
    type Item = BreakpointSectionItem;
    const ROW_WITH_LABEL: &'static str = "DebugBreakpointSection.rowWithLabel";

    fn section(&self) -> &ViewSection {
        &self.section
    }
}

#[async_trait]
impl TreeItem for BreakpointSectionItem {
    const ROW: &'static str = "DebugBreakpointSection.itemRow";

    fn from_row(row: Element) -> Self {
        Self { element: row }
    }

    async fn label(&self) -> ExtestResult<String> {
        self.element.child("BreakpointSectionItem.label").await?.text().await
    }

    async fn is_expandable(&self) -> ExtestResult<bool> {
        Ok(false)
    }
}

impl BreakpointSectionItem {
    /// Directory of the file holding the breakpoint
    pub async fn file_path(&self) -> ExtestResult<String> {
        self.element.child("BreakpointSectionItem.filePath").await?.text().await
    }

    /// Line the breakpoint sits on, when the row shows one
    pub async fn line_number(&self) -> ExtestResult<Option<u32>> {
        let text = self.element.child("BreakpointSectionItem.lineNumber").await?.text().await?;
        Ok(text.trim().parse().ok())
    }

    /// Whether the checkbox is ticked
    pub async fn is_enabled(&self) -> ExtestResult<bool> {
        self.element.child("BreakpointSectionItem.checkbox").await?.is_selected().await
    }

    /// Tick or untick the checkbox
    pub async fn set_enabled(&self, enabled: bool) -> ExtestResult<()> {
        let checkbox = self.element.child("BreakpointSectionItem.checkbox").await?;
        if checkbox.is_selected().await? != enabled {
            checkbox.click().await?;
        }
        Ok(())
    }
}
