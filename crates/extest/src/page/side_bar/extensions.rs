//! The extensions view: search box and extension rows.

use super::ViewSection;
use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::page::menu::ContextMenu;
use crate::result::ExtestResult;
use crate::rows::{TreeItem, TreeSection};
use crate::wait::wait_until;
use async_trait::async_trait;
use std::time::Duration;

/// A section listing extensions
#[derive(Debug, Clone)]
pub struct ExtensionsViewSection {
    section: ViewSection,
}

/// One extension row
#[derive(Debug, Clone)]
pub struct ExtensionsViewItem {
    element: Element,
}

page_object!(@section ExtensionsViewSection);
page_object!(ExtensionsViewItem);

impl HasContextMenu for ExtensionsViewItem {}

impl ExtensionsViewSection {
    pub(crate) const fn new(section: ViewSection) -> Self {
        Self { section }
    }

    async fn search_box(&self) -> ExtestResult<Element> {
        match self.element().enclosing_element() {
            Some(content) => content.child("ExtensionsViewSection.searchBox").await,
            None => self.session().find("ExtensionsViewSection.searchBox").await,
        }
    }

    /// Text currently in the search box
    pub async fn search_text(&self) -> ExtestResult<String> {
        let scope = match self.element().enclosing_element() {
            Some(content) => content.clone(),
            None => self.session().find("SideBarView.constructor").await?,
        };
        scope.child("ExtensionsViewSection.searchText").await?.text().await
    }

    /// Replace the search box text and let the list refresh
    pub async fn search(&self, text: &str) -> ExtestResult<()> {
        let search_box = self.search_box().await?;
        search_box
            .send_keys(&Key::chord(&[Key::primary_modifier()], "a"))
            .await?;
        search_box.send_keys(&Key::Backspace.to_string()).await?;
        search_box.send_keys(text).await?;
        tokio::time::sleep(Duration::from_millis(self.session().timeouts().settle_ms)).await;
        Ok(())
    }

    /// Search for an extension by title and return its row
    pub async fn find_extension(&self, title: &str) -> ExtestResult<Option<ExtensionsViewItem>> {
        self.search(title).await?;
        self.find_item(title, 0).await
    }
}

impl TreeSection for ExtensionsViewSection {
    type Item = ExtensionsViewItem;
    const ROW_WITH_LABEL: &'static str = "ExtensionsViewSection.rowWithLabel";

    fn section(&self) -> &ViewSection {
        &self.section
    }
}

#[async_trait]
impl TreeItem for ExtensionsViewItem {
    const ROW: &'static str = "ExtensionsViewSection.itemRow";

    fn from_row(row: Element) -> Self {
        Self { element: row }
    }

    async fn label(&self) -> ExtestResult<String> {
        self.element.child("ExtensionsViewSection.itemTitle").await?.text().await
    }

    async fn is_expandable(&self) -> ExtestResult<bool> {
        Ok(false)
    }
}

impl ExtensionsViewItem {
    async fn read(&self, path: &str) -> ExtestResult<String> {
        self.element.child(path).await?.text().await
    }

    /// Installed version
    pub async fn version(&self) -> ExtestResult<String> {
        self.read("ExtensionsViewItem.version").await
    }

    /// Publisher name
    pub async fn author(&self) -> ExtestResult<String> {
        self.read("ExtensionsViewItem.author").await
    }

    /// One-line description
    pub async fn description(&self) -> ExtestResult<String> {
        self.read("ExtensionsViewItem.description").await
    }

    /// Install count as displayed, e.g. "1.2M"
    pub async fn install_count(&self) -> ExtestResult<String> {
        self.read("ExtensionsViewItem.installCount").await
    }

    /// Whether the install button is gone
    pub async fn is_installed(&self) -> ExtestResult<bool> {
        for button in self.element.children("ExtensionsViewItem.install").await? {
            if button.is_displayed().await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Click install and wait for the manage button to appear
    pub async fn install(&self, timeout_ms: Option<u64>) -> ExtestResult<()> {
        if self.is_installed().await? {
            return Ok(());
        }
        self.element.child("ExtensionsViewItem.install").await?.click().await?;
        let options = self.session().wait_options(timeout_ms);
        wait_until(&options, "extension to install", || async {
            let manage = self.element.child("ExtensionsViewItem.manage").await?;
            Ok(manage.is_displayed().await?.then_some(()))
        })
        .await
    }

    /// Open the manage menu
    pub async fn manage(&self) -> ExtestResult<ContextMenu> {
        self.element.child("ExtensionsViewItem.manage").await?.click().await?;
        ContextMenu::wait_open(self.session(), None).await
    }
}
