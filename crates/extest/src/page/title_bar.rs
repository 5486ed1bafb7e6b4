//! Custom title bar: menu bar entries, window title and window controls.

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::element::Element;
use crate::page::menu::ContextMenu;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use async_trait::async_trait;

/// The title bar
#[derive(Debug, Clone)]
pub struct TitleBar {
    element: Element,
}

/// A top-level menu such as File or Edit
#[derive(Debug, Clone)]
pub struct TitleBarItem {
    element: Element,
}

/// Minimize, maximize, restore and close buttons
#[derive(Debug, Clone)]
pub struct WindowControls {
    element: Element,
}

page_object!(TitleBar, TitleBarItem, WindowControls);

impl TitleBar {
    /// Locate the title bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("TitleBar.constructor").await?,
        })
    }

    /// Window title
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.child("TitleBar.title").await?.text().await
    }

    /// Every menu entry
    pub async fn items(&self) -> ExtestResult<Vec<TitleBarItem>> {
        Ok(self
            .element
            .children("TitleBar.itemElement")
            .await?
            .into_iter()
            .map(|element| TitleBarItem { element })
            .collect())
    }

    /// The menu entry with this label
    pub async fn item(&self, label: &str) -> ExtestResult<Option<TitleBarItem>> {
        let found = self
            .element
            .children_with("TitleBar.itemConstructor", &[label])
            .await?;
        Ok(found.into_iter().next().map(|element| TitleBarItem { element }))
    }

    /// Labels of every menu entry
    pub async fn item_labels(&self) -> ExtestResult<Vec<String>> {
        let mut labels = Vec::new();
        for item in self.items().await? {
            labels.push(item.label().await?);
        }
        Ok(labels)
    }

    /// Open a menu and walk a path through it
    pub async fn select(&self, path: &[&str]) -> ExtestResult<()> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(());
        };
        let item = self
            .item(first)
            .await?
            .ok_or_else(|| ExtestError::not_found(*first))?;
        let menu = item.select().await?;
        if !rest.is_empty() {
            menu.select(rest).await?;
        }
        Ok(())
    }

    /// The window control buttons
    pub async fn window_controls(&self) -> ExtestResult<WindowControls> {
        Ok(WindowControls {
            element: self.element.child("WindowControls.constructor").await?,
        })
    }
}

impl TitleBarItem {
    /// Menu label
    pub async fn label(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("TitleBar.itemLabel")
            .await?
            .unwrap_or_default())
    }

    /// Open the menu
    pub async fn select(&self) -> ExtestResult<ContextMenu> {
        self.open_context_menu().await
    }
}

#[async_trait]
impl HasContextMenu for TitleBarItem {
    /// Menu bar entries open on a plain click
    async fn open_context_menu(&self) -> ExtestResult<ContextMenu> {
        if ContextMenu::is_open(self.session()).await? {
            ContextMenu::dismiss(self.session()).await?;
        }
        self.element.click().await?;
        ContextMenu::wait_open(self.session(), None).await
    }
}

impl WindowControls {
    async fn press(&self, path: &str) -> ExtestResult<()> {
        self.element.child(path).await?.click().await
    }

    /// Minimize the window
    pub async fn minimize(&self) -> ExtestResult<()> {
        self.press("WindowControls.minimize").await
    }

    /// Maximize the window
    pub async fn maximize(&self) -> ExtestResult<()> {
        self.press("WindowControls.maximize").await
    }

    /// Restore a maximized window
    pub async fn restore(&self) -> ExtestResult<()> {
        self.press("WindowControls.restore").await
    }

    /// Close the window
    pub async fn close(&self) -> ExtestResult<()> {
        self.press("WindowControls.close").await
    }

    /// Whether the restore button is showing
    pub async fn is_maximized(&self) -> ExtestResult<bool> {
        match self.element.children("WindowControls.restore").await?.into_iter().next() {
            Some(restore) => restore.is_displayed().await,
            None => Ok(false),
        }
    }
}
