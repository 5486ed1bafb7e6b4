//! Context menus and their items, including nested submenus.

use crate::capability::{page_object, press_escape, PageObject};
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use tracing::debug;

/// An open context menu
#[derive(Debug, Clone)]
pub struct ContextMenu {
    element: Element,
}

/// One entry of a context menu
#[derive(Debug, Clone)]
pub struct ContextMenuItem {
    element: Element,
    label: String,
}

page_object!(ContextMenu, ContextMenuItem);

impl ContextMenu {
    /// Whether any context menu is currently displayed
    pub async fn is_open(session: &Session) -> ExtestResult<bool> {
        for view in session.find_all("ContextMenu.contextView").await? {
            if view.is_displayed().await? && view.has_child("ContextMenu.constructor").await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Wait for a context menu to be displayed and capture it
    pub async fn wait_open(session: &Session, timeout_ms: Option<u64>) -> ExtestResult<Self> {
        let options = session.wait_options(timeout_ms);
        wait_until(&options, "context menu to open", || async {
            for view in session.find_all("ContextMenu.contextView").await? {
                if !view.is_displayed().await? {
                    continue;
                }
                if let Some(menu) = view.children("ContextMenu.constructor").await?.into_iter().next() {
                    return Ok(Some(Self { element: menu }));
                }
            }
            Ok(None)
        })
        .await
    }

    /// Close whatever menu is open, clicking the blocking overlay when present
    pub async fn dismiss(session: &Session) -> ExtestResult<()> {
        let mut blocked = false;
        for block in session.find_all("ContextMenu.viewBlock").await? {
            if block.is_displayed().await? {
                block.click().await?;
                blocked = true;
                break;
            }
        }
        if !blocked {
            press_escape(session).await?;
        }
        let options = session.wait_options(Some(session.timeouts().settle_ms));
        wait_until(&options, "context menu to close", || async {
            Ok((!Self::is_open(session).await?).then_some(()))
        })
        .await
    }

    /// Items in display order
    pub async fn items(&self) -> ExtestResult<Vec<ContextMenuItem>> {
        let mut items = Vec::new();
        for element in self.element.children("ContextMenu.itemElement").await? {
            let Some(label) = ContextMenuItem::read_label(&element).await? else {
                continue;
            };
            items.push(ContextMenuItem { element, label });
        }
        Ok(items)
    }

    /// The item with this label, if present
    pub async fn item(&self, label: &str) -> ExtestResult<Option<ContextMenuItem>> {
        let found = self
            .element
            .children_with("ContextMenu.itemConstructor", &[label])
            .await?;
        Ok(found.into_iter().next().map(|element| ContextMenuItem {
            element,
            label: label.to_string(),
        }))
    }

    /// Whether an item with this label is present
    pub async fn has_item(&self, label: &str) -> ExtestResult<bool> {
        Ok(self.item(label).await?.is_some())
    }

    /// Walk a path of labels through nested submenus and select the last one.
    ///
    /// Returns the submenu opened by the final item, if it has one.
    pub async fn select(&self, path: &[&str]) -> ExtestResult<Option<Self>> {
        let mut menu = self.clone();
        for (depth, label) in path.iter().enumerate() {
            let item = menu
                .item(label)
                .await?
                .ok_or_else(|| ExtestError::not_found(*label))?;
            match item.select().await? {
                Some(submenu) => menu = submenu,
                None if depth + 1 == path.len() => return Ok(None),
                None => return Err(ExtestError::not_found(path[depth + 1])),
            }
        }
        Ok(Some(menu))
    }

    /// Close the menu
    pub async fn close(&self) -> ExtestResult<()> {
        Self::dismiss(self.session()).await
    }
}

impl ContextMenuItem {
    async fn read_label(element: &Element) -> ExtestResult<Option<String>> {
        let Some(label) = element.children("ContextMenu.itemLabel").await?.into_iter().next() else {
            return Ok(None);
        };
        Ok(label
            .attribute_at("ContextMenu.itemText")
            .await?
            .filter(|text| !text.is_empty()))
    }

    /// Label shown for the item
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether selecting the item opens a submenu
    pub async fn is_nesting(&self) -> ExtestResult<bool> {
        self.element.has_child("ContextMenu.itemNesting").await
    }

    /// Whether the item can be selected
    pub async fn is_enabled(&self) -> ExtestResult<bool> {
        let Some(label) = self.element.children("ContextMenu.itemLabel").await?.into_iter().next()
        else {
            return Ok(true);
        };
        Ok(!label.has_class_at("ContextMenu.disabledClass").await?)
    }

    /// Click the item; a nesting item yields its submenu
    pub async fn select(&self) -> ExtestResult<Option<ContextMenu>> {
        let nesting = self.is_nesting().await?;
        debug!(label = %self.label, nesting, "Selecting context menu item");
        self.element.click().await?;
        if !nesting {
            return Ok(None);
        }
        let options = self.session().wait_options(None);
        let submenu = wait_until(&options, "submenu to open", || async {
            for menu in self.element.children("ContextMenu.constructor").await? {
                if menu.is_displayed().await? {
                    return Ok(Some(menu));
                }
            }
            Ok(None)
        })
        .await?;
        Ok(Some(ContextMenu { element: submenu }))
    }
}
