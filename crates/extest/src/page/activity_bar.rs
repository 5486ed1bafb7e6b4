//! Activity bar: view switchers and the global actions at the bottom.

use crate::capability::{open_context_menu_on, page_object, HasContextMenu, PageObject};
use crate::element::Element;
use crate::page::menu::ContextMenu;
use crate::page::side_bar::SideBarView;
use crate::result::ExtestResult;
use crate::session::Session;
use async_trait::async_trait;

/// The activity bar
#[derive(Debug, Clone)]
pub struct ActivityBar {
    element: Element,
}

/// A view switcher such as Explorer or Extensions
#[derive(Debug, Clone)]
pub struct ViewControl {
    element: Element,
}

/// A global action such as Manage or Accounts
#[derive(Debug, Clone)]
pub struct ActionsControl {
    element: Element,
}

page_object!(ActivityBar, ViewControl, ActionsControl);

impl HasContextMenu for ActivityBar {}
impl HasContextMenu for ViewControl {}

impl ActivityBar {
    /// Locate the activity bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("ActivityBar.constructor").await?,
        })
    }

    /// Every view switcher
    pub async fn view_controls(&self) -> ExtestResult<Vec<ViewControl>> {
        let container = self.element.child("ActivityBar.viewContainer").await?;
        Ok(container
            .children("ActivityBar.actionItem")
            .await?
            .into_iter()
            .map(|element| ViewControl { element })
            .collect())
    }

    /// The view switcher whose title starts with `name`
    pub async fn view_control(&self, name: &str) -> ExtestResult<Option<ViewControl>> {
        let container = self.element.child("ActivityBar.viewContainer").await?;
        let found = container.children_with("ActivityBar.itemByTitle", &[name]).await?;
        Ok(found.into_iter().next().map(|element| ViewControl { element }))
    }

    /// Every global action
    pub async fn global_actions(&self) -> ExtestResult<Vec<ActionsControl>> {
        let container = self.element.child("ActivityBar.actionsContainer").await?;
        Ok(container
            .children("ActivityBar.actionItem")
            .await?
            .into_iter()
            .map(|element| ActionsControl { element })
            .collect())
    }

    /// The global action whose title starts with `name`
    pub async fn global_action(&self, name: &str) -> ExtestResult<Option<ActionsControl>> {
        let container = self.element.child("ActivityBar.actionsContainer").await?;
        let found = container.children_with("ActivityBar.itemByTitle", &[name]).await?;
        Ok(found.into_iter().next().map(|element| ActionsControl { element }))
    }
}

async fn title_of(element: &Element) -> ExtestResult<String> {
    Ok(element
        .attribute_at("ActivityBar.label")
        .await?
        .unwrap_or_default())
}

impl ViewControl {
    /// Title, e.g. "Explorer (Ctrl+Shift+E)"
    pub async fn title(&self) -> ExtestResult<String> {
        title_of(&self.element).await
    }

    /// Whether this view is the one shown
    pub async fn is_active(&self) -> ExtestResult<bool> {
        self.element.has_class_at("ViewControl.activeClass").await
    }

    /// Show the view and return the side bar
    pub async fn open_view(&self) -> ExtestResult<SideBarView> {
        if !self.is_active().await? {
            self.element.click().await?;
        }
        let side_bar = SideBarView::new(self.session()).await?;
        side_bar.element().clone().wait(None).await?;
        Ok(side_bar)
    }

    /// Hide the view if it is shown
    pub async fn close_view(&self) -> ExtestResult<()> {
        if self.is_active().await? {
            self.element.click().await?;
        }
        Ok(())
    }

    /// Badge text, e.g. a pending change count
    pub async fn badge(&self) -> ExtestResult<Option<String>> {
        match self.element.children("ViewControl.badge").await?.into_iter().next() {
            Some(badge) => Ok(Some(badge.text().await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl HasContextMenu for ActionsControl {
    /// Global actions open their menu on a plain click
    async fn open_context_menu(&self) -> ExtestResult<ContextMenu> {
        self.element.click().await?;
        match ContextMenu::wait_open(self.session(), None).await {
            Ok(menu) => Ok(menu),
            Err(e) if e.is_retryable() => open_context_menu_on(&self.element).await,
            Err(e) => Err(e),
        }
    }
}

impl ActionsControl {
    /// Title, e.g. "Manage"
    pub async fn title(&self) -> ExtestResult<String> {
        title_of(&self.element).await
    }

    /// Open the action's menu
    pub async fn open_action_menu(&self) -> ExtestResult<ContextMenu> {
        self.open_context_menu().await
    }
}
