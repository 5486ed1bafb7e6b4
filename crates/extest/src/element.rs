//! Element base - a located DOM node plus the scope it was found in.
//!
//! Locating is eager: [`Element::locate`] performs exactly one find against
//! its enclosing scope and fails with [`ExtestError::ElementNotFound`] when
//! nothing matches. Every later call re-queries the live UI through the
//! captured handle, so a node that has since been removed surfaces
//! [`ExtestError::StaleElement`].

use crate::driver::ElementHandle;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use extest_locators::Selector;
use std::sync::Arc;
use tracing::debug;

/// A live, re-resolvable handle to one UI element
#[derive(Debug, Clone)]
pub struct Element {
    session: Session,
    handle: ElementHandle,
    enclosing: Option<Arc<Element>>,
    selector: Option<Selector>,
}

impl Element {
    /// Find the first element matching `selector` below `enclosing`, or in
    /// the current document when `enclosing` is `None`
    pub async fn locate(
        session: &Session,
        selector: Selector,
        enclosing: Option<&Self>,
    ) -> ExtestResult<Self> {
        let scope = enclosing.map(|e| &e.handle);
        let handle = session
            .driver()
            .find_elements(scope, &selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ExtestError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        Ok(Self {
            session: session.clone(),
            handle,
            enclosing: enclosing.map(|e| Arc::new(e.clone())),
            selector: Some(selector),
        })
    }

    /// Every element matching `selector` below `enclosing`; an empty list is
    /// not an error
    pub async fn locate_all(
        session: &Session,
        selector: &Selector,
        enclosing: Option<&Self>,
    ) -> ExtestResult<Vec<Self>> {
        let scope = enclosing.map(|e| &e.handle);
        let handles = session.driver().find_elements(scope, selector).await?;
        let parent = enclosing.map(|e| Arc::new(e.clone()));
        Ok(handles
            .into_iter()
            .map(|handle| Self {
                session: session.clone(),
                handle,
                enclosing: parent.clone(),
                selector: Some(selector.clone()),
            })
            .collect())
    }

    /// Wrap a handle that was already resolved elsewhere
    #[must_use]
    pub fn adopt(session: &Session, handle: ElementHandle, enclosing: Option<&Self>) -> Self {
        Self {
            session: session.clone(),
            handle,
            enclosing: enclosing.map(|e| Arc::new(e.clone())),
            selector: None,
        }
    }

    /// Block until the element is displayed.
    ///
    /// Uses the session's element budget when `timeout_ms` is `None`.
    pub async fn wait(self, timeout_ms: Option<u64>) -> ExtestResult<Self> {
        let options = self.session.wait_options(timeout_ms);
        let description = match &self.selector {
            Some(selector) => format!("{selector} to be displayed"),
            None => format!("element {} to be displayed", self.handle.id),
        };
        wait_until(&options, &description, || async {
            Ok(self.is_displayed().await?.then_some(()))
        })
        .await?;
        Ok(self)
    }

    /// Session this element belongs to
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Driver-side handle
    #[must_use]
    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Selector the element was located with, if any
    #[must_use]
    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    /// Scope this element was located in
    #[must_use]
    pub fn enclosing_element(&self) -> Option<&Self> {
        self.enclosing.as_deref()
    }

    /// First descendant matching a raw selector
    pub async fn find(&self, selector: Selector) -> ExtestResult<Self> {
        Self::locate(&self.session, selector, Some(self)).await
    }

    /// Every descendant matching a raw selector
    pub async fn find_all(&self, selector: &Selector) -> ExtestResult<Vec<Self>> {
        Self::locate_all(&self.session, selector, Some(self)).await
    }

    /// First descendant matching the selector at a locator path
    pub async fn child(&self, path: &str) -> ExtestResult<Self> {
        self.find(self.session.selector(path)?).await
    }

    /// Every descendant matching the selector at a locator path
    pub async fn children(&self, path: &str) -> ExtestResult<Vec<Self>> {
        self.find_all(&self.session.selector(path)?).await
    }

    /// First descendant matching a built selector
    pub async fn child_with(&self, path: &str, args: &[&str]) -> ExtestResult<Self> {
        self.find(self.session.build(path, args)?).await
    }

    /// Every descendant matching a built selector
    pub async fn children_with(&self, path: &str, args: &[&str]) -> ExtestResult<Vec<Self>> {
        self.find_all(&self.session.build(path, args)?).await
    }

    /// Whether at least one descendant matches the selector at a locator path
    pub async fn has_child(&self, path: &str) -> ExtestResult<bool> {
        Ok(!self.children(path).await?.is_empty())
    }

    /// Raw attribute value
    pub async fn attribute(&self, name: &str) -> ExtestResult<Option<String>> {
        self.session.driver().attribute(&self.handle, name).await
    }

    /// Value of the attribute named at a locator path
    pub async fn attribute_at(&self, path: &str) -> ExtestResult<Option<String>> {
        let name = self.session.attribute(path)?;
        self.attribute(name).await
    }

    /// Rendered text
    pub async fn text(&self) -> ExtestResult<String> {
        self.session.driver().text(&self.handle).await
    }

    /// Tag name
    pub async fn tag_name(&self) -> ExtestResult<String> {
        self.session.driver().tag_name(&self.handle).await
    }

    /// Whether the element is rendered visibly
    pub async fn is_displayed(&self) -> ExtestResult<bool> {
        self.session.driver().is_displayed(&self.handle).await
    }

    /// Whether the element accepts input
    pub async fn is_enabled(&self) -> ExtestResult<bool> {
        self.session.driver().is_enabled(&self.handle).await
    }

    /// Whether the element is selected
    pub async fn is_selected(&self) -> ExtestResult<bool> {
        self.session.driver().is_selected(&self.handle).await
    }

    /// Whether the class list contains `name`
    pub async fn has_class(&self, name: &str) -> ExtestResult<bool> {
        Ok(self
            .attribute("class")
            .await?
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name)))
    }

    /// Whether the class list contains the literal at a locator path
    pub async fn has_class_at(&self, path: &str) -> ExtestResult<bool> {
        let name = self.session.text(path)?;
        self.has_class(name).await
    }

    /// Left click
    pub async fn click(&self) -> ExtestResult<()> {
        debug!(element = %self.handle.id, "click");
        self.session.driver().click(&self.handle).await
    }

    /// Right click
    pub async fn right_click(&self) -> ExtestResult<()> {
        debug!(element = %self.handle.id, "context click");
        self.session.driver().context_click(&self.handle).await
    }

    /// Double click
    pub async fn double_click(&self) -> ExtestResult<()> {
        self.session.driver().double_click(&self.handle).await
    }

    /// Move the pointer over the element
    pub async fn hover(&self) -> ExtestResult<()> {
        self.session.driver().hover(&self.handle).await
    }

    /// Type into the element
    pub async fn send_keys(&self, keys: &str) -> ExtestResult<()> {
        self.session
            .driver()
            .send_keys(Some(&self.handle), keys)
            .await
    }

    /// Clear an input
    pub async fn clear(&self) -> ExtestResult<()> {
        self.session.driver().clear(&self.handle).await
    }
}
