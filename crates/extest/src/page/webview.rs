//! Webviews: editor-area panels and side bar views rendered in iframes.
//!
//! Both kinds host their content two frames deep; [`HasWebviewFrame`] steps
//! through the outer iframe into the active frame and back out.

use crate::capability::{page_object, FrameSwitch, HasWebviewFrame, PageObject};
use crate::element::Element;
use crate::result::ExtestResult;
use crate::session::Session;
use async_trait::async_trait;

/// A webview opened as an editor
#[derive(Debug)]
pub struct WebView {
    element: Element,
    frames: FrameSwitch,
}

/// A webview contributed to the side bar or panel
#[derive(Debug)]
pub struct WebviewView {
    element: Element,
    frames: FrameSwitch,
}

page_object!(WebView, WebviewView);

impl WebView {
    /// Wrap the webview container of the active editor
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self::from_container(session.find("WebView.container").await?))
    }

    pub(crate) fn from_container(element: Element) -> Self {
        Self {
            element,
            frames: FrameSwitch::new(),
        }
    }
}

#[async_trait]
impl HasWebviewFrame for WebView {
    fn frame_switch(&self) -> &FrameSwitch {
        &self.frames
    }

    /// The iframe is rendered outside the container, keyed by its id
    async fn frame_element(&self) -> ExtestResult<Element> {
        let id = self
            .element
            .attribute_at("WebView.idAttribute")
            .await?
            .unwrap_or_default();
        let selector = self.session().build("WebView.iframe", &[&id])?;
        Element::locate(self.session(), selector, None).await
    }
}

impl WebviewView {
    /// Wrap the webview hosted by the side bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("SideBarView.constructor").await?,
            frames: FrameSwitch::new(),
        })
    }
}

#[async_trait]
impl HasWebviewFrame for WebviewView {
    fn frame_switch(&self) -> &FrameSwitch {
        &self.frames
    }

    async fn frame_element(&self) -> ExtestResult<Element> {
        let selector = self.session().selector("WebviewView.iframe")?;
        Element::locate(self.session(), selector, None).await
    }
}
