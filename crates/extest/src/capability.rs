//! Capabilities attached to page objects.
//!
//! Page objects share no common base type. Each wraps one [`Element`] and
//! implements [`PageObject`]; the cross-cutting behaviours are independent
//! traits attached only where the UI supports them:
//!
//! - [`HasContextMenu`]: right click and capture the transient menu
//! - [`HasWebviewFrame`]: move driver focus into an embedded webview and back
//!
//! Tree rows get their own capability in [`crate::rows`].

use crate::driver::Key;
use crate::element::Element;
use crate::page::menu::ContextMenu;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// A typed wrapper around one located element
pub trait PageObject {
    /// The wrapped element
    fn element(&self) -> &Element;

    /// Session the element belongs to
    fn session(&self) -> &Session {
        self.element().session()
    }

    /// Short type name used in diagnostics
    fn page_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Implement [`PageObject`] for structs holding an `element` field, or with
/// `@section` for tree sections wrapping a `section: ViewSection`
macro_rules! page_object {
    (@section $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::capability::PageObject for $ty {
                fn element(&self) -> &$crate::element::Element {
                    $crate::capability::PageObject::element(&self.section)
                }
            }
        )+
    };
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::capability::PageObject for $ty {
                fn element(&self) -> &$crate::element::Element {
                    &self.element
                }
            }
        )+
    };
}
pub(crate) use page_object;

/// Right click a page object and capture the context menu it opens
#[async_trait]
pub trait HasContextMenu: PageObject + Sync {
    /// Open the context menu.
    ///
    /// A menu left open by an earlier stray click is closed first. Attempts are
    /// capped by `Timeouts::context_menu_attempts`.
    async fn open_context_menu(&self) -> ExtestResult<ContextMenu> {
        open_context_menu_on(self.element()).await
    }
}

/// Close-stray-then-reopen policy behind [`HasContextMenu::open_context_menu`]
pub async fn open_context_menu_on(element: &Element) -> ExtestResult<ContextMenu> {
    let session = element.session();
    let timeouts = session.timeouts();
    let attempts = timeouts.context_menu_attempts.max(1);
    for attempt in 1..=attempts {
        if ContextMenu::is_open(session).await? {
            debug!(attempt, "Closing a context menu that was already open");
            ContextMenu::dismiss(session).await?;
        }
        element.right_click().await?;
        match ContextMenu::wait_open(session, Some(timeouts.element_ms)).await {
            Ok(menu) => return Ok(menu),
            Err(e) if e.is_retryable() => {
                warn!(attempt, attempts, error = %e, "Context menu did not open");
            }
            Err(e) => return Err(e),
        }
    }
    Err(ExtestError::Timeout {
        ms: timeouts.element_ms.saturating_mul(u64::from(attempts)),
        waited_for: format!("context menu after {attempts} attempts"),
    })
}

/// Window a page object left when it switched into a webview
#[derive(Debug, Default)]
pub struct FrameSwitch {
    origin: Mutex<Option<String>>,
}

impl FrameSwitch {
    /// Nothing captured yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured originating window
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        self.origin
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Capture `handle` unless a window was captured before; returns the
    /// window that is kept
    pub fn remember(&self, handle: String) -> String {
        self.origin
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(handle)
            .clone()
    }
}

/// Switch driver focus into an embedded webview and back
#[async_trait]
pub trait HasWebviewFrame: PageObject + Sync {
    /// Tracker holding the originating window
    fn frame_switch(&self) -> &FrameSwitch;

    /// The outer iframe hosting the webview, located in the top document
    async fn frame_element(&self) -> ExtestResult<Element>;

    /// Enter the webview's active content frame.
    ///
    /// The originating window is captured on the first switch only, so
    /// [`Self::switch_back`] returns there however many switches happened.
    async fn switch_to_frame(&self, timeout_ms: Option<u64>) -> ExtestResult<()> {
        let session = self.session();
        let driver = session.driver();
        if self.frame_switch().origin().is_none() {
            self.frame_switch().remember(driver.window_handle().await?);
        }
        let frame = self.frame_element().await?;
        driver.switch_to_frame(Some(frame.handle())).await?;
        let options = session.wait_options(timeout_ms);
        let active = wait_until(&options, "active webview frame", || async {
            Ok(session.find_all("WebView.activeFrame").await?.into_iter().next())
        })
        .await?;
        driver.switch_to_frame(Some(active.handle())).await?;
        debug!(page = self.page_name(), frame = %active.handle().id, "Switched into webview");
        Ok(())
    }

    /// Return to the window captured by the first switch
    async fn switch_back(&self) -> ExtestResult<()> {
        let driver = self.session().driver();
        let handle = match self.frame_switch().origin() {
            Some(handle) => handle,
            None => self.frame_switch().remember(driver.window_handle().await?),
        };
        debug!(page = self.page_name(), window = %handle, "Switching back from webview");
        driver.switch_to_window(&handle).await
    }
}

/// Send Escape to whatever has focus
pub(crate) async fn press_escape(session: &Session) -> ExtestResult<()> {
    session
        .driver()
        .send_keys(None, &Key::Escape.to_string())
        .await
}
