//! AutomationDriver - the capability every page object is built on
//!
//! The driver finds elements, interacts with them and moves focus between
//! frames and windows. Page objects never talk to a browser protocol directly,
//! so any WebDriver client can sit behind this trait; [`crate::mock::MockDriver`]
//! is an in-memory implementation for tests.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────┐
//! │ Page objects │───►│ Element      │───►│ dyn AutomationDriver │
//! │              │    │ (scope chain)│    │ (one call at a time) │
//! └──────────────┘    └──────────────┘    └──────────────────────┘
//! ```

use crate::result::ExtestResult;
use async_trait::async_trait;
use extest_locators::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque driver-side identity of a DOM node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver element reference
    pub id: String,
    /// Element tag name
    pub tag_name: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// WebDriver special keys, sent as Unicode private-use code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Releases held modifiers
    Null,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Enter
    Enter,
    /// Shift modifier
    Shift,
    /// Control modifier
    Control,
    /// Alt modifier
    Alt,
    /// Escape
    Escape,
    /// Space bar
    Space,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// End
    End,
    /// Home
    Home,
    /// Left arrow
    ArrowLeft,
    /// Up arrow
    ArrowUp,
    /// Right arrow
    ArrowRight,
    /// Down arrow
    ArrowDown,
    /// Delete
    Delete,
    /// F1
    F1,
    /// Meta / Command modifier
    Meta,
}

impl Key {
    /// WebDriver code point for this key
    #[must_use]
    pub const fn code_point(self) -> char {
        match self {
            Self::Null => '\u{E000}',
            Self::Backspace => '\u{E003}',
            Self::Tab => '\u{E004}',
            Self::Enter => '\u{E007}',
            Self::Shift => '\u{E008}',
            Self::Control => '\u{E009}',
            Self::Alt => '\u{E00A}',
            Self::Escape => '\u{E00C}',
            Self::Space => '\u{E00D}',
            Self::PageUp => '\u{E00E}',
            Self::PageDown => '\u{E00F}',
            Self::End => '\u{E010}',
            Self::Home => '\u{E011}',
            Self::ArrowLeft => '\u{E012}',
            Self::ArrowUp => '\u{E013}',
            Self::ArrowRight => '\u{E014}',
            Self::ArrowDown => '\u{E015}',
            Self::Delete => '\u{E017}',
            Self::F1 => '\u{E031}',
            Self::Meta => '\u{E03D}',
        }
    }

    /// Modifiers held while `keys` are typed, then released
    #[must_use]
    pub fn chord(modifiers: &[Self], keys: &str) -> String {
        let mut out: String = modifiers.iter().map(|k| k.code_point()).collect();
        out.push_str(keys);
        out.push(Self::Null.code_point());
        out
    }

    /// Control on Linux and Windows, Command on macOS
    #[must_use]
    pub const fn primary_modifier() -> Self {
        if cfg!(target_os = "macos") {
            Self::Meta
        } else {
            Self::Control
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_point())
    }
}

/// Browser automation capability consumed by every page object.
///
/// Calls are issued strictly one at a time per session. Operations on a handle
/// whose node has been removed fail with [`crate::ExtestError::StaleElement`].
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// Every element matching `selector`, searched below `scope` or in the
    /// current document when `scope` is `None`
    async fn find_elements(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> ExtestResult<Vec<ElementHandle>>;

    /// Left click
    async fn click(&self, element: &ElementHandle) -> ExtestResult<()>;

    /// Right click
    async fn context_click(&self, element: &ElementHandle) -> ExtestResult<()>;

    /// Double click
    async fn double_click(&self, element: &ElementHandle) -> ExtestResult<()>;

    /// Move the pointer over the element
    async fn hover(&self, element: &ElementHandle) -> ExtestResult<()>;

    /// Type into the element, or into the focused element when `None`
    async fn send_keys(&self, element: Option<&ElementHandle>, keys: &str) -> ExtestResult<()>;

    /// Clear an input
    async fn clear(&self, element: &ElementHandle) -> ExtestResult<()>;

    /// Rendered text
    async fn text(&self, element: &ElementHandle) -> ExtestResult<String>;

    /// Attribute value, `None` when absent
    async fn attribute(&self, element: &ElementHandle, name: &str)
        -> ExtestResult<Option<String>>;

    /// Tag name
    async fn tag_name(&self, element: &ElementHandle) -> ExtestResult<String>;

    /// Whether the element is rendered visibly
    async fn is_displayed(&self, element: &ElementHandle) -> ExtestResult<bool>;

    /// Whether the element accepts input
    async fn is_enabled(&self, element: &ElementHandle) -> ExtestResult<bool>;

    /// Whether an option or checkbox is selected
    async fn is_selected(&self, element: &ElementHandle) -> ExtestResult<bool>;

    /// Move focus into a frame, or back to the top document when `None`
    async fn switch_to_frame(&self, frame: Option<&ElementHandle>) -> ExtestResult<()>;

    /// Handle of the current window
    async fn window_handle(&self) -> ExtestResult<String>;

    /// Move focus to a window (and its top document)
    async fn switch_to_window(&self, handle: &str) -> ExtestResult<()>;

    /// Run a script in the current document
    async fn execute_script(
        &self,
        script: &str,
        args: &[ElementHandle],
    ) -> ExtestResult<serde_json::Value>;
}
