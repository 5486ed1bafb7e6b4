//! Quick input widgets: the command palette, quick picks and input prompts.
//!
//! Since 1.44 the workbench renders every prompt with the quick-input widget
//! ([`InputBox`]); older builds use the quick-open widget ([`QuickOpenBox`]).
//! Both share [`QuickInput`], which differs only in where the list and rows
//! are found.
//!
//! Quick pick lists are virtualized. [`QuickInput::find_quick_pick`] pages
//! through them from the top, stopping at the row flagged as the last element
//! or once `Timeouts::max_pages` pages have been read.

use crate::capability::{page_object, press_escape, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, warn};

/// The quick-input widget
#[derive(Debug, Clone)]
pub struct InputBox {
    element: Element,
}

/// The quick-open widget of builds before 1.44
#[derive(Debug, Clone)]
pub struct QuickOpenBox {
    element: Element,
}

/// One row of a quick pick list
#[derive(Debug, Clone)]
pub struct QuickPickItem {
    element: Element,
    index: u32,
}

page_object!(InputBox, QuickOpenBox, QuickPickItem);

/// How to pick a quick pick row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickPickQuery {
    /// Row whose label equals the text
    Label(String),
    /// Row at this list index
    Index(u32),
}

impl From<&str> for QuickPickQuery {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<u32> for QuickPickQuery {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for QuickPickQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

impl QuickPickQuery {
    async fn matches(&self, item: &QuickPickItem) -> ExtestResult<bool> {
        match self {
            Self::Index(index) => Ok(item.index == *index),
            Self::Label(label) => Ok(item.label().await? == *label),
        }
    }
}

/// Behaviour shared by both prompt widgets
#[async_trait]
pub trait QuickInput: PageObject + Sync {
    /// Locator path of the list container
    const LIST: &'static str;
    /// Locator path of a list row
    const ROW: &'static str;
    /// Locator path of the busy indicator
    const PROGRESS: &'static str;

    /// The text field
    async fn input(&self) -> ExtestResult<Element> {
        self.element().child("Input.input").await
    }

    /// Current text
    async fn text(&self) -> ExtestResult<String> {
        Ok(self
            .input()
            .await?
            .attribute_at("Input.valueAttribute")
            .await?
            .unwrap_or_default())
    }

    /// Replace the text
    async fn set_text(&self, text: &str) -> ExtestResult<()> {
        let input = self.input().await?;
        input.clear().await?;
        input.send_keys(text).await
    }

    /// Placeholder shown while empty
    async fn placeholder(&self) -> ExtestResult<String> {
        Ok(self
            .input()
            .await?
            .attribute_at("Input.placeholderAttribute")
            .await?
            .unwrap_or_default())
    }

    /// Empty the text field
    async fn clear(&self) -> ExtestResult<()> {
        self.input().await?.clear().await
    }

    /// Press Enter
    async fn confirm(&self) -> ExtestResult<()> {
        self.input().await?.send_keys(&Key::Enter.to_string()).await
    }

    /// Press Escape
    async fn cancel(&self) -> ExtestResult<()> {
        press_escape(self.session()).await
    }

    /// Whether the busy indicator is showing
    async fn has_progress(&self) -> ExtestResult<bool> {
        match self.element().children(Self::PROGRESS).await?.into_iter().next() {
            Some(bar) => bar.is_displayed().await,
            None => Ok(false),
        }
    }

    /// Rows currently rendered
    async fn quick_picks(&self) -> ExtestResult<Vec<QuickPickItem>> {
        let Some(list) = self.element().children(Self::LIST).await?.into_iter().next() else {
            return Ok(Vec::new());
        };
        let mut items = Vec::new();
        for (position, row) in list.children(Self::ROW).await?.into_iter().enumerate() {
            if !row.is_displayed().await? {
                continue;
            }
            let index = row
                .attribute_at("Input.quickPickIndex")
                .await?
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
            items.push(QuickPickItem { element: row, index });
        }
        Ok(items)
    }

    /// Page through the list from the top looking for a row
    async fn find_quick_pick(&self, query: &QuickPickQuery) -> ExtestResult<Option<QuickPickItem>> {
        let input = self.input().await?;
        input.send_keys(&Key::Home.to_string()).await?;
        let max_pages = self.session().timeouts().max_pages.max(1);
        for page in 1..=max_pages {
            let items = self.quick_picks().await?;
            for item in &items {
                if query.matches(item).await? {
                    return Ok(Some(item.clone()));
                }
            }
            if items.is_empty() || reached_end(&items).await? {
                debug!(%query, page, "Quick pick list exhausted");
                return Ok(None);
            }
            if page < max_pages {
                input.send_keys(&Key::PageDown.to_string()).await?;
            }
        }
        warn!(%query, max_pages, "Quick pick search stopped at the page cap");
        Ok(None)
    }

    /// Find a row and click it
    async fn select_quick_pick(&self, query: &QuickPickQuery) -> ExtestResult<()> {
        match self.find_quick_pick(query).await? {
            Some(item) => item.select().await,
            None => Err(ExtestError::not_found(query.to_string())),
        }
    }
}

async fn reached_end(items: &[QuickPickItem]) -> ExtestResult<bool> {
    for item in items {
        if item.element.attribute_at("Input.lastElementAttribute").await?.as_deref() == Some("true") {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Wait for a displayed element at `path`
async fn wait_displayed(session: &Session, path: &str) -> ExtestResult<Element> {
    let options = session.wait_options(None);
    wait_until(&options, path, || async {
        for element in session.find_all(path).await? {
            if element.is_displayed().await? {
                return Ok(Some(element));
            }
        }
        Ok(None)
    })
    .await
}

#[async_trait]
impl QuickInput for InputBox {
    const LIST: &'static str = "Input.quickList";
    const ROW: &'static str = "Input.row";
    const PROGRESS: &'static str = "Input.progress";
}

impl InputBox {
    /// Wait for the widget to show
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: wait_displayed(session, "Input.inputBox").await?,
        })
    }

    /// Validation or hint message under the field
    pub async fn message(&self) -> ExtestResult<String> {
        match self.element.children("Input.message").await?.into_iter().next() {
            Some(message) => message.text().await,
            None => Ok(String::new()),
        }
    }

    /// Title of a multi-step prompt
    pub async fn title(&self) -> ExtestResult<Option<String>> {
        match self.element.children("Input.title").await?.into_iter().next() {
            Some(title) if title.is_displayed().await? => Ok(Some(title.text().await?)),
            _ => Ok(None),
        }
    }

    /// Go back one step in a multi-step prompt
    pub async fn back(&self) -> ExtestResult<()> {
        self.element.child("Input.backButton").await?.click().await
    }

    /// Whether the field masks its input
    pub async fn is_password(&self) -> ExtestResult<bool> {
        let kind = self.input().await?.attribute_at("Input.typeAttribute").await?;
        Ok(kind.as_deref() == Some("password"))
    }

    /// Tick or untick every row of a multi-select pick
    pub async fn toggle_all_quick_picks(&self, checked: bool) -> ExtestResult<()> {
        let check_all = self.element.child("Input.checkAll").await?;
        if check_all.is_selected().await? != checked {
            check_all.click().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl QuickInput for QuickOpenBox {
    const LIST: &'static str = "QuickOpenBox.quickList";
    const ROW: &'static str = "QuickOpenBox.row";
    const PROGRESS: &'static str = "QuickOpenBox.progress";
}

impl QuickOpenBox {
    /// Wait for the widget to show
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: wait_displayed(session, "QuickOpenBox.constructor").await?,
        })
    }
}

impl QuickPickItem {
    /// List index of the row
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Row label
    pub async fn label(&self) -> ExtestResult<String> {
        self.element.child("Input.label").await?.text().await
    }

    /// Secondary text next to the label
    pub async fn description(&self) -> ExtestResult<Option<String>> {
        match self.element.children("Input.description").await?.into_iter().next() {
            Some(description) => Ok(Some(description.text().await?)),
            None => Ok(None),
        }
    }

    /// Click the row
    pub async fn select(&self) -> ExtestResult<()> {
        self.element.click().await
    }

    /// Tick or untick the row of a multi-select pick
    pub async fn set_checked(&self, checked: bool) -> ExtestResult<()> {
        let checkbox = self.element.child("Input.checkbox").await?;
        if checkbox.is_selected().await? != checked {
            checkbox.click().await?;
        }
        Ok(())
    }
}

/// Whichever prompt widget the running build renders
#[derive(Debug, Clone)]
pub enum CommandPrompt {
    /// 1.44 and later
    InputBox(InputBox),
    /// Before 1.44
    QuickOpenBox(QuickOpenBox),
}

macro_rules! delegate {
    ($self:ident, $prompt:ident => $call:expr) => {
        match $self {
            Self::InputBox($prompt) => $call,
            Self::QuickOpenBox($prompt) => $call,
        }
    };
}

impl CommandPrompt {
    /// Wait for the widget the session's version renders
    pub async fn wait(session: &Session) -> ExtestResult<Self> {
        if session.is_at_least(1, 44, 0) {
            Ok(Self::InputBox(InputBox::new(session).await?))
        } else {
            Ok(Self::QuickOpenBox(QuickOpenBox::new(session).await?))
        }
    }

    /// Current text
    pub async fn text(&self) -> ExtestResult<String> {
        delegate!(self, prompt => prompt.text().await)
    }

    /// Replace the text
    pub async fn set_text(&self, text: &str) -> ExtestResult<()> {
        delegate!(self, prompt => prompt.set_text(text).await)
    }

    /// Press Enter
    pub async fn confirm(&self) -> ExtestResult<()> {
        delegate!(self, prompt => prompt.confirm().await)
    }

    /// Press Escape
    pub async fn cancel(&self) -> ExtestResult<()> {
        delegate!(self, prompt => prompt.cancel().await)
    }

    /// Rows currently rendered
    pub async fn quick_picks(&self) -> ExtestResult<Vec<QuickPickItem>> {
        delegate!(self, prompt => prompt.quick_picks().await)
    }

    /// Page through the list looking for a row
    pub async fn find_quick_pick(
        &self,
        query: impl Into<QuickPickQuery> + Send,
    ) -> ExtestResult<Option<QuickPickItem>> {
        let query = query.into();
        delegate!(self, prompt => prompt.find_quick_pick(&query).await)
    }

    /// Find a row and click it
    pub async fn select_quick_pick(&self, query: impl Into<QuickPickQuery> + Send) -> ExtestResult<()> {
        let query = query.into();
        delegate!(self, prompt => prompt.select_quick_pick(&query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_conversions() {
        assert_eq!(QuickPickQuery::from("Go to File"), QuickPickQuery::Label("Go to File".into()));
        assert_eq!(QuickPickQuery::from(3), QuickPickQuery::Index(3));
        assert_eq!(QuickPickQuery::Index(3).to_string(), "#3");
        assert_eq!(QuickPickQuery::from("x").to_string(), "x");
    }
}
