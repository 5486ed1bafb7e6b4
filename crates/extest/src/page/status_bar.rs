//! Status bar along the bottom edge of the window.

use crate::capability::{page_object, HasContextMenu};
use crate::element::Element;
use crate::page::notification::NotificationsCenter;
use crate::result::ExtestResult;
use crate::session::Session;

/// The status bar
#[derive(Debug, Clone)]
pub struct StatusBar {
    element: Element,
}

page_object!(StatusBar);

impl HasContextMenu for StatusBar {}

impl StatusBar {
    /// Locate the status bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("StatusBar.constructor").await?,
        })
    }

    /// Every item link
    pub async fn items(&self) -> ExtestResult<Vec<Element>> {
        let mut links = Vec::new();
        for item in self.element.children("StatusBar.item").await? {
            links.extend(item.children("StatusBar.itemLink").await?);
        }
        Ok(links)
    }

    /// Titles of every item that carries one
    pub async fn item_titles(&self) -> ExtestResult<Vec<String>> {
        let mut titles = Vec::new();
        for link in self.items().await? {
            if let Some(title) = link.attribute_at("StatusBar.itemTitle").await? {
                titles.push(title);
            }
        }
        Ok(titles)
    }

    /// The item whose title is exactly `title`
    pub async fn item(&self, title: &str) -> ExtestResult<Option<Element>> {
        let found = self
            .element
            .children_with("StatusBar.itemConstructor", &[title])
            .await?;
        Ok(found.into_iter().next())
    }

    async fn read(&self, path: &str) -> ExtestResult<Option<String>> {
        match self.element.children(path).await?.into_iter().next() {
            Some(item) => Ok(Some(item.text().await?.trim().to_string())),
            None => Ok(None),
        }
    }

    /// Language mode of the active editor
    pub async fn current_language(&self) -> ExtestResult<Option<String>> {
        self.read("StatusBar.language").await
    }

    /// Cursor position text, e.g. "Ln 4, Col 12"
    pub async fn current_position(&self) -> ExtestResult<Option<String>> {
        self.read("StatusBar.lines").await
    }

    /// File encoding
    pub async fn current_encoding(&self) -> ExtestResult<Option<String>> {
        self.read("StatusBar.encoding").await
    }

    /// Indentation setting, e.g. "Spaces: 4"
    pub async fn current_indentation(&self) -> ExtestResult<Option<String>> {
        self.read("StatusBar.indent").await
    }

    /// Line ending, "LF" or "CRLF"
    pub async fn current_eol(&self) -> ExtestResult<Option<String>> {
        self.read("StatusBar.lineEnding").await
    }

    /// Click the bell to show the notifications center
    pub async fn open_notifications_center(&self) -> ExtestResult<NotificationsCenter> {
        let center = NotificationsCenter::find(self.element.session()).await?;
        if let Some(center) = center {
            return Ok(center);
        }
        self.element.child("StatusBar.notifications").await?.click().await?;
        NotificationsCenter::wait(self.element.session()).await
    }

    /// Hide the notifications center if it is showing
    pub async fn close_notifications_center(&self) -> ExtestResult<()> {
        if let Some(center) = NotificationsCenter::find(self.element.session()).await? {
            center.close().await?;
        }
        Ok(())
    }

    /// Open the language picker
    pub async fn open_language_selection(&self) -> ExtestResult<()> {
        self.element.child("StatusBar.language").await?.click().await
    }

    /// Open the go-to-line prompt
    pub async fn open_line_selection(&self) -> ExtestResult<()> {
        self.element.child("StatusBar.lines").await?.click().await
    }

    /// Open the encoding picker
    pub async fn open_encoding_selection(&self) -> ExtestResult<()> {
        self.element.child("StatusBar.encoding").await?.click().await
    }

    /// Open the indentation picker
    pub async fn open_indentation_selection(&self) -> ExtestResult<()> {
        self.element.child("StatusBar.indent").await?.click().await
    }

    /// Open the line ending picker
    pub async fn open_eol_selection(&self) -> ExtestResult<()> {
        self.element.child("StatusBar.lineEnding").await?.click().await
    }
}
