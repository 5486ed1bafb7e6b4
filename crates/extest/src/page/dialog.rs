//! Modal dialog boxes drawn inside the workbench.

use crate::capability::page_object;
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;

/// A modal dialog
#[derive(Debug, Clone)]
pub struct ModalDialog {
    element: Element,
}

page_object!(ModalDialog);

impl ModalDialog {
    /// Wait for a dialog to show
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("ModalDialog.constructor").await?.wait(None).await?,
        })
    }

    /// Headline text
    pub async fn message(&self) -> ExtestResult<String> {
        self.element.child("ModalDialog.message").await?.text().await
    }

    /// Body text under the headline
    pub async fn details(&self) -> ExtestResult<String> {
        match self.element.children("ModalDialog.details").await?.into_iter().next() {
            Some(details) => details.text().await,
            None => Ok(String::new()),
        }
    }

    /// Buttons in display order
    pub async fn buttons(&self) -> ExtestResult<Vec<Element>> {
        self.element
            .child("ModalDialog.buttonContainer")
            .await?
            .children("ModalDialog.button")
            .await
    }

    /// Titles of the buttons
    pub async fn button_titles(&self) -> ExtestResult<Vec<String>> {
        let mut titles = Vec::new();
        for button in self.buttons().await? {
            if let Some(title) = button.attribute_at("ModalDialog.buttonLabel").await? {
                titles.push(title);
            }
        }
        Ok(titles)
    }

    /// Press the button with this title
    pub async fn push_button(&self, title: &str) -> ExtestResult<()> {
        let container = self.element.child("ModalDialog.buttonContainer").await?;
        match container
            .children_with("ModalDialog.buttonByTitle", &[title])
            .await?
            .into_iter()
            .next()
        {
            Some(button) => button.click().await,
            None => Err(ExtestError::not_found(title)),
        }
    }

    /// Close with the X button
    pub async fn close(&self) -> ExtestResult<()> {
        self.element.child("ModalDialog.closeButton").await?.click().await
    }
}
