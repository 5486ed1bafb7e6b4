//! Welcome content a section shows while its tree is empty.

use crate::capability::page_object;
use crate::element::Element;
use crate::result::ExtestResult;

/// Buttons and paragraphs replacing an empty tree
#[derive(Debug, Clone)]
pub struct WelcomeContentSection {
    element: Element,
}

/// A button in welcome content
#[derive(Debug, Clone)]
pub struct WelcomeContentButton {
    element: Element,
}

page_object!(WelcomeContentSection, WelcomeContentButton);

impl WelcomeContentSection {
    pub(crate) const fn new(element: Element) -> Self {
        Self { element }
    }

    /// Buttons in display order
    pub async fn buttons(&self) -> ExtestResult<Vec<WelcomeContentButton>> {
        Ok(self
            .element
            .children("WelcomeContent.button")
            .await?
            .into_iter()
            .map(|element| WelcomeContentButton { element })
            .collect())
    }

    /// The button with this title
    pub async fn button(&self, title: &str) -> ExtestResult<Option<WelcomeContentButton>> {
        for button in self.buttons().await? {
            if button.title().await? == title {
                return Ok(Some(button));
            }
        }
        Ok(None)
    }

    /// Paragraph texts in display order
    pub async fn text_sections(&self) -> ExtestResult<Vec<String>> {
        let mut texts = Vec::new();
        for paragraph in self.element.children("WelcomeContent.text").await? {
            texts.push(paragraph.text().await?);
        }
        Ok(texts)
    }
}

impl WelcomeContentButton {
    /// Button caption
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.text().await
    }

    /// Press the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}
