//! Text and diff editors.
//!
//! Line numbers are 1-based throughout, matching the editor's gutter.

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use tracing::debug;

/// A text editor
#[derive(Debug, Clone)]
pub struct TextEditor {
    element: Element,
}

/// A code lens above a line
#[derive(Debug, Clone)]
pub struct CodeLens {
    element: Element,
}

/// A side-by-side diff editor
#[derive(Debug, Clone)]
pub struct DiffEditor {
    element: Element,
}

page_object!(TextEditor, CodeLens, DiffEditor);

impl HasContextMenu for TextEditor {}

impl TextEditor {
    pub(crate) const fn new(element: Element) -> Self {
        Self { element }
    }

    async fn input_area(&self) -> ExtestResult<Element> {
        self.element.child("Editor.inputArea").await
    }

    /// Rendered lines in document order
    pub async fn lines(&self) -> ExtestResult<Vec<String>> {
        let mut lines = Vec::new();
        for line in self.element.children("TextEditor.lines").await? {
            lines.push(line.text().await?);
        }
        Ok(lines)
    }

    /// Rendered text, lines joined by newlines
    pub async fn text(&self) -> ExtestResult<String> {
        Ok(self.lines().await?.join("\n"))
    }

    /// Text of one line
    pub async fn text_at_line(&self, line: usize) -> ExtestResult<String> {
        let lines = self.lines().await?;
        line.checked_sub(1)
            .and_then(|index| lines.get(index).cloned())
            .ok_or_else(|| ExtestError::not_found(format!("line {line} of {}", lines.len())))
    }

    /// Number of rendered lines
    pub async fn number_of_lines(&self) -> ExtestResult<usize> {
        Ok(self.lines().await?.len())
    }

    /// Replace the whole document
    pub async fn set_text(&self, text: &str) -> ExtestResult<()> {
        let input = self.input_area().await?;
        input
            .send_keys(&Key::chord(&[Key::primary_modifier()], "a"))
            .await?;
        input.send_keys(&Key::Backspace.to_string()).await?;
        input.send_keys(text).await
    }

    /// Empty the document
    pub async fn clear_text(&self) -> ExtestResult<()> {
        self.set_text("").await
    }

    /// Type at the cursor
    pub async fn type_text(&self, text: &str) -> ExtestResult<()> {
        self.input_area().await?.send_keys(text).await
    }

    /// Save with the primary modifier + S
    pub async fn save(&self) -> ExtestResult<()> {
        let input = self.input_area().await?;
        input
            .send_keys(&Key::chord(&[Key::primary_modifier()], "s"))
            .await
    }

    /// Text under the current selection
    pub async fn selected_text(&self) -> ExtestResult<Option<String>> {
        match self.element.children("TextEditor.selection").await?.into_iter().next() {
            Some(selection) => Ok(Some(selection.text().await?)),
            None => Ok(None),
        }
    }

    /// Run "Format Document" from the context menu
    pub async fn format_document(&self) -> ExtestResult<()> {
        let label = self.session().text("TextEditor.formatDocument")?.to_string();
        let menu = self.open_context_menu().await?;
        menu.select(&[label.as_str()]).await?;
        Ok(())
    }

    /// Add or remove a breakpoint on a line.
    ///
    /// Returns whether a breakpoint is set afterwards.
    pub async fn toggle_breakpoint(&self, line: usize) -> ExtestResult<bool> {
        let margin = self.element.child("TextEditor.marginArea").await?;
        let number = line.to_string();
        let overlay = margin.child_with("TextEditor.lineOverlay", &[&number]).await?;
        overlay.hover().await?;
        if let Some(existing) = overlay.children("TextEditor.breakpoint").await?.into_iter().next() {
            existing.click().await?;
            debug!(line, "Removed breakpoint");
            return Ok(false);
        }
        overlay.child("TextEditor.debugHint").await?.click().await?;
        debug!(line, "Added breakpoint");
        Ok(true)
    }

    /// Whether a line number is rendered in the gutter
    pub async fn has_line(&self, line: usize) -> ExtestResult<bool> {
        let number = line.to_string();
        Ok(!self
            .element
            .children_with("TextEditor.lineNumber", &[&number])
            .await?
            .is_empty())
    }

    /// Every code lens shown
    pub async fn code_lenses(&self) -> ExtestResult<Vec<CodeLens>> {
        Ok(self
            .element
            .children("TextEditor.codeLens")
            .await?
            .into_iter()
            .map(|element| CodeLens { element })
            .collect())
    }

    /// The code lens whose text contains `title`
    pub async fn code_lens(&self, title: &str) -> ExtestResult<Option<CodeLens>> {
        let found = self
            .element
            .children_with("TextEditor.codeLensByTitle", &[title])
            .await?;
        Ok(found.into_iter().next().map(|element| CodeLens { element }))
    }
}

impl CodeLens {
    /// Lens text
    pub async fn text(&self) -> ExtestResult<String> {
        self.element.text().await
    }

    /// Run the lens command
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

impl DiffEditor {
    pub(crate) const fn new(element: Element) -> Self {
        Self { element }
    }

    /// The left-hand side
    pub async fn original_editor(&self) -> ExtestResult<TextEditor> {
        Ok(TextEditor::new(self.element.child("DiffEditor.originalEditor").await?))
    }

    /// The right-hand side
    pub async fn modified_editor(&self) -> ExtestResult<TextEditor> {
        Ok(TextEditor::new(self.element.child("DiffEditor.modifiedEditor").await?))
    }
}
