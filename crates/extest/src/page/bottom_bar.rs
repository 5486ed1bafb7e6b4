//! Bottom panel: problems, output, debug console and terminal tabs.
//!
//! Each view's toolbar lives in the panel's title area, in a list labelled
//! with the view's `actionsLabel` locator.

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::result::ExtestResult;
use crate::session::Session;
use tracing::debug;

/// The bottom panel
#[derive(Debug, Clone)]
pub struct BottomBarPanel {
    element: Element,
}

/// Problems tab
#[derive(Debug, Clone)]
pub struct ProblemsView {
    element: Element,
    panel: Element,
}

/// One row of the problems tree: a file or a diagnostic
#[derive(Debug, Clone)]
pub struct Marker {
    element: Element,
}

/// Output tab
#[derive(Debug, Clone)]
pub struct OutputView {
    element: Element,
    panel: Element,
}

/// Debug console tab
#[derive(Debug, Clone)]
pub struct DebugConsoleView {
    element: Element,
    panel: Element,
}

/// Integrated terminal tab
#[derive(Debug, Clone)]
pub struct TerminalView {
    element: Element,
    panel: Element,
}

page_object!(
    BottomBarPanel,
    ProblemsView,
    Marker,
    OutputView,
    DebugConsoleView,
    TerminalView,
);

impl HasContextMenu for Marker {}
impl HasContextMenu for OutputView {}
impl HasContextMenu for DebugConsoleView {}
impl HasContextMenu for TerminalView {}

/// Kind of a problems row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerType {
    /// Errors
    Error,
    /// Warnings
    Warning,
    /// Info diagnostics
    Info,
    /// File rows grouping diagnostics
    File,
    /// Any of the above
    Any,
}

impl MarkerType {
    /// Whether a row of kind `other` is selected by this filter
    #[must_use]
    pub fn accepts(self, other: Self) -> bool {
        self == Self::Any || self == other
    }
}

impl BottomBarPanel {
    /// Locate the panel
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("BottomBarPanel.constructor").await?,
        })
    }

    /// Whether the panel is showing
    pub async fn is_open(&self) -> ExtestResult<bool> {
        self.element.is_displayed().await
    }

    /// Open or close the panel with the primary modifier + J
    pub async fn toggle(&self, open: bool) -> ExtestResult<()> {
        if self.is_open().await? == open {
            return Ok(());
        }
        let chord = Key::chord(&[Key::primary_modifier()], "j");
        self.session().driver().send_keys(None, &chord).await?;
        if open {
            self.element.clone().wait(None).await?;
        }
        debug!(open, "Toggled bottom panel");
        Ok(())
    }

    async fn open_tab(&self, tab: &str, view: &str) -> ExtestResult<Element> {
        self.toggle(true).await?;
        self.element.child(tab).await?.click().await?;
        self.session().find(view).await?.wait(None).await
    }

    /// Show the problems tab
    pub async fn open_problems_view(&self) -> ExtestResult<ProblemsView> {
        let element = self
            .open_tab("BottomBarPanel.problemsTab", "ProblemsView.constructor")
            .await?;
        Ok(ProblemsView {
            element,
            panel: self.element.clone(),
        })
    }

    /// Show the output tab
    pub async fn open_output_view(&self) -> ExtestResult<OutputView> {
        let element = self
            .open_tab("BottomBarPanel.outputTab", "OutputView.constructor")
            .await?;
        Ok(OutputView {
            element,
            panel: self.element.clone(),
        })
    }

    /// Show the debug console tab
    pub async fn open_debug_console_view(&self) -> ExtestResult<DebugConsoleView> {
        let element = self
            .open_tab("BottomBarPanel.debugTab", "DebugConsoleView.constructor")
            .await?;
        Ok(DebugConsoleView {
            element,
            panel: self.element.clone(),
        })
    }

    /// Show the terminal tab
    pub async fn open_terminal_view(&self) -> ExtestResult<TerminalView> {
        let element = self
            .open_tab("BottomBarPanel.terminalTab", "TerminalView.constructor")
            .await?;
        Ok(TerminalView {
            element,
            panel: self.element.clone(),
        })
    }

    /// Maximize the panel; no-op when already maximized
    pub async fn maximize(&self) -> ExtestResult<()> {
        self.press_if_present("BottomBarPanel.maximize").await
    }

    /// Restore a maximized panel; no-op otherwise
    pub async fn restore(&self) -> ExtestResult<()> {
        self.press_if_present("BottomBarPanel.restore").await
    }

    /// Close the panel
    pub async fn close(&self) -> ExtestResult<()> {
        self.element.child("BottomBarPanel.close").await?.click().await
    }

    async fn press_if_present(&self, path: &str) -> ExtestResult<()> {
        if let Some(button) = self.element.children(path).await?.into_iter().next() {
            button.click().await?;
        }
        Ok(())
    }
}

/// Click the toolbar action `title_path` in the list labelled `label_path`
async fn view_action(panel: &Element, label_path: &str, title_path: &str) -> ExtestResult<()> {
    let session = panel.session();
    let label = session.text(label_path)?;
    let title = session.text(title_path)?;
    let actions = panel
        .child_with("BottomBarViews.actionsContainer", &[label])
        .await?;
    actions
        .child_with("BottomBarViews.actionByTitle", &[title])
        .await?
        .click()
        .await
}

/// Text of every rendered editor line below `view`, joined by newlines
async fn editor_lines(view: &Element) -> ExtestResult<String> {
    let mut lines = Vec::new();
    for line in view.children("BottomBarViews.lines").await? {
        lines.push(line.text().await?);
    }
    Ok(lines.join("\n"))
}

/// Names offered by the channel dropdown in the panel toolbar
async fn channel_names(panel: &Element, label_path: &str) -> ExtestResult<Vec<String>> {
    let label = panel.session().text(label_path)?;
    let actions = panel
        .child_with("BottomBarViews.actionsContainer", &[label])
        .await?;
    let select = actions.child("BottomBarViews.channelSelect").await?;
    let mut names = Vec::new();
    for option in select.children("BottomBarViews.channelOption").await? {
        if let Some(value) = option.attribute_at("BottomBarViews.optionValue").await? {
            names.push(value);
        }
    }
    Ok(names)
}

/// Pick a channel from the dropdown by typing its name
async fn select_channel(panel: &Element, label_path: &str, name: &str) -> ExtestResult<()> {
    let label = panel.session().text(label_path)?;
    let actions = panel
        .child_with("BottomBarViews.actionsContainer", &[label])
        .await?;
    let select = actions.child("BottomBarViews.channelSelect").await?;
    select.click().await?;
    select.send_keys(&format!("{name}{}", Key::Enter)).await
}

impl ProblemsView {
    async fn filter_input(&self) -> ExtestResult<Element> {
        self.panel
            .child("ProblemsView.markersFilter")
            .await?
            .child("ProblemsView.input")
            .await
    }

    /// Type a filter pattern, replacing the current one
    pub async fn set_filter(&self, pattern: &str) -> ExtestResult<()> {
        let input = self.filter_input().await?;
        input.clear().await?;
        input.send_keys(pattern).await
    }

    /// Remove the filter pattern
    pub async fn clear_filter(&self) -> ExtestResult<()> {
        self.filter_input().await?.clear().await
    }

    /// Collapse every file row
    pub async fn collapse_all(&self) -> ExtestResult<()> {
        self.panel.child("ProblemsView.collapseAll").await?.click().await
    }

    /// Visible rows of the given kind
    pub async fn markers(&self, kind: MarkerType) -> ExtestResult<Vec<Marker>> {
        let mut markers = Vec::new();
        for element in self.element.children("ProblemsView.markerRow").await? {
            let marker = Marker { element };
            if kind.accepts(marker.kind().await?) {
                markers.push(marker);
            }
        }
        Ok(markers)
    }
}

impl Marker {
    /// Accessible label, e.g. "Error: Cannot find name 'x' at line 3"
    pub async fn text(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("ProblemsView.rowLabel")
            .await?
            .unwrap_or_default())
    }

    /// File name or message shown on the row
    pub async fn label(&self) -> ExtestResult<String> {
        self.element.child("ProblemsView.label").await?.text().await
    }

    /// Kind of row. File rows are the collapsible ones; diagnostics are told
    /// apart by their icon class.
    pub async fn kind(&self) -> ExtestResult<MarkerType> {
        if let Some(twistie) = self.element.children("ProblemsView.markerTwistie").await?.into_iter().next() {
            if twistie.has_class_at("TreeItem.collapsibleClass").await? {
                return Ok(MarkerType::File);
            }
        }
        let icon = self.element.child("ProblemsView.icon").await?;
        for (path, kind) in [
            ("ProblemsView.errorClass", MarkerType::Error),
            ("ProblemsView.warningClass", MarkerType::Warning),
            ("ProblemsView.infoClass", MarkerType::Info),
        ] {
            if icon.has_class_at(path).await? {
                return Ok(kind);
            }
        }
        Ok(MarkerType::Info)
    }

    /// Number of diagnostics under a file row
    pub async fn problem_count(&self) -> ExtestResult<u32> {
        match self.element.children("ProblemsView.changeCount").await?.into_iter().next() {
            Some(badge) => Ok(badge.text().await?.trim().parse().unwrap_or_default()),
            None => Ok(0),
        }
    }

    /// Expand or collapse a file row
    pub async fn toggle(&self) -> ExtestResult<()> {
        self.element.child("ProblemsView.markerTwistie").await?.click().await
    }
}

impl OutputView {
    /// Contents of the selected channel
    pub async fn text(&self) -> ExtestResult<String> {
        editor_lines(&self.element).await
    }

    /// Clear the selected channel
    pub async fn clear_text(&self) -> ExtestResult<()> {
        view_action(&self.panel, "OutputView.actionsLabel", "OutputView.clearTitle").await
    }

    /// Every channel the dropdown offers
    pub async fn channel_names(&self) -> ExtestResult<Vec<String>> {
        channel_names(&self.panel, "OutputView.actionsLabel").await
    }

    /// Show a channel by name
    pub async fn select_channel(&self, name: &str) -> ExtestResult<()> {
        select_channel(&self.panel, "OutputView.actionsLabel", name).await
    }
}

impl DebugConsoleView {
    /// Everything the console printed
    pub async fn text(&self) -> ExtestResult<String> {
        let mut rows = Vec::new();
        for row in self.element.children("DebugConsoleView.row").await? {
            rows.push(row.text().await?);
        }
        Ok(rows.join("\n"))
    }

    /// Clear the console
    pub async fn clear_text(&self) -> ExtestResult<()> {
        view_action(
            &self.panel,
            "DebugConsoleView.actionsLabel",
            "DebugConsoleView.clearTitle",
        )
        .await
    }

    /// Type an expression and evaluate it
    pub async fn evaluate(&self, expression: &str) -> ExtestResult<()> {
        let input = self.element.child("DebugConsoleView.input").await?;
        input.click().await?;
        let area = input.child("DebugConsoleView.inputArea").await?;
        area.send_keys(&format!("{expression}{}", Key::Enter)).await
    }
}

impl TerminalView {
    /// Run a command in the active terminal
    pub async fn execute_command(&self, command: &str) -> ExtestResult<()> {
        let input = self.element.child("TerminalView.textArea").await?;
        input.send_keys(&format!("{command}{}", Key::Enter)).await
    }

    /// Rendered buffer text, one line per terminal row
    pub async fn text(&self) -> ExtestResult<String> {
        let mut rows = Vec::new();
        for row in self.element.children("TerminalView.rowLine").await? {
            rows.push(row.text().await?.trim_end().to_string());
        }
        Ok(rows.join("\n"))
    }

    /// Open another terminal
    pub async fn new_terminal(&self) -> ExtestResult<()> {
        self.panel.child("TerminalView.newTerminal").await?.click().await
    }

    /// Kill the active terminal
    pub async fn kill_terminal(&self) -> ExtestResult<()> {
        self.panel.child("TerminalView.killTerminal").await?.click().await
    }

    /// Names of the open terminals
    pub async fn channel_names(&self) -> ExtestResult<Vec<String>> {
        channel_names(&self.panel, "TerminalView.actionsLabel").await
    }

    /// Switch to a terminal by name
    pub async fn select_channel(&self, name: &str) -> ExtestResult<()> {
        select_channel(&self.panel, "TerminalView.actionsLabel", name).await
    }
}
