//! Editor area: groups, tabs and the editors they show.
//!
//! [`EditorView::active_editor`] classifies the shown editor by the marker
//! element it renders, trying [`EDITOR_RULES`] in order. Diff and settings
//! editors both contain text editors, so their rules come first.

mod settings;
mod text;

pub use settings::{
    CheckboxSetting, ComboSetting, LinkSetting, Setting, SettingKind, SettingsEditor, TextSetting,
    SETTING_RULES,
};
pub use text::{CodeLens, DiffEditor, TextEditor};

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::element::Element;
use crate::page::webview::WebView;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use tracing::debug;

/// The editor area
#[derive(Debug, Clone)]
pub struct EditorView {
    element: Element,
}

/// One split of the editor area
#[derive(Debug, Clone)]
pub struct EditorGroup {
    element: Element,
    index: usize,
}

/// An editor tab
#[derive(Debug, Clone)]
pub struct EditorTab {
    element: Element,
}

/// A button in an editor group's toolbar
#[derive(Debug, Clone)]
pub struct EditorAction {
    element: Element,
}

/// An editor no rule recognised
#[derive(Debug, Clone)]
pub struct Editor {
    element: Element,
}

/// Details page of an extension
#[derive(Debug, Clone)]
pub struct ExtensionEditorView {
    element: Element,
}

page_object!(
    EditorView,
    EditorGroup,
    EditorTab,
    EditorAction,
    Editor,
    ExtensionEditorView,
);

impl HasContextMenu for EditorTab {}
impl HasContextMenu for Editor {}

/// Shape of the shown editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Settings UI
    Settings,
    /// Side-by-side diff
    Diff,
    /// Extension details
    Extension,
    /// Webview panel
    WebView,
    /// Plain text editor
    Text,
    /// Anything else
    Other,
}

/// Classification rules, tried in order; the first marker present wins
pub const EDITOR_RULES: &[(&str, EditorKind)] = &[
    ("Editor.settingsMarker", EditorKind::Settings),
    ("Editor.diffMarker", EditorKind::Diff),
    ("Editor.extensionMarker", EditorKind::Extension),
    ("Editor.webviewMarker", EditorKind::WebView),
    ("Editor.textMarker", EditorKind::Text),
];

/// A classified editor
#[derive(Debug)]
pub enum ActiveEditor {
    /// Settings UI
    Settings(SettingsEditor),
    /// Side-by-side diff
    Diff(DiffEditor),
    /// Extension details
    Extension(ExtensionEditorView),
    /// Webview panel
    WebView(WebView),
    /// Plain text editor
    Text(TextEditor),
    /// Anything else
    Other(Editor),
}

impl ActiveEditor {
    /// Classify an editor container
    pub async fn classify(element: Element) -> ExtestResult<Self> {
        let mut kind = EditorKind::Other;
        for (marker, candidate) in EDITOR_RULES {
            if element.has_child(marker).await? {
                kind = *candidate;
                break;
            }
        }
        debug!(?kind, "Classified editor");
        Ok(match kind {
            EditorKind::Settings => Self::Settings(SettingsEditor::new(element)),
            EditorKind::Diff => Self::Diff(DiffEditor::new(element)),
            EditorKind::Extension => Self::Extension(ExtensionEditorView { element }),
            EditorKind::WebView => {
                let container = element.child("Editor.webviewMarker").await?;
                Self::WebView(WebView::from_container(container))
            }
            EditorKind::Text => Self::Text(TextEditor::new(element)),
            EditorKind::Other => Self::Other(Editor { element }),
        })
    }

    /// Which rule matched
    #[must_use]
    pub const fn kind(&self) -> EditorKind {
        match self {
            Self::Settings(_) => EditorKind::Settings,
            Self::Diff(_) => EditorKind::Diff,
            Self::Extension(_) => EditorKind::Extension,
            Self::WebView(_) => EditorKind::WebView,
            Self::Text(_) => EditorKind::Text,
            Self::Other(_) => EditorKind::Other,
        }
    }

    /// The text editor, if that is what is shown
    #[must_use]
    pub fn into_text(self) -> Option<TextEditor> {
        match self {
            Self::Text(editor) => Some(editor),
            _ => None,
        }
    }

    /// The settings editor, if that is what is shown
    #[must_use]
    pub fn into_settings(self) -> Option<SettingsEditor> {
        match self {
            Self::Settings(editor) => Some(editor),
            _ => None,
        }
    }
}

impl EditorView {
    /// Locate the editor area
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("EditorView.constructor").await?,
        })
    }

    /// Every editor group, left to right
    pub async fn editor_groups(&self) -> ExtestResult<Vec<EditorGroup>> {
        Ok(self
            .element
            .children("EditorView.editorGroup")
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, element)| EditorGroup { element, index })
            .collect())
    }

    /// The group at `index`
    pub async fn editor_group(&self, index: usize) -> ExtestResult<EditorGroup> {
        self.editor_groups()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| ExtestError::not_found(format!("editor group {index}")))
    }

    /// Tabs of every group
    pub async fn open_tabs(&self) -> ExtestResult<Vec<EditorTab>> {
        let mut tabs = Vec::new();
        for group in self.editor_groups().await? {
            tabs.extend(group.open_tabs().await?);
        }
        Ok(tabs)
    }

    /// Titles of every open tab
    pub async fn open_editor_titles(&self) -> ExtestResult<Vec<String>> {
        let mut titles = Vec::new();
        for tab in self.open_tabs().await? {
            titles.push(tab.title().await?);
        }
        Ok(titles)
    }

    /// The tab with this title in any group
    pub async fn tab(&self, title: &str) -> ExtestResult<Option<EditorTab>> {
        for group in self.editor_groups().await? {
            if let Some(tab) = group.tab(title).await? {
                return Ok(Some(tab));
            }
        }
        Ok(None)
    }

    /// Selected tab of the first group that has one
    pub async fn active_tab(&self) -> ExtestResult<Option<EditorTab>> {
        for group in self.editor_groups().await? {
            if let Some(tab) = group.active_tab().await? {
                return Ok(Some(tab));
            }
        }
        Ok(None)
    }

    /// Switch to a tab and classify the editor it shows
    pub async fn open_editor(&self, title: &str, group: usize) -> ExtestResult<ActiveEditor> {
        self.editor_group(group).await?.open_editor(title).await
    }

    /// Close the tab with this title
    pub async fn close_editor(&self, title: &str, group: usize) -> ExtestResult<()> {
        self.editor_group(group).await?.close_editor(title).await
    }

    /// Close every tab, or only those of one group
    pub async fn close_all_editors(&self, group: Option<usize>) -> ExtestResult<()> {
        let groups = match group {
            Some(index) => vec![self.editor_group(index).await?],
            None => self.editor_groups().await?,
        };
        for group in groups {
            group.close_all_editors().await?;
        }
        Ok(())
    }

    /// The editor shown in the first group that shows one
    pub async fn active_editor(&self) -> ExtestResult<ActiveEditor> {
        for group in self.editor_groups().await? {
            if let Some(editor) = group.active_editor().await? {
                return Ok(editor);
            }
        }
        Err(ExtestError::ElementNotFound {
            selector: self.session().selector("Editor.constructor")?.to_string(),
        })
    }

    /// Toolbar buttons of every group
    pub async fn actions(&self) -> ExtestResult<Vec<EditorAction>> {
        let mut actions = Vec::new();
        for group in self.editor_groups().await? {
            actions.extend(group.actions().await?);
        }
        Ok(actions)
    }

    /// The toolbar button with this title in any group
    pub async fn action(&self, title: &str) -> ExtestResult<Option<EditorAction>> {
        for group in self.editor_groups().await? {
            if let Some(action) = group.action(title).await? {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }
}

impl EditorGroup {
    /// Position in the editor area
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Tabs in display order
    pub async fn open_tabs(&self) -> ExtestResult<Vec<EditorTab>> {
        Ok(self
            .element
            .children("EditorView.tab")
            .await?
            .into_iter()
            .map(|element| EditorTab { element })
            .collect())
    }

    /// The tab with this title
    pub async fn tab(&self, title: &str) -> ExtestResult<Option<EditorTab>> {
        let found = self.element.children_with("EditorView.tabByTitle", &[title]).await?;
        Ok(found.into_iter().next().map(|element| EditorTab { element }))
    }

    /// The selected tab
    pub async fn active_tab(&self) -> ExtestResult<Option<EditorTab>> {
        for tab in self.open_tabs().await? {
            if tab.is_selected().await? {
                return Ok(Some(tab));
            }
        }
        Ok(None)
    }

    /// Switch to a tab and classify the editor it shows
    pub async fn open_editor(&self, title: &str) -> ExtestResult<ActiveEditor> {
        let tab = self
            .tab(title)
            .await?
            .ok_or_else(|| ExtestError::not_found(title))?;
        tab.select().await?;
        let options = self.session().wait_options(None);
        wait_until(&options, "editor to show", || async {
            self.active_editor().await
        })
        .await
    }

    /// Close the tab with this title
    pub async fn close_editor(&self, title: &str) -> ExtestResult<()> {
        match self.tab(title).await? {
            Some(tab) => tab.close().await,
            None => Err(ExtestError::not_found(title)),
        }
    }

    /// Close every tab in the group
    pub async fn close_all_editors(&self) -> ExtestResult<()> {
        for tab in self.open_tabs().await? {
            tab.close().await?;
        }
        Ok(())
    }

    /// The editor the group shows, if any
    pub async fn active_editor(&self) -> ExtestResult<Option<ActiveEditor>> {
        for container in self.element.children("EditorView.editorContainer").await? {
            if container.is_displayed().await? {
                return Ok(Some(ActiveEditor::classify(container).await?));
            }
        }
        Ok(None)
    }

    /// Toolbar buttons
    pub async fn actions(&self) -> ExtestResult<Vec<EditorAction>> {
        let Some(container) = self.element.children("EditorView.actionContainer").await?.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(container
            .children("EditorView.actionItem")
            .await?
            .into_iter()
            .map(|element| EditorAction { element })
            .collect())
    }

    /// The toolbar button with this title
    pub async fn action(&self, title: &str) -> ExtestResult<Option<EditorAction>> {
        let found = self
            .element
            .children_with("EditorView.actionConstructor", &[title])
            .await?;
        Ok(found.into_iter().next().map(|element| EditorAction { element }))
    }
}

impl EditorTab {
    /// File or editor name
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.child("EditorTab.title").await?.text().await
    }

    /// Accessible label, which includes the path
    pub async fn label(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("EditorView.tabLabel")
            .await?
            .unwrap_or_default())
    }

    /// Whether the tab is the group's selected one
    pub async fn is_selected(&self) -> ExtestResult<bool> {
        Ok(self.element.attribute_at("EditorView.tabSelected").await?.as_deref() == Some("true"))
    }

    /// Whether the document has unsaved changes
    pub async fn is_dirty(&self) -> ExtestResult<bool> {
        self.element.has_class_at("EditorTab.dirtyClass").await
    }

    /// Switch to the tab
    pub async fn select(&self) -> ExtestResult<()> {
        self.element.click().await
    }

    /// Close the tab with its close button
    pub async fn close(&self) -> ExtestResult<()> {
        self.element.hover().await?;
        self.element.child("EditorView.tabClose").await?.click().await
    }
}

impl EditorAction {
    /// Button title
    pub async fn title(&self) -> ExtestResult<String> {
        Ok(self
            .element
            .attribute_at("EditorView.actionTitle")
            .await?
            .unwrap_or_default())
    }

    /// Click the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

impl Editor {
    /// Give keyboard focus to the editor
    pub async fn focus(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

impl ExtensionEditorView {
    async fn read(&self, path: &str) -> ExtestResult<String> {
        self.element.child(path).await?.text().await
    }

    /// Display name
    pub async fn name(&self) -> ExtestResult<String> {
        self.read("ExtensionEditorView.name").await
    }

    /// Installed or latest version
    pub async fn version(&self) -> ExtestResult<String> {
        self.read("ExtensionEditorView.version").await
    }

    /// Publisher display name
    pub async fn publisher(&self) -> ExtestResult<String> {
        self.read("ExtensionEditorView.publisher").await
    }

    /// One-line description
    pub async fn description(&self) -> ExtestResult<String> {
        self.read("ExtensionEditorView.description").await
    }
}
