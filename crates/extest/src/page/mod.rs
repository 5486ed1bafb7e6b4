//! Page objects for every part of the workbench.
//!
//! Every page object wraps one [`crate::Element`] and reads its selectors
//! from the session's locator table by path, so the same code drives every
//! supported release.
//!
//! ```text
//! Workbench
//! ├── TitleBar ─── TitleBarItem ─── ContextMenu
//! ├── ActivityBar ─── ViewControl / ActionsControl
//! ├── SideBarView ─── ViewTitlePart, ViewContent ─── Section (classified)
//! ├── EditorView ─── EditorGroup ─── EditorTab, ActiveEditor (classified)
//! ├── BottomBarPanel ─── Problems / Output / Debug console / Terminal
//! ├── StatusBar
//! └── CommandPrompt ─── InputBox | QuickOpenBox
//! ```

pub mod activity_bar;
pub mod bottom_bar;
pub mod debug;
pub mod dialog;
pub mod editor;
pub mod input;
pub mod menu;
pub mod notification;
pub mod side_bar;
pub mod status_bar;
pub mod title_bar;
pub mod webview;
pub mod workbench;

pub use activity_bar::{ActionsControl, ActivityBar, ViewControl};
pub use bottom_bar::{
    BottomBarPanel, DebugConsoleView, Marker, MarkerType, OutputView, ProblemsView, TerminalView,
};
pub use debug::{DebugToolbar, DebugView};
pub use dialog::ModalDialog;
pub use editor::{
    ActiveEditor, CheckboxSetting, CodeLens, ComboSetting, DiffEditor, Editor, EditorAction,
    EditorGroup, EditorKind, EditorTab, EditorView, ExtensionEditorView, LinkSetting, Setting,
    SettingKind, SettingsEditor, TextEditor, TextSetting,
};
pub use input::{CommandPrompt, InputBox, QuickInput, QuickOpenBox, QuickPickItem, QuickPickQuery};
pub use menu::{ContextMenu, ContextMenuItem};
pub use notification::{Notification, NotificationAction, NotificationType, NotificationsCenter};
pub use side_bar::{
    BreakpointSectionItem, CustomTreeItem, CustomTreeSection, DebugBreakpointSection,
    DefaultTreeItem, DefaultTreeSection, ExtensionsViewItem, ExtensionsViewSection, ScmChange,
    ScmProvider, ScmView, Section, SectionKind, SideBarView, ViewContent, ViewItemAction,
    ViewPanelAction, ViewSection, ViewTitleAction, ViewTitlePart, WelcomeContentButton,
    WelcomeContentSection,
};
pub use status_bar::StatusBar;
pub use title_bar::{TitleBar, TitleBarItem, WindowControls};
pub use webview::{WebView, WebviewView};
pub use workbench::Workbench;
