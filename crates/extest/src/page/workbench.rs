//! The workbench: entry point to every part of the window.

use crate::capability::{page_object, HasContextMenu, PageObject};
use crate::driver::Key;
use crate::element::Element;
use crate::page::activity_bar::ActivityBar;
use crate::page::bottom_bar::BottomBarPanel;
use crate::page::editor::{EditorView, SettingsEditor};
use crate::page::input::CommandPrompt;
use crate::page::notification::{Notification, NotificationsCenter};
use crate::page::side_bar::SideBarView;
use crate::page::status_bar::StatusBar;
use crate::page::title_bar::TitleBar;
use crate::result::ExtestResult;
use crate::session::Session;
use crate::wait::wait_until;
use tracing::info;

/// The whole window
#[derive(Debug, Clone)]
pub struct Workbench {
    element: Element,
}

page_object!(Workbench);

impl HasContextMenu for Workbench {}

impl Workbench {
    /// Locate the workbench
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("Workbench.constructor").await?,
        })
    }

    /// The title bar
    pub async fn title_bar(&self) -> ExtestResult<TitleBar> {
        TitleBar::new(self.session()).await
    }

    /// The activity bar
    pub async fn activity_bar(&self) -> ExtestResult<ActivityBar> {
        ActivityBar::new(self.session()).await
    }

    /// The side bar
    pub async fn side_bar(&self) -> ExtestResult<SideBarView> {
        SideBarView::new(self.session()).await
    }

    /// The status bar
    pub async fn status_bar(&self) -> ExtestResult<StatusBar> {
        StatusBar::new(self.session()).await
    }

    /// The editor area
    pub async fn editor_view(&self) -> ExtestResult<EditorView> {
        EditorView::new(self.session()).await
    }

    /// The bottom panel
    pub async fn bottom_bar(&self) -> ExtestResult<BottomBarPanel> {
        BottomBarPanel::new(self.session()).await
    }

    /// Toasts currently shown
    pub async fn notifications(&self) -> ExtestResult<Vec<Notification>> {
        let Some(container) = self
            .element
            .children("Workbench.notificationContainer")
            .await?
            .into_iter()
            .next()
        else {
            return Ok(Vec::new());
        };
        Ok(container
            .children("Workbench.notificationItem")
            .await?
            .into_iter()
            .map(Notification::new)
            .collect())
    }

    /// Show the notifications center from the status bar
    pub async fn open_notifications_center(&self) -> ExtestResult<NotificationsCenter> {
        self.status_bar().await?.open_notifications_center().await
    }

    /// Open the command palette with F1
    pub async fn open_command_prompt(&self) -> ExtestResult<CommandPrompt> {
        self.session()
            .driver()
            .send_keys(None, &Key::F1.to_string())
            .await?;
        CommandPrompt::wait(self.session()).await
    }

    /// Run a command by its palette name
    pub async fn execute_command(&self, command: &str) -> ExtestResult<()> {
        info!(command, "Executing command");
        let prompt = self.open_command_prompt().await?;
        prompt.set_text(&format!(">{command}")).await?;
        prompt.confirm().await
    }

    /// Open the user settings editor
    pub async fn open_settings(&self) -> ExtestResult<SettingsEditor> {
        self.execute_command("open user settings").await?;
        let session = self.session();
        let title = session.text("SettingsEditor.title")?;
        let view = self.editor_view().await?;
        let options = session.wait_options(None);
        wait_until(&options, "settings editor", || async {
            let Some(tab) = view.active_tab().await? else {
                return Ok(None);
            };
            if tab.title().await? != title {
                return Ok(None);
            }
            Ok(view.active_editor().await?.into_settings())
        })
        .await
    }
}

