//! Debug toolbar and the launch controls of the run view.

use crate::capability::page_object;
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;

/// Floating toolbar shown while a debug session runs
#[derive(Debug, Clone)]
pub struct DebugToolbar {
    element: Element,
}

/// Launch configuration picker and start button in the side bar
#[derive(Debug, Clone)]
pub struct DebugView {
    element: Element,
}

page_object!(DebugToolbar, DebugView);

impl DebugToolbar {
    /// Wait for the toolbar to show
    pub async fn new(session: &Session, timeout_ms: Option<u64>) -> ExtestResult<Self> {
        Ok(Self {
            element: session
                .find("DebugToolbar.constructor")
                .await?
                .wait(timeout_ms)
                .await?,
        })
    }

    async fn press(&self, class_path: &str) -> ExtestResult<()> {
        let class = self.element.session().text(class_path)?;
        self.element
            .child_with("DebugToolbar.button", &[class])
            .await?
            .click()
            .await
    }

    /// Resume execution
    pub async fn continue_(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.continue").await
    }

    /// Pause execution
    pub async fn pause(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.pause").await
    }

    /// Step over
    pub async fn step_over(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.stepOver").await
    }

    /// Step into
    pub async fn step_into(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.stepInto").await
    }

    /// Step out
    pub async fn step_out(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.stepOut").await
    }

    /// Restart the session
    pub async fn restart(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.restart").await
    }

    /// Stop the session
    pub async fn stop(&self) -> ExtestResult<()> {
        self.press("DebugToolbar.stop").await
    }
}

impl DebugView {
    /// Locate the launch controls in the side bar
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("SideBarView.constructor").await?,
        })
    }

    async fn launch_select(&self) -> ExtestResult<Element> {
        self.element
            .child("DebugView.launchCombo")
            .await?
            .child("DebugView.launchSelect")
            .await
    }

    /// Name of the selected launch configuration
    pub async fn launch_configuration(&self) -> ExtestResult<Option<String>> {
        for option in self.launch_select().await?.children("DebugView.launchOption").await? {
            if option.is_selected().await? {
                return Ok(Some(option.text().await?));
            }
        }
        Ok(None)
    }

    /// Names of every launch configuration
    pub async fn launch_configurations(&self) -> ExtestResult<Vec<String>> {
        let mut names = Vec::new();
        for option in self.launch_select().await?.children("DebugView.launchOption").await? {
            let name = option.text().await?;
            if !name.is_empty() {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Pick a launch configuration by name
    pub async fn select_launch_configuration(&self, name: &str) -> ExtestResult<()> {
        let select = self.launch_select().await?;
        match select
            .children_with("DebugView.optionByName", &[name])
            .await?
            .into_iter()
            .next()
        {
            Some(option) => option.click().await,
            None => Err(ExtestError::not_found(name)),
        }
    }

    /// Start debugging with the selected configuration
    pub async fn start(&self) -> ExtestResult<()> {
        self.element
            .child("DebugView.launchCombo")
            .await?
            .child("DebugView.startButton")
            .await?
            .click()
            .await
    }
}
