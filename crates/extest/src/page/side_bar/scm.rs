//! Source control view: providers, commit input and changed resources.

use crate::capability::{page_object, HasContextMenu};
use crate::driver::Key;
use crate::element::Element;
use crate::result::ExtestResult;
use crate::session::Session;

/// The source control side bar view
#[derive(Debug, Clone)]
pub struct ScmView {
    element: Element,
}

/// One source control provider (a repository)
#[derive(Debug, Clone)]
pub struct ScmProvider {
    element: Element,
    view: Element,
}

/// One changed resource
#[derive(Debug, Clone)]
pub struct ScmChange {
    element: Element,
}

page_object!(ScmView, ScmProvider, ScmChange);

impl HasContextMenu for ScmProvider {}
impl HasContextMenu for ScmChange {}

impl ScmView {
    /// Locate the side bar showing source control
    pub async fn new(session: &Session) -> ExtestResult<Self> {
        Ok(Self {
            element: session.find("SideBarView.constructor").await?,
        })
    }

    /// Every provider. A single repository renders without a provider list,
    /// in which case the whole view acts as its provider.
    pub async fn providers(&self) -> ExtestResult<Vec<ScmProvider>> {
        let Some(list) = self.element.children("ScmView.providers").await?.into_iter().next() else {
            return Ok(vec![ScmProvider {
                element: self.element.clone(),
                view: self.element.clone(),
            }]);
        };
        Ok(list
            .children("ScmView.providerRow")
            .await?
            .into_iter()
            .map(|element| ScmProvider {
                element,
                view: self.element.clone(),
            })
            .collect())
    }

    /// The provider with this title
    pub async fn provider(&self, title: &str) -> ExtestResult<Option<ScmProvider>> {
        for provider in self.providers().await? {
            if provider.title().await? == title {
                return Ok(Some(provider));
            }
        }
        Ok(None)
    }
}

impl ScmProvider {
    /// Repository name
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.child("ScmView.providerTitle").await?.text().await
    }

    /// Kind of repository, e.g. "Git"
    pub async fn provider_type(&self) -> ExtestResult<String> {
        self.element.child("ScmView.providerType").await?.text().await
    }

    /// Number of changes shown on the badge; 0 when there is no badge
    pub async fn change_count(&self) -> ExtestResult<u32> {
        let Some(badge) = self.element.children("ScmView.providerChangeCount").await?.into_iter().next()
        else {
            return Ok(0);
        };
        Ok(badge.text().await?.trim().parse().unwrap_or_default())
    }

    /// Text in the commit message box
    pub async fn commit_message(&self) -> ExtestResult<String> {
        let input = self.view.child("ScmView.inputField").await?;
        Ok(input.attribute_at("Input.valueAttribute").await?.unwrap_or_default())
    }

    /// Replace the commit message
    pub async fn set_commit_message(&self, message: &str) -> ExtestResult<()> {
        let input = self.view.child("ScmView.inputField").await?;
        input.clear().await?;
        input.send_keys(message).await
    }

    /// Set the message and commit with the primary modifier + Enter
    pub async fn commit_changes(&self, message: &str) -> ExtestResult<()> {
        self.set_commit_message(message).await?;
        let input = self.view.child("ScmView.inputField").await?;
        input
            .send_keys(&Key::chord(&[Key::primary_modifier()], &Key::Enter.to_string()))
            .await
    }

    /// Titles of the toolbar actions
    pub async fn actions(&self) -> ExtestResult<Vec<String>> {
        let mut titles = Vec::new();
        for action in self.view.children("ScmView.action").await? {
            if let Some(title) = action.attribute_at("ScmView.actionTitle").await? {
                titles.push(title);
            }
        }
        Ok(titles)
    }

    /// Click the toolbar action with this title; `false` when it is missing
    pub async fn take_action(&self, title: &str) -> ExtestResult<bool> {
        let found = self
            .view
            .children_with("ScmView.actionConstructor", &[title])
            .await?;
        match found.into_iter().next() {
            Some(action) => {
                action.click().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Changed resources, either staged or not.
    ///
    /// Rows are grouped under resource-group header rows; a group whose
    /// label starts with "Staged" holds the staged changes.
    pub async fn changes(&self, staged: bool) -> ExtestResult<Vec<ScmChange>> {
        let Some(container) = self.view.children("ScmView.changeContainer").await?.into_iter().next()
        else {
            return Ok(Vec::new());
        };
        let mut in_staged = false;
        let mut changes = Vec::new();
        for row in container.children("ScmView.changeRow").await? {
            if row.has_class_at("ScmView.resourceGroupClass").await? {
                in_staged = row.text().await?.trim_start().starts_with("Staged");
                continue;
            }
            if in_staged == staged {
                changes.push(ScmChange { element: row });
            }
        }
        Ok(changes)
    }
}

impl ScmChange {
    /// File name
    pub async fn label(&self) -> ExtestResult<String> {
        self.element.child("ScmView.changeLabel").await?.text().await
    }

    /// Directory shown next to the name
    pub async fn description(&self) -> ExtestResult<String> {
        match self.element.children("ScmView.changeDescription").await?.into_iter().next() {
            Some(description) => description.text().await,
            None => Ok(String::new()),
        }
    }

    /// Status such as "Modified" or "Untracked"
    pub async fn status(&self) -> ExtestResult<String> {
        let icon = self.element.child("ScmView.changeStatus").await?;
        Ok(icon
            .attribute_at("ScmView.statusAttribute")
            .await?
            .unwrap_or_default())
    }

    /// Open the change in a diff editor
    pub async fn open(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}
