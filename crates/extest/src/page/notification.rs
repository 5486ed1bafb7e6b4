//! Toast notifications and the notifications center.

use crate::capability::{page_object, HasContextMenu};
use crate::element::Element;
use crate::result::{ExtestError, ExtestResult};
use crate::session::Session;
use crate::wait::wait_until;
use tracing::debug;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Any severity
    Any,
}

impl NotificationType {
    /// Whether a notification of kind `other` passes this filter
    #[must_use]
    pub fn accepts(self, other: Self) -> bool {
        self == Self::Any || self == other
    }
}

/// One notification, either a toast or a row of the center
#[derive(Debug, Clone)]
pub struct Notification {
    element: Element,
}

/// A button on a notification
#[derive(Debug, Clone)]
pub struct NotificationAction {
    element: Element,
}

/// Panel listing every notification
#[derive(Debug, Clone)]
pub struct NotificationsCenter {
    element: Element,
}

page_object!(Notification, NotificationAction, NotificationsCenter);

impl HasContextMenu for Notification {}

impl Notification {
    pub(crate) const fn new(element: Element) -> Self {
        Self { element }
    }

    /// Message text
    pub async fn message(&self) -> ExtestResult<String> {
        self.element.child("Notification.message").await?.text().await
    }

    /// Which extension or component raised it
    pub async fn source(&self) -> ExtestResult<String> {
        match self.element.children("Notification.source").await?.into_iter().next() {
            Some(source) => source.text().await,
            None => Ok(String::new()),
        }
    }

    /// Severity, read from the icon class
    pub async fn kind(&self) -> ExtestResult<NotificationType> {
        let icon = self.element.child("Notification.icon").await?;
        if icon.has_class_at("Notification.errorClass").await? {
            Ok(NotificationType::Error)
        } else if icon.has_class_at("Notification.warningClass").await? {
            Ok(NotificationType::Warning)
        } else {
            Ok(NotificationType::Info)
        }
    }

    /// Whether a progress bar is running
    pub async fn has_progress(&self) -> ExtestResult<bool> {
        match self.element.children("Notification.progress").await?.into_iter().next() {
            Some(bar) => bar.is_displayed().await,
            None => Ok(false),
        }
    }

    /// Close the notification
    pub async fn dismiss(&self) -> ExtestResult<()> {
        self.element.hover().await?;
        self.element.child("Notification.dismiss").await?.click().await
    }

    /// Expand a collapsed multi-line message
    pub async fn expand(&self) -> ExtestResult<()> {
        self.element.hover().await?;
        if let Some(toggle) = self.element.children("Notification.expand").await?.into_iter().next() {
            toggle.click().await?;
        }
        Ok(())
    }

    /// Buttons in display order
    pub async fn actions(&self) -> ExtestResult<Vec<NotificationAction>> {
        let Some(container) = self.element.children("Notification.actions").await?.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(container
            .children("Notification.action")
            .await?
            .into_iter()
            .map(|element| NotificationAction { element })
            .collect())
    }

    /// Click the button with this title
    pub async fn take_action(&self, title: &str) -> ExtestResult<()> {
        let found = self
            .element
            .children_with("Notification.actionByTitle", &[title])
            .await?;
        match found.into_iter().next() {
            Some(button) => button.click().await,
            None => Err(ExtestError::not_found(title)),
        }
    }
}

impl NotificationAction {
    /// Button caption
    pub async fn title(&self) -> ExtestResult<String> {
        self.element.text().await
    }

    /// Press the button
    pub async fn click(&self) -> ExtestResult<()> {
        self.element.click().await
    }
}

impl NotificationsCenter {
    /// The center, if it is showing
    pub async fn find(session: &Session) -> ExtestResult<Option<Self>> {
        for element in session.find_all("NotificationsCenter.constructor").await? {
            if element.has_class_at("NotificationsCenter.visibleClass").await? {
                return Ok(Some(Self { element }));
            }
        }
        Ok(None)
    }

    /// Wait for the center to show
    pub async fn wait(session: &Session) -> ExtestResult<Self> {
        let options = session.wait_options(None);
        wait_until(&options, "notifications center", || Self::find(session)).await
    }

    /// Notifications listed, filtered by severity
    pub async fn notifications(&self, kind: NotificationType) -> ExtestResult<Vec<Notification>> {
        let mut found = Vec::new();
        for row in self.element.children("NotificationsCenter.row").await? {
            let notification = Notification::new(row);
            if kind.accepts(notification.kind().await?) {
                found.push(notification);
            }
        }
        Ok(found)
    }

    /// Dismiss everything listed
    pub async fn clear_all_notifications(&self) -> ExtestResult<()> {
        debug!("Clearing all notifications");
        self.element.child("NotificationsCenter.clear").await?.click().await
    }

    /// Hide the center
    pub async fn close(&self) -> ExtestResult<()> {
        self.element.child("NotificationsCenter.close").await?.click().await
    }
}
