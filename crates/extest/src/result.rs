//! Result and error types for extest.

use extest_locators::LocatorError;
use thiserror::Error;

/// Result type for extest operations
pub type ExtestResult<T> = Result<T, ExtestError>;

/// Errors that can occur while driving the workbench
#[derive(Debug, Error)]
pub enum ExtestError {
    /// Locator tables could not be loaded or a lookup failed
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// A locate operation found zero matches
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// A previously located element no longer exists
    #[error("Stale element reference: {id}")]
    StaleElement {
        /// Driver-side element id
        id: String,
    },

    /// An explicit wait ran out of time
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Budget in milliseconds
        ms: u64,
        /// What was awaited
        waited_for: String,
    },

    /// The operation is deliberately not available on this page object
    #[error("{operation} is not supported on {target}")]
    Unsupported {
        /// Operation that was attempted
        operation: String,
        /// Page object type
        target: String,
    },

    /// A settings row matched none of the known control shapes
    #[error("Setting type not supported: {title}")]
    SettingTypeNotSupported {
        /// Setting title
        title: String,
    },

    /// A labelled item could not be found
    #[error("Item not found: {label}")]
    ItemNotFound {
        /// Label that was searched for
        label: String,
    },

    /// Any other failure reported by the automation driver
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },
}

impl ExtestError {
    /// Whether a bounded retry loop may swallow this error and try again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. } | Self::Timeout { .. }
        )
    }

    pub(crate) fn unsupported(operation: &str, target: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_string(),
            target: target.to_string(),
        }
    }

    pub(crate) fn not_found(label: impl Into<String>) -> Self {
        Self::ItemNotFound {
            label: label.into(),
        }
    }
}
