//! Result and error types for locator loading and resolution.

use crate::locator::LocatorKind;
use thiserror::Error;

/// Result type for locator operations
pub type LocatorResult<T> = Result<T, LocatorError>;

/// Errors raised while loading, validating, resolving or reading locator tables
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Version string could not be parsed
    #[error("Invalid version string: {input:?}")]
    InvalidVersion {
        /// The rejected input
        input: String,
    },

    /// The base table could not be loaded; resolution cannot proceed
    #[error("Base locator table for {version} unavailable: {message}")]
    BaseTableUnavailable {
        /// Base version that was requested
        version: String,
        /// Underlying failure
        message: String,
    },

    /// A table, diff or schema document is not valid YAML/JSON
    #[error("Failed to parse {origin}: {message}")]
    Parse {
        /// File name or label of the document
        origin: String,
        /// Parser message
        message: String,
    },

    /// A table or diff does not fit the locator schema
    #[error("Schema violation at {path}: {message}")]
    SchemaViolation {
        /// Dotted path of the offending entry
        path: String,
        /// What is wrong with it
        message: String,
    },

    /// Lookup of a path the table does not declare
    #[error("Unknown locator: {path}")]
    UnknownLocator {
        /// Dotted path that was requested
        path: String,
    },

    /// Lookup used the wrong accessor for the stored kind
    #[error("Locator {path} is a {actual}, expected a {expected}")]
    KindMismatch {
        /// Dotted path that was requested
        path: String,
        /// Kind the accessor needs
        expected: LocatorKind,
        /// Kind actually stored
        actual: LocatorKind,
    },

    /// A selector template was given too few arguments
    #[error("Locator template {path} needs {expected} argument(s), got {actual}")]
    TemplateArguments {
        /// Dotted path of the template
        path: String,
        /// Arguments the template references
        expected: usize,
        /// Arguments supplied
        actual: usize,
    },

    /// Two diffs claim the same version
    #[error("Duplicate locator diff for version {version}")]
    DuplicateDiff {
        /// The repeated version
        version: String,
    },

    /// I/O error while reading a locator directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocatorError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }
}
