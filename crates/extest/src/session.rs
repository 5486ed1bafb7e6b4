//! Session context shared by every page object.
//!
//! A [`Session`] is built once per automation session from a driver and a
//! resolved locator table and then handed by reference to every page-object
//! constructor. The table is immutable for the session's lifetime.

use crate::driver::AutomationDriver;
use crate::element::Element;
use crate::result::ExtestResult;
use crate::wait::WaitOptions;
use extest_locators::{LocatorError, LocatorRegistry, LocatorTable, Selector, Version, BASE_VERSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Environment variable naming the application version under test
pub const ENV_CODE_VERSION: &str = "EXTEST_CODE_VERSION";
/// Environment variable overriding the base locator version
pub const ENV_BASE_VERSION: &str = "EXTEST_BASE_VERSION";
/// Environment variable pointing at an on-disk locator directory
pub const ENV_LOCATORS_DIR: &str = "EXTEST_LOCATORS_DIR";

/// Time budgets and retry caps used by page objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Default budget for explicit element waits
    pub element_ms: u64,
    /// Polling interval for waits
    pub poll_interval_ms: u64,
    /// Attempts made to open a context menu
    pub context_menu_attempts: u32,
    /// Pages read while searching a virtualized list
    pub max_pages: u32,
    /// Pause after actions the UI animates
    pub settle_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element_ms: 5000,
            poll_interval_ms: 50,
            context_menu_attempts: 3,
            max_pages: 50,
            settle_ms: 500,
        }
    }
}

/// Configuration for one automation session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Version of the application under test; may carry `-insider`
    pub app_version: String,
    /// Version of the base locator table
    pub base_version: String,
    /// Load locator tables from this directory instead of the embedded set
    pub locator_dir: Option<PathBuf>,
    /// Time budgets and retry caps
    pub timeouts: Timeouts,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_version: BASE_VERSION.to_string(),
            base_version: BASE_VERSION.to_string(),
            locator_dir: None,
            timeouts: Timeouts::default(),
        }
    }
}

impl SessionConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `EXTEST_*` environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(version) = lookup(ENV_CODE_VERSION).filter(|v| !v.trim().is_empty()) {
            config.app_version = version.trim().to_string();
        }
        if let Some(version) = lookup(ENV_BASE_VERSION).filter(|v| !v.trim().is_empty()) {
            config.base_version = version.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_LOCATORS_DIR).filter(|v| !v.trim().is_empty()) {
            config.locator_dir = Some(PathBuf::from(dir));
        }
        config
    }

    /// Set the application version
    #[must_use]
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Set the base locator version
    #[must_use]
    pub fn base_version(mut self, version: impl Into<String>) -> Self {
        self.base_version = version.into();
        self
    }

    /// Load locators from a directory
    #[must_use]
    pub fn locator_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locator_dir = Some(dir.into());
        self
    }

    /// Replace all time budgets
    #[must_use]
    pub const fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the element wait budget
    #[must_use]
    pub const fn element_timeout_ms(mut self, ms: u64) -> Self {
        self.timeouts.element_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.timeouts.poll_interval_ms = ms;
        self
    }

    /// Set the context menu attempt cap
    #[must_use]
    pub const fn context_menu_attempts(mut self, attempts: u32) -> Self {
        self.timeouts.context_menu_attempts = attempts;
        self
    }

    /// Set the list paging cap
    #[must_use]
    pub const fn max_pages(mut self, pages: u32) -> Self {
        self.timeouts.max_pages = pages;
        self
    }

    /// Set the settle pause
    #[must_use]
    pub const fn settle_ms(mut self, ms: u64) -> Self {
        self.timeouts.settle_ms = ms;
        self
    }
}

struct SessionInner {
    driver: Arc<dyn AutomationDriver>,
    table: LocatorTable,
    version: Version,
    config: SessionConfig,
}

/// Driver, resolved locator table and configuration for one session
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.inner.version)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap an already-resolved table
    pub fn new(
        driver: Arc<dyn AutomationDriver>,
        table: LocatorTable,
        version: Version,
        config: SessionConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                driver,
                table,
                version,
                config,
            }),
        }
    }

    /// Resolve the locator table for the configured version and start a session.
    ///
    /// Fails when the base table cannot be loaded. The embedded tables only
    /// carry the 1.37.0 base; any other base needs a locator directory.
    pub fn start(driver: Arc<dyn AutomationDriver>, config: SessionConfig) -> ExtestResult<Self> {
        let registry = match &config.locator_dir {
            Some(dir) => LocatorRegistry::from_dir(dir, &config.base_version)?,
            None => {
                if Version::parse(&config.base_version)? != Version::parse(BASE_VERSION)? {
                    return Err(LocatorError::BaseTableUnavailable {
                        version: config.base_version.clone(),
                        message: format!(
                            "only {BASE_VERSION} is embedded; set a locator directory for other bases"
                        ),
                    }
                    .into());
                }
                LocatorRegistry::embedded()?
            }
        };
        let resolution = registry.resolve_detailed(&config.app_version)?;
        info!(
            version = %resolution.version,
            requested = %config.app_version,
            diffs = resolution.applied.len(),
            "Session started"
        );
        Ok(Self::new(driver, resolution.table, resolution.version, config))
    }

    /// The automation driver
    #[must_use]
    pub fn driver(&self) -> &dyn AutomationDriver {
        self.inner.driver.as_ref()
    }

    /// The resolved locator table
    #[must_use]
    pub fn table(&self) -> &LocatorTable {
        &self.inner.table
    }

    /// Application version the table was resolved for
    #[must_use]
    pub fn version(&self) -> Version {
        self.inner.version
    }

    /// Whether the application is at least `major.minor.patch`
    #[must_use]
    pub fn is_at_least(&self, major: u64, minor: u64, patch: u64) -> bool {
        self.inner.version >= Version::new(major, minor, patch)
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Time budgets
    #[must_use]
    pub fn timeouts(&self) -> &Timeouts {
        &self.inner.config.timeouts
    }

    /// Wait options for a budget, or the default element budget
    #[must_use]
    pub fn wait_options(&self, timeout_ms: Option<u64>) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(timeout_ms.unwrap_or(self.timeouts().element_ms))
            .with_poll_interval(self.timeouts().poll_interval_ms)
    }

    /// Static selector at a locator path
    pub fn selector(&self, path: &str) -> ExtestResult<Selector> {
        Ok(self.inner.table.selector(path)?)
    }

    /// Selector built from a template at a locator path
    pub fn build(&self, path: &str, args: &[&str]) -> ExtestResult<Selector> {
        Ok(self.inner.table.build(path, args)?)
    }

    /// Attribute name at a locator path
    pub fn attribute(&self, path: &str) -> ExtestResult<&str> {
        Ok(self.inner.table.attribute(path)?)
    }

    /// Literal value at a locator path
    pub fn text(&self, path: &str) -> ExtestResult<&str> {
        Ok(self.inner.table.text(path)?)
    }

    /// Extras value carried by the diff chain
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.inner.table.extra(key)
    }

    /// Locate an element in the whole document
    pub async fn find(&self, path: &str) -> ExtestResult<Element> {
        Element::locate(self, self.selector(path)?, None).await
    }

    /// Every element in the whole document matching a locator path
    pub async fn find_all(&self, path: &str) -> ExtestResult<Vec<Element>> {
        Element::locate_all(self, &self.selector(path)?, None).await
    }
}
