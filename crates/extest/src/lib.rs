//! Extest: page objects for driving the VS Code workbench
//!
//! Tests talk to typed page objects (a tree section, a settings row, a quick
//! pick) instead of raw selectors. Every selector comes from a locator table
//! resolved once per session for the version of the application under test,
//! so one test suite runs unchanged against many releases.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      EXTEST Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌──────────────────────┐  │
//! │   │ Page       │    │ Session    │    │ AutomationDriver     │  │
//! │   │ objects    │───►│ (table +   │───►│ (WebDriver client or │  │
//! │   │            │    │  version)  │    │  MockDriver)         │  │
//! │   └────────────┘    └────────────┘    └──────────────────────┘  │
//! │          ▲                 ▲                                    │
//! │          │           ┌────────────┐                             │
//! │   rows / capability  │ extest-    │                             │
//! │   traits             │ locators   │                             │
//! │                      └────────────┘                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use extest::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run(driver: Arc<dyn AutomationDriver>) -> ExtestResult<()> {
//! let session = Session::start(driver, SessionConfig::from_env())?;
//! let workbench = Workbench::new(&session).await?;
//! let explorer = workbench
//!     .activity_bar()
//!     .await?
//!     .view_control("Explorer")
//!     .await?;
//! # let _ = explorer;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod capability;
pub mod driver;
pub mod element;
pub mod logging;
pub mod mock;
pub mod page;
mod result;
pub mod rows;
pub mod session;
pub mod wait;

pub use capability::{FrameSwitch, HasContextMenu, HasWebviewFrame, PageObject};
pub use driver::{AutomationDriver, ElementHandle, Key};
pub use element::Element;
pub use mock::{MockDom, MockDriver, MockNode, NodeId};
pub use result::{ExtestError, ExtestResult};
pub use rows::{RowFacts, TreeItem, TreeSection};
pub use session::{Session, SessionConfig, Timeouts};
pub use wait::WaitOptions;

pub use extest_locators::{LocatorError, LocatorTable, Selector, Version};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::capability::{HasContextMenu, HasWebviewFrame, PageObject};
    pub use super::driver::{AutomationDriver, Key};
    pub use super::element::Element;
    pub use super::page::*;
    pub use super::result::{ExtestError, ExtestResult};
    pub use super::rows::{TreeItem, TreeSection};
    pub use super::session::{Session, SessionConfig};
    pub use super::wait::WaitOptions;
}
