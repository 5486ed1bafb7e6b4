//! Extest Locators: versioned DOM locator tables for VS Code automation
//!
//! Selectors drift from release to release. This crate keeps one complete
//! locator table for a base release and a sparse diff for every release where
//! something changed, and reconstructs the table in effect for any version.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ schema.yaml  │──►│ base table   │──►│              │
//! │ (shape)      │   │ 1.37.0.yaml  │   │   resolver   │──► LocatorTable
//! │              │──►│ diffs/*.yaml │──►│ (deep merge) │    for target
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use extest_locators::LocatorRegistry;
//!
//! let registry = LocatorRegistry::embedded()?;
//! let table = registry.resolve("1.42.0")?;
//! assert_eq!(table.selector("ViewSection.header")?.to_string(), "class=pane-header");
//! # Ok::<(), extest_locators::LocatorError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod diff;
pub mod locator;
pub mod registry;
pub mod resolver;
mod result;
pub mod schema;
pub mod table;
pub mod version;

pub use diff::LocatorDiff;
pub use locator::{Locator, LocatorKind, Selector};
pub use registry::{LocatorRegistry, BASE_VERSION};
pub use resolver::{resolve, resolve_detailed, select_diffs, Direction, Resolution};
pub use result::{LocatorError, LocatorResult};
pub use schema::{LocatorSchema, SchemaNode};
pub use table::{LocatorNode, LocatorTable};
pub use version::Version;
