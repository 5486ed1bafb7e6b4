//! Tracing subscriber setup for automation runs.
//!
//! Page objects emit `tracing` events at the automation boundary: locator
//! resolution, session start, context-menu retries, list paging and frame
//! switches. Call [`init`] once at the start of a run to print them; the
//! filter defaults to `info` and honours `RUST_LOG`.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Output format for [`init_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable single-line events
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Install a compact subscriber. Returns `false` if one was already set.
pub fn init() -> bool {
    init_with(LogFormat::Compact)
}

/// Install a global subscriber with the given format.
///
/// Returns `false` if a global subscriber was already installed, which makes
/// repeated calls from tests harmless.
pub fn init_with(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = (format == LogFormat::Json).then(|| fmt::layer().json().with_target(true));
    let compact = (format == LogFormat::Compact).then(|| fmt::layer().compact().with_target(false));
    Registry::default()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()
        .is_ok()
}
