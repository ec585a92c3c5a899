//! Telemetry initialization.
//!
//! Controlled by `WAIVER_LOG`:
//! - unset → no-op (tracing disabled, zero overhead)
//! - `"json"` → JSON events to stderr
//! - anything else → human-readable events to stderr
//!
//! Levels come from `RUST_LOG` (default `info`). Logs never go to stdout,
//! which carries the report and the confirmation prompt.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable that switches logging on.
pub const LOG_ENV: &str = "WAIVER_LOG";

/// Where log events go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogMode {
    Off,
    Json,
    Pretty,
}

impl LogMode {
    /// Interpret the value of [`LOG_ENV`].
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Off,
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            Some(_) => Self::Pretty,
        }
    }
}

/// Initialize telemetry based on `WAIVER_LOG`.
pub fn init() {
    let value = std::env::var(LOG_ENV).ok();
    match LogMode::from_env_value(value.as_deref()) {
        LogMode::Off => {}
        LogMode::Json => init_json(),
        LogMode::Pretty => init_pretty(),
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// JSON events to stderr via tracing-subscriber's JSON formatter.
fn init_json() {
    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
        )
        .init();
}

fn init_pretty() {
    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
