//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL: filter directives, e.g. "debug" or
//!   "info,question=debug,codegrader_backend=debug,tower_http=info".
//! - LOG_FORMAT: "pretty" (default) or "json", case-insensitive.
//!
//! Handlers log under the `question` target, process and store lifecycle under
//! `codegrader_backend`. Per-request spans come from the tower-http TraceLayer.

use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,question=debug,codegrader_backend=debug,tower_http=info,axum=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Pretty`; the second value tells whether that happened.
    pub fn parse(raw: Option<&str>) -> (Self, bool) {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("pretty") => (LogFormat::Pretty, false),
            Some("json") => (LogFormat::Json, false),
            Some(_) => (LogFormat::Pretty, true),
        }
    }
}

/// Filter from LOG_LEVEL directives; invalid or missing directives use the default.
fn build_filter(directives: Option<&str>) -> (EnvFilter, Option<String>) {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => match EnvFilter::try_new(d) {
            Ok(f) => (f, None),
            Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(format!("invalid LOG_LEVEL {d:?}: {e}"))),
        },
        None => (EnvFilter::new(DEFAULT_FILTER), None),
    }
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = std::env::var("LOG_FORMAT").ok();
    let (filter, filter_problem) = build_filter(level.as_deref());
    let (format, unknown_format) = LogFormat::parse(format.as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    // Reported only now that a subscriber exists.
    if let Some(problem) = filter_problem {
        warn!(target: "codegrader_backend", %problem, "Using default log filter");
    }
    if unknown_format {
        warn!(target: "codegrader_backend", "Unknown LOG_FORMAT; using pretty output");
    }
}
