//! Tracing initialization for the ElevenLabs MCP client.
//!
//! This module provides utilities for initializing the tracing subscriber
//! with environment-based filtering via the `RUST_LOG` environment variable.
//!
//! # Usage
//!
//! ```no_run
//! use elevenlabs_mcp_common::tracing::init_tracing;
//!
//! fn main() {
//!     init_tracing();
//!     tracing::info!("Application started");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=elevenlabs_mcp_client=debug` - Enable debug for the client crate
//!   - `RUST_LOG=warn,rmcp=debug` - Warn by default, debug for the MCP SDK
//!
//! Logs are written to stderr. Stdout stays free for command output, and
//! the MCP server child process owns its own stdio pipes.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn subscriber(default_level: &str) -> impl ::tracing::Subscriber + Send + Sync + use<> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer)
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Filtering comes from `RUST_LOG` and defaults to `info`.
///
/// # Panics
///
/// This function will panic if called more than once, as the global
/// subscriber can only be set once.
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with a custom default level.
///
/// Similar to `init_tracing()`, but allows specifying a default log level
/// when `RUST_LOG` is not set.
///
/// # Example
///
/// ```no_run
/// use elevenlabs_mcp_common::tracing::init_tracing_with_default;
///
/// fn main() {
///     // Default to debug level if RUST_LOG is not set
///     init_tracing_with_default("debug");
/// }
/// ```
pub fn init_tracing_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// Unlike `init_tracing()`, this function does not panic if the subscriber
/// is already set, which makes it safe to call from every test.
///
/// # Example
///
/// ```
/// use elevenlabs_mcp_common::tracing::try_init_tracing;
///
/// // result is Ok(()) or Err(()) depending on prior initialization
/// let result = try_init_tracing();
/// ```
pub fn try_init_tracing() -> Result<(), ()> {
    subscriber("info").try_init().map_err(|_| ())
}
