//! Span export to a local JSON-lines file.
//!
//! The plugin runs inside the Zellij sandbox without network access for
//! telemetry, so spans are written next to the persisted location:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → zearch-spans.jsonl
//! ```
//!
//! Each line holds one finished span as a flat JSON object. The file rotates
//! at 10 MB and keeps three numbered backups (`.1` is the newest).
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option and accepts
//! `EnvFilter` directives such as `"debug"` or `"zearch::store=trace"`.
//! Without it, `"info"` is used.
//!
//! ```rust
//! use zearch::observability::init_tracing;
//! use zearch::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, SPAN_FILE};
