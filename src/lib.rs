//! Mutex-guarded file tracing for API request/response and error logging.
//!
//! The crate centers on [`trace::TraceLogger`], an explicitly constructed
//! logger instance that appends indented, timestamped text blocks to a single
//! log file. All writes are serialized through one lock, so concurrent callers
//! never interleave partial lines. Logging is gated behind a debug flag read
//! from configuration; when the flag is off the log file is never touched.

/// Handles configuration loading and management.
pub mod config;
/// Trace logging: the file sink, the logger, and its API-specific call sites.
pub mod trace;
