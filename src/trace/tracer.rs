use crate::{
    config::Config,
    trace::{error_json_result::ErrorJsonResult, trace_sink::TraceSink},
};

use chrono::Local;
use std::{
    io,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

/// Directory created under the base path to hold the trace file.
const LOG_DIR: &str = "App_Data";
/// Fixed trace file name.
const LOG_FILE: &str = "SenparcWeixinTrace.log";
/// Timestamp format for the header line of each trace block.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Tag line written at the top of an `error_log` block.
const ERROR_TAG: &str = "[ErrorJsonResultException]";

/// Lock-serialized trace logger appending timestamped text blocks to one file.
///
/// Construct an instance explicitly and share it by reference (`&self` API,
/// `Send + Sync`) instead of going through process-global state. Every
/// operation acquires the internal lock for its full duration, so concurrent
/// callers are globally serialized and no partial lines ever interleave.
/// Two concurrent [`log_begin`](Self::log_begin)..[`log_over`](Self::log_over)
/// blocks may still interleave at the line level, since the lock is released
/// between operations.
///
/// # Debug gating
///
/// [`send_log`](Self::send_log) and [`error_log`](Self::error_log) are
/// complete no-ops while the debug flag is off: the file is never opened and
/// zero bytes are written. The flag is supplied at construction and can be
/// toggled at runtime with [`set_debug`](Self::set_debug).
///
/// # Example
///
/// ```rust,ignore
/// let logger = TraceLogger::new("/var/lib/myapp", true);
/// logger.send_log("https://api.example.com/token", &body)?;
/// ```
#[derive(Debug)]
pub struct TraceLogger {
    sink: Mutex<TraceSink>,
    file_path: PathBuf,
    debug: AtomicBool,
}

impl TraceLogger {
    /// Creates a logger writing to `<base_dir>/App_Data/SenparcWeixinTrace.log`.
    ///
    /// The file is not opened here; it is opened lazily on the first
    /// [`open`](Self::open) or [`log_begin`](Self::log_begin).
    #[must_use]
    pub fn new<D: AsRef<Path>>(base_dir: D, debug: bool) -> Self {
        let file_path = base_dir.as_ref().join(LOG_DIR).join(LOG_FILE);
        Self {
            sink: Mutex::new(TraceSink::new()),
            file_path,
            debug: AtomicBool::new(debug),
        }
    }

    /// Builds a logger from `[Trace]` configuration keys.
    ///
    /// `debug` gates logging (defaults to off when absent or malformed);
    /// `base_path` overrides the base directory and supports `~` expansion.
    /// Without a `base_path`, the directory next to the executable is used,
    /// falling back to the current working directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let debug = config.get_bool("Trace", "debug").unwrap_or(false);
        let base = config
            .get_non_empty("Trace", "base_path")
            .map_or_else(exe_dir_fallback_cwd, expand_path);
        Self::new(base, debug)
    }

    /// Returns the path of the trace file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Whether trace output is currently enabled.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Enables or disables trace output at runtime.
    pub fn set_debug(&self, on: bool) {
        self.debug.store(on, Ordering::Relaxed);
    }

    /// Opens the trace file in append mode, creating the `App_Data` directory
    /// if missing. Safe to call when already open.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from directory creation or file open.
    pub fn open(&self) -> io::Result<()> {
        self.sink().open(&self.file_path)
    }

    /// Flushes and closes the trace file. Safe to call when never opened.
    ///
    /// # Errors
    ///
    /// Propagates the final flush error, if any.
    pub fn close(&self) -> io::Result<()> {
        self.sink().close()
    }

    /// Whether the trace file is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sink().is_open()
    }

    /// Appends one line, indented to the current level and flushed immediately.
    ///
    /// When the sink is closed (never opened, or closed by a prior
    /// [`log_over`](Self::log_over)), the line is silently dropped and `Ok(())`
    /// is returned; callers are expected to have called [`open`](Self::open)
    /// or [`log_begin`](Self::log_begin) first.
    ///
    /// # Errors
    ///
    /// Propagates write or flush errors from the underlying file.
    pub fn log(&self, message: &str) -> io::Result<()> {
        self.sink().write_line(message)
    }

    /// Starts a trace block: ensures the sink is open, writes a blank line and
    /// a `[<local date-time>]` header, then raises the indent level by one.
    ///
    /// # Errors
    ///
    /// Propagates open or write errors from the underlying file.
    pub fn log_begin(&self) -> io::Result<()> {
        let mut sink = self.sink();
        sink.open(&self.file_path)?;
        sink.write_line("")?;
        sink.write_line(&format!("[{}]", Local::now().format(TIME_FORMAT)))?;
        sink.indent();
        Ok(())
    }

    /// Ends a trace block: lowers the indent level by one, then flushes and
    /// closes the sink. Further [`log`](Self::log) calls are dropped until the
    /// sink is re-opened.
    ///
    /// # Errors
    ///
    /// Propagates the final flush error, if any.
    pub fn log_over(&self) -> io::Result<()> {
        let mut sink = self.sink();
        sink.unindent();
        sink.close()
    }

    /// Traces an API request/response pair as one block:
    ///
    /// ```text
    ///
    /// [2026-08-29 10:30:45]
    ///     URL：<url>
    ///     Result：
    ///     <response_text>
    /// ```
    ///
    /// No-op while the debug flag is off.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from open, write, or close.
    pub fn send_log(&self, url: &str, response_text: &str) -> io::Result<()> {
        if !self.is_debug() {
            return Ok(());
        }
        self.log_begin()?;
        self.log(&format!("URL：{url}"))?;
        self.log(&format!("Result：\r\n{response_text}"))?;
        self.log_over()
    }

    /// Traces an API error result as one block: the fixed tag line followed by
    /// the URL, `errcode`, and `errmsg` fields. No-op while the debug flag is
    /// off.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors from open, write, or close.
    pub fn error_log(&self, err: &ErrorJsonResult) -> io::Result<()> {
        if !self.is_debug() {
            return Ok(());
        }
        self.log_begin()?;
        self.log(ERROR_TAG)?;
        self.log(&format!("URL：{}", err.url))?;
        self.log(&format!("errcode：{}", err.errcode))?;
        self.log(&format!("errmsg：{}", err.errmsg))?;
        self.log_over()
    }

    /// Acquires the sink lock, recovering from poisoning so a panicking peer
    /// thread cannot disable tracing for the rest of the process.
    fn sink(&self) -> MutexGuard<'_, TraceSink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Locates the directory next to the executable (target/{debug,release}),
/// or falls back to the current working directory on error.
fn exe_dir_fallback_cwd() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Expands tilde (`~`) in file paths to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if path_str.starts_with("~/") || path_str.starts_with("~\\") {
                home_path.push(&path_str[2..]);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}
