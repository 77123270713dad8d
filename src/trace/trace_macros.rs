//! Formatting front-end for [`TraceLogger`](crate::trace::TraceLogger).

/// Formats a message and appends it to the given logger, evaluating to the
/// `io::Result` of the write so callers can `?` or ignore it.
///
/// ```rust,ignore
/// trace_log!(logger, "token refresh took {} ms", elapsed_ms)?;
/// ```
#[macro_export]
macro_rules! trace_log {
    ($logger:expr, $($arg:tt)*) => {{
        let __msg = format!($($arg)*);
        $logger.log(&__msg)
    }};
}
