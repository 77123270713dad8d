use thiserror::Error;

/// An error payload returned by a remote API as JSON: the request URL plus
/// the `errcode`/`errmsg` pair from the response body.
///
/// Implements [`std::error::Error`] so callers can propagate it with `?`;
/// [`TraceLogger::error_log`](crate::trace::TraceLogger::error_log) renders it
/// as a labeled block in the trace file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("errcode {errcode} from {url}: {errmsg}")]
pub struct ErrorJsonResult {
    /// The API endpoint that produced the error.
    pub url: String,
    /// Numeric error code from the response body.
    pub errcode: i64,
    /// Human-readable error message from the response body.
    pub errmsg: String,
}

impl ErrorJsonResult {
    pub fn new(url: impl Into<String>, errcode: i64, errmsg: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            errcode,
            errmsg: errmsg.into(),
        }
    }
}
