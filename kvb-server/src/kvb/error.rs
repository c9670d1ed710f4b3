//! KVB website client error types.

/// Errors from fetching the operator's timetable page.
///
/// Both variants surface as a request-level failure; there is no
/// business-level retry for the live-departures path.
#[derive(Debug, thiserror::Error)]
pub enum KvbError {
    /// Transport failure (connection error, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The operator's site answered with a non-success status
    #[error("upstream returned status {status}")]
    Upstream { status: u16 },
}
