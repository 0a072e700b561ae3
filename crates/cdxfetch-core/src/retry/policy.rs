use std::time::Duration;

use super::FetchError;

/// Fixed delay between a retryable failure and the next attempt.
pub const BACKOFF: Duration = Duration::from_secs(1);
/// Per-attempt connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Per-attempt read timeout (no bytes for this long aborts the attempt).
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Statuses meaning overload or a temporary outage at the provider or its storage.
/// 503 = slow down, 502/504 = temporary outage, 500 = storage backend error.
pub const RETRYABLE_STATUSES: [u16; 6] = [429, 500, 502, 503, 504, 509];

/// Status retries above this are logged at warn instead of info. Not a cap.
pub const STATUS_RETRY_WARN_AFTER: u32 = 5;
/// Transport errors above this are logged at warn.
pub const TRANSPORT_WARN_AFTER: u32 = 10;
/// Transport errors above this abort the call.
pub const MAX_TRANSPORT_ERRORS: u32 = 100;
/// Unexpected protocol errors reaching this abort the call.
pub const MAX_UNEXPECTED_ERRORS: u32 = 5;

pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// How a non-fatal terminal response should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 2xx.
    Success,
    /// Domain-specific "no results" (index-query 400/404, or allowed 404).
    BenignEmpty,
    /// The status the caller said to expect.
    ExpectedStatus,
    /// 3xx, not followed.
    Redirect,
}

/// Decision for one completed response.
#[derive(Debug)]
pub enum Verdict {
    /// Stop and hand the response back.
    Accept(Disposition),
    /// Try again after the given delay.
    RetryAfter(Duration),
    /// Stop with an error.
    Fatal(FetchError),
}

/// Counters scoped to one call. Each counts one failure class only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    /// Retryable status responses.
    pub retries: u32,
    /// Soft transport errors.
    pub connect_errors: u32,
    /// Unexpected protocol errors.
    pub unexpected_errors: u32,
}
