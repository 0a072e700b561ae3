//! Fatal outcomes of a GET. Anything retryable never reaches the caller.

/// Error returned when a GET cannot succeed by retrying.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// 400/404 outside the index-query and allow-404 carve-outs.
    #[error("invalid url of some sort, status={status} {url}")]
    InvalidRequest { status: u16, url: String },
    /// Any other non-2xx, non-3xx status that is not retried.
    #[error("HTTP {status} for url {url}")]
    HttpStatus { status: u16, url: String },
    /// DNS failure for a host that has never answered before.
    #[error("invalid hostname in url {url}")]
    InvalidHostname { url: String },
    /// Transport error cap exceeded; `diagnostic` carries count, url, params and last error.
    #[error("{diagnostic}")]
    TooManyTransportErrors { attempts: u32, diagnostic: String },
    /// Unexpected protocol error cap reached.
    #[error("giving up after {attempts} unexpected errors for url {url}: {last_error}")]
    TooManyUnexpectedErrors {
        attempts: u32,
        url: String,
        last_error: String,
    },
    /// URL cannot be parsed or sent.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// A query parameter cannot be normalized (e.g. non-numeric `limit`).
    #[error("invalid value for parameter {name}: {value:?}")]
    InvalidParam { name: String, value: String },
}

impl FetchError {
    /// HTTP status that caused the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::InvalidRequest { status, .. } | FetchError::HttpStatus { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
