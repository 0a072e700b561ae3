//! Classify a completed HTTP response. Rules are checked in order; the first match wins.

use super::policy::{is_retryable_status, Disposition, Verdict, BACKOFF, STATUS_RETRY_WARN_AFTER};
use super::FetchError;
use crate::request::GetRequest;
use crate::transport::HttpResponse;

/// Per-request switches that change how status codes are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyFlags {
    pub index_query: bool,
    pub allow_404_as_empty: bool,
    pub expected_status: Option<u16>,
}

impl From<&GetRequest> for ClassifyFlags {
    fn from(req: &GetRequest) -> Self {
        Self {
            index_query: req.index_query,
            allow_404_as_empty: req.allow_404_as_empty,
            expected_status: req.expected_status,
        }
    }
}

fn log_body(resp: &HttpResponse) {
    if !resp.body.is_empty() {
        tracing::debug!("response body is {}", resp.text());
    }
}

/// Decide what to do with `resp`. Increments `retries` only for retryable statuses.
pub fn classify_response(resp: &HttpResponse, retries: &mut u32, flags: &ClassifyFlags) -> Verdict {
    let status = resp.status;

    // Index servers answer 400 (page= past the end) or 404 (pywb "No Captures found")
    // when a query simply has no results.
    if flags.index_query && matches!(status, 400 | 404) {
        tracing::debug!("giving up with status {}, no captures found", status);
        return Verdict::Accept(Disposition::BenignEmpty);
    }
    if flags.allow_404_as_empty && status == 404 {
        return Verdict::Accept(Disposition::BenignEmpty);
    }
    if flags.expected_status == Some(status) {
        return Verdict::Accept(Disposition::ExpectedStatus);
    }

    if is_retryable_status(status) {
        *retries += 1;
        if *retries > STATUS_RETRY_WARN_AFTER {
            tracing::warn!("retrying after 1s for {} ({} retries) {}", status, retries, resp.url);
        } else {
            tracing::info!("retrying after 1s for {} {}", status, resp.url);
        }
        log_body(resp);
        return Verdict::RetryAfter(BACKOFF);
    }

    if matches!(status, 400 | 404) {
        log_body(resp);
        return Verdict::Fatal(FetchError::InvalidRequest {
            status,
            url: resp.url.clone(),
        });
    }

    if (300..400).contains(&status) {
        return Verdict::Accept(Disposition::Redirect);
    }

    if (200..300).contains(&status) {
        Verdict::Accept(Disposition::Success)
    } else {
        Verdict::Fatal(FetchError::HttpStatus {
            status,
            url: resp.url.clone(),
        })
    }
}
