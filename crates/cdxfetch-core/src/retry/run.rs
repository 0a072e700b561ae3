//! Retry loop: dispatch, classify, back off, repeat until a terminal outcome.

use super::classify::{classify_response, ClassifyFlags};
use super::connect::{handle_transport_error, handle_unexpected_error};
use super::policy::{Disposition, RetryState, Verdict};
use super::FetchError;
use crate::known_hosts::KnownHosts;
use crate::request::{describe_params, normalize, GetRequest};
use crate::transport::{HttpResponse, PreparedRequest, Transport, TransportError};

/// A terminal, non-fatal response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub response: HttpResponse,
    pub disposition: Disposition,
    /// Counters at the time the loop stopped.
    pub stats: RetryState,
}

/// Run one GET to completion.
///
/// Retryable statuses are retried without limit, soft transport errors up to
/// the transport cap, unexpected protocol errors up to their smaller cap and
/// without delay. On a non-fatal outcome the URL's host is added to
/// `known_hosts`; on a fatal one the set is left alone.
///
/// Cancellation: dropping the returned future stops any pending backoff sleep
/// and the in-flight transport call.
pub async fn run_get<T: Transport>(
    transport: &T,
    known_hosts: &KnownHosts,
    request: GetRequest,
    user_agent: &str,
) -> Result<Fetched, FetchError> {
    let flags = ClassifyFlags::from(&request);
    let GetRequest {
        url,
        params,
        headers,
        ..
    } = request;

    let (params, headers) = normalize(params, headers, user_agent)?;
    let prepared = PreparedRequest::build(&url, &params, &headers)?;

    let mut state = RetryState::default();
    loop {
        tracing::debug!("getting {} {}", url, describe_params(&params));
        let delay = match transport.get(&prepared).await {
            Ok(response) => match classify_response(&response, &mut state.retries, &flags) {
                Verdict::Accept(disposition) => {
                    known_hosts.record_url(&url);
                    return Ok(Fetched {
                        response,
                        disposition,
                        stats: state,
                    });
                }
                Verdict::RetryAfter(delay) => delay,
                Verdict::Fatal(e) => return Err(e),
            },
            Err(TransportError::Invalid(reason)) => {
                return Err(FetchError::InvalidUrl {
                    url: url.clone(),
                    reason,
                })
            }
            Err(e @ TransportError::Protocol(_)) => {
                handle_unexpected_error(&e, &mut state.unexpected_errors, &url)?
            }
            Err(e) => handle_transport_error(
                &e,
                &mut state.connect_errors,
                &url,
                &params,
                known_hosts,
            )?,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
