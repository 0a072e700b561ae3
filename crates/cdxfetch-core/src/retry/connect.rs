//! Transport error handling: DNS fatality, escalation and caps.

use std::time::Duration;

use super::policy::{BACKOFF, MAX_TRANSPORT_ERRORS, MAX_UNEXPECTED_ERRORS, TRANSPORT_WARN_AFTER};
use super::FetchError;
use crate::known_hosts::KnownHosts;
use crate::request::{describe_params, QueryParams};
use crate::transport::TransportError;

/// Handle a soft transport error. Returns the delay before the next attempt,
/// or the fatal error that ends the call.
///
/// A DNS failure for a host that has never answered is most likely a typo and
/// fails at once; for a known host it is treated as a resolver hiccup.
pub fn handle_transport_error(
    error: &TransportError,
    connect_errors: &mut u32,
    url: &str,
    params: &QueryParams,
    known_hosts: &KnownHosts,
) -> Result<Duration, FetchError> {
    *connect_errors += 1;
    let diagnostic = format!(
        "{} failures for url {} {}: {}",
        connect_errors,
        url,
        describe_params(params),
        error
    );

    if error.is_dns_failure() && known_hosts.is_dns_fatal(url) {
        tracing::debug!("{}", diagnostic);
        return Err(FetchError::InvalidHostname {
            url: url.to_string(),
        });
    }

    if *connect_errors > MAX_TRANSPORT_ERRORS {
        tracing::error!("{}", diagnostic);
        return Err(FetchError::TooManyTransportErrors {
            attempts: *connect_errors,
            diagnostic,
        });
    }
    if *connect_errors > TRANSPORT_WARN_AFTER {
        tracing::warn!("{}", diagnostic);
    } else {
        tracing::info!("retrying after 1s for {}", diagnostic);
    }
    Ok(BACKOFF)
}

/// Handle an unexpected protocol error: retried immediately, fatal once the
/// count reaches the cap.
pub fn handle_unexpected_error(
    error: &TransportError,
    unexpected_errors: &mut u32,
    url: &str,
) -> Result<Duration, FetchError> {
    *unexpected_errors += 1;
    tracing::warn!(
        "something unexpected happened ({}/{}) for url {}: {}",
        unexpected_errors,
        MAX_UNEXPECTED_ERRORS,
        url,
        error
    );
    if *unexpected_errors >= MAX_UNEXPECTED_ERRORS {
        return Err(FetchError::TooManyUnexpectedErrors {
            attempts: *unexpected_errors,
            url: url.to_string(),
            last_error: error.to_string(),
        });
    }
    Ok(Duration::ZERO)
}
