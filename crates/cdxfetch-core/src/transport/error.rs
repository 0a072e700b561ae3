//! Transport-side failures, split by how the retry loop treats them.

/// Retryable transport failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftKind {
    /// Hostname did not resolve.
    Dns,
    /// Connect or read timed out.
    Timeout,
    /// Connection refused/reset, short read, TLS handshake failure, etc.
    Connection,
    /// Response body could not be decoded (bad content encoding).
    Decode,
    /// Proxy could not be resolved or reached.
    Proxy,
}

/// Error returned by a [`Transport`](super::Transport) when no response was obtained.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Retried with backoff, up to the transport-error cap.
    #[error("{message}")]
    Soft { kind: SoftKind, message: String },
    /// Lower-level protocol failure; retried without backoff, up to a small cap.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// The request itself cannot be sent (malformed URL, bad option). Never retried.
    #[error("invalid request: {0}")]
    Invalid(String),
}

/// Resolver messages seen from libc, libcurl and friends.
const DNS_FAILURE_MARKERS: [&str; 3] = [
    "Name or service not known",
    "Could not resolve host",
    "Couldn't resolve host",
];

impl TransportError {
    pub fn soft(kind: SoftKind, message: impl Into<String>) -> Self {
        TransportError::Soft {
            kind,
            message: message.into(),
        }
    }

    /// True for hostname resolution failures, by kind or by message text.
    pub fn is_dns_failure(&self) -> bool {
        if let TransportError::Soft {
            kind: SoftKind::Dns,
            ..
        } = self
        {
            return true;
        }
        let text = self.to_string();
        DNS_FAILURE_MARKERS.iter().any(|m| text.contains(m))
    }
}
