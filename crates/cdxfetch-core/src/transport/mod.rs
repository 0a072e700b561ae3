//! The request-issuing capability the retry loop drives.
//!
//! The loop only needs "send this GET, give me a response or an error"; a
//! [`Transport`] is that capability. [`CurlTransport`] is the libcurl-backed
//! implementation; tests substitute scripted transports.

mod libcurl;
mod error;
#[cfg(test)]
pub(crate) mod scripted;

pub use libcurl::CurlTransport;
pub use error::{SoftKind, TransportError};

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::request::QueryParams;
use crate::retry::policy::{CONNECT_TIMEOUT, READ_TIMEOUT};
use crate::retry::FetchError;

/// A fully built GET ready for the wire.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// URL including the encoded query string.
    pub url: String,
    pub headers: HashMap<String, String>,
    pub connect_timeout: Duration,
    /// Abort when no bytes arrive for this long.
    pub read_timeout: Duration,
    /// Always false here: callers must see redirect responses themselves.
    pub follow_redirects: bool,
}

impl PreparedRequest {
    /// Append `params` to `base_url` (keeping any query it already has).
    pub fn build(
        base_url: &str,
        params: &QueryParams,
        headers: &HashMap<String, String>,
    ) -> Result<Self, FetchError> {
        let mut url = url::Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, &v.to_string());
            }
        }
        Ok(Self {
            url: url.into(),
            headers: headers.clone(),
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            follow_redirects: false,
        })
    }
}

/// A completed HTTP response, whatever its status.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// URL the response came from.
    pub url: String,
    /// Header (name, value) pairs in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive lookup of the first header with this name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Issues a single GET. Implementations must not retry or follow redirects.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn get(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).get(request)
    }
}
