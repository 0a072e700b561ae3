//! libcurl-backed [`Transport`].
//!
//! Each GET runs a blocking `Easy` transfer on `spawn_blocking`. Dropping the
//! returned future raises an abort flag that the progress and write callbacks
//! check, so a cancelled call stops its transfer instead of running on to the
//! 30 s timeout.

use std::str;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use curl::easy::{Easy, List};

use super::{HttpResponse, PreparedRequest, SoftKind, Transport, TransportError};

/// GET transport using the curl crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    proxy: Option<String>,
    direct: bool,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route requests through a proxy (any scheme libcurl understands).
    pub fn with_proxy(proxy: Option<String>) -> Self {
        Self {
            proxy,
            direct: false,
        }
    }

    /// Never use a proxy, including ones from `http_proxy`/`ALL_PROXY`.
    pub fn direct() -> Self {
        Self {
            proxy: None,
            direct: true,
        }
    }
}

/// Sets the abort flag when the owning future is dropped.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Transport for CurlTransport {
    fn get(
        &self,
        request: &PreparedRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send {
        let request = request.clone();
        let proxy = if self.direct {
            Some(String::new())
        } else {
            self.proxy.clone()
        };
        async move {
            let abort = Arc::new(AtomicBool::new(false));
            let _guard = AbortOnDrop(Arc::clone(&abort));
            tokio::task::spawn_blocking(move || perform_get(&request, proxy.as_deref(), &abort))
                .await
                .map_err(|e| TransportError::Protocol(format!("transfer task failed: {e}")))?
        }
    }
}

/// Map a curl error onto the retry loop's transport error classes.
pub fn classify_curl_error(e: &curl::Error) -> TransportError {
    let message = e.to_string();
    if e.is_url_malformed() || e.is_bad_function_argument() || e.is_unknown_option() {
        return TransportError::Invalid(message);
    }
    if e.is_couldnt_resolve_host() {
        return TransportError::soft(SoftKind::Dns, message);
    }
    if e.is_couldnt_resolve_proxy() {
        return TransportError::soft(SoftKind::Proxy, message);
    }
    if e.is_operation_timedout() {
        return TransportError::soft(SoftKind::Timeout, message);
    }
    if e.is_bad_content_encoding() {
        return TransportError::soft(SoftKind::Decode, message);
    }
    if e.is_http2_error()
        || e.is_http2_stream_error()
        || e.code() == 8 // CURLE_WEIRD_SERVER_REPLY
        || e.is_unsupported_protocol()
    {
        return TransportError::Protocol(message);
    }
    TransportError::soft(SoftKind::Connection, message)
}

fn setopt(e: curl::Error) -> TransportError {
    TransportError::Invalid(e.to_string())
}

/// Runs in the current thread; called from `spawn_blocking`.
fn perform_get(
    request: &PreparedRequest,
    proxy: Option<&str>,
    abort: &AtomicBool,
) -> Result<HttpResponse, TransportError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = Easy::new();
    easy.url(&request.url).map_err(setopt)?;
    easy.get(true).map_err(setopt)?;
    easy.follow_location(request.follow_redirects).map_err(setopt)?;
    easy.connect_timeout(request.connect_timeout).map_err(setopt)?;
    // Read timeout: fail if fewer than 1 byte/s arrives for the whole window.
    easy.low_speed_limit(1).map_err(setopt)?;
    easy.low_speed_time(request.read_timeout).map_err(setopt)?;
    // Empty string = every encoding libcurl supports, decoded transparently.
    easy.accept_encoding("").map_err(setopt)?;
    easy.progress(true).map_err(setopt)?;
    // An empty proxy string disables proxying, environment variables included.
    if let Some(proxy) = proxy {
        easy.proxy(proxy).map_err(setopt)?;
    }

    let mut list = List::new();
    for (k, v) in &request.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(setopt)?;
    }
    if !request.headers.is_empty() {
        easy.http_headers(list).map_err(setopt)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(setopt)?;
        transfer
            .write_function(|data| {
                if abort.load(Ordering::Relaxed) {
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(setopt)?;
        transfer
            .progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))
            .map_err(setopt)?;
        transfer
            .perform()
            .map_err(|e| classify_curl_error(&e))?;
    }

    let status = easy.response_code().map_err(|e| classify_curl_error(&e))?;
    let url = easy
        .effective_url()
        .ok()
        .flatten()
        .unwrap_or(request.url.as_str())
        .to_string();

    Ok(HttpResponse {
        status: u16::try_from(status).unwrap_or(0),
        url,
        headers: parse_header_lines(&header_lines),
        body,
    })
}

/// Header pairs of the final response block. Interim blocks (e.g. `100 Continue`)
/// are discarded when the next status line arrives.
fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}
