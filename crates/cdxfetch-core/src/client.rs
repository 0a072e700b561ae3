//! Request-scoped context tying a transport to the shared known-hosts set.

use std::sync::Arc;

use crate::config::FetchConfig;
use crate::known_hosts::KnownHosts;
use crate::request::{default_user_agent, GetRequest};
use crate::retry::{run_get, FetchError, Fetched};
use crate::transport::{CurlTransport, Transport};

/// Everything a GET needs besides the request itself.
///
/// Cheap to clone when `T` is; clones share the same `KnownHosts`.
#[derive(Debug, Clone)]
pub struct FetchClient<T> {
    transport: T,
    known_hosts: Arc<KnownHosts>,
    user_agent: String,
}

impl FetchClient<CurlTransport> {
    /// Curl-backed client from config: proxy, extra known hosts, UA override.
    pub fn from_config(cfg: &FetchConfig) -> Self {
        let known_hosts = Arc::new(KnownHosts::with_extra(&cfg.known_hosts));
        let mut client = Self::new(CurlTransport::with_proxy(cfg.proxy.clone()), known_hosts);
        if let Some(ua) = &cfg.user_agent {
            client = client.with_user_agent(ua.clone());
        }
        client
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn new(transport: T, known_hosts: Arc<KnownHosts>) -> Self {
        Self {
            transport,
            known_hosts,
            user_agent: default_user_agent(),
        }
    }

    /// Replace the User-Agent injected when a request carries none.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn known_hosts(&self) -> &Arc<KnownHosts> {
        &self.known_hosts
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET with retry, backoff and classification. See [`run_get`].
    pub async fn get(&self, request: GetRequest) -> Result<Fetched, FetchError> {
        run_get(&self.transport, &self.known_hosts, request, &self.user_agent).await
    }
}
