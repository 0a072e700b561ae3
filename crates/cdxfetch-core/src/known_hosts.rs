//! Hostnames that have resolved and answered before.
//!
//! Used only to decide whether a DNS failure is fatal: a resolver error for a
//! host we have never reached is treated as a typo, while one for a known host
//! is retried. The set only grows; there is no eviction or TTL.
//!
//! One `KnownHosts` is created at startup (seeded, plus configured extras) and
//! shared as `Arc<KnownHosts>` by every concurrent fetch in the process.

use std::collections::HashSet;
use std::sync::RwLock;

/// Archive providers that are known-good before any request has been made.
pub const SEED_HOSTS: [&str; 3] = [
    "commoncrawl.s3.amazonaws.com",
    "data.commoncrawl.org",
    "web.archive.org",
];

/// Extract the lowercase hostname from a URL string, if it has one.
pub fn hostname_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

/// Concurrency-safe, add-only set of hostnames.
#[derive(Debug)]
pub struct KnownHosts {
    hosts: RwLock<HashSet<String>>,
}

impl Default for KnownHosts {
    fn default() -> Self {
        Self::seeded()
    }
}

impl KnownHosts {
    /// Empty set (no seeds). Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            hosts: RwLock::new(HashSet::new()),
        }
    }

    /// Set containing [`SEED_HOSTS`].
    pub fn seeded() -> Self {
        Self::with_extra(std::iter::empty::<&str>())
    }

    /// Seeds plus extra hostnames (e.g. from config).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = Self::empty();
        for h in SEED_HOSTS {
            set.insert(h);
        }
        for h in extra {
            set.insert(h.as_ref());
        }
        set
    }

    pub fn contains(&self, hostname: &str) -> bool {
        let host = hostname.to_ascii_lowercase();
        self.hosts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&host)
    }

    /// Add a hostname. Returns true if it was not present before.
    pub fn insert(&self, hostname: &str) -> bool {
        let host = hostname.trim().to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        self.hosts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(host)
    }

    /// Record the host of a URL that completed without a fatal error.
    pub fn record_url(&self, url: &str) {
        if let Some(host) = hostname_of(url) {
            if self.insert(&host) {
                tracing::debug!("added {} to known hostnames", host);
            }
        }
    }

    /// True when a DNS failure for this URL should abort immediately:
    /// the URL has no host, or its host has never been seen.
    pub fn is_dns_fatal(&self, url: &str) -> bool {
        match hostname_of(url) {
            Some(host) => !self.contains(&host),
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.hosts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of the current members.
    pub fn snapshot(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self
            .hosts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect();
        hosts.sort();
        hosts
    }
}
