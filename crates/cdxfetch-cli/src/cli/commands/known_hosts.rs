//! `cdxfetch known-hosts` – list the seeded known-hostnames set.

use cdxfetch_core::config::FetchConfig;
use cdxfetch_core::KnownHosts;

pub fn run_known_hosts(cfg: &FetchConfig) {
    for host in KnownHosts::with_extra(&cfg.known_hosts).snapshot() {
        println!("{}", host);
    }
}
