pub mod config;
pub mod logging;

pub mod client;
pub mod known_hosts;
pub mod request;
pub mod retry;
pub mod transport;

pub use client::FetchClient;
pub use known_hosts::KnownHosts;
pub use request::{GetRequest, ParamValue, QueryParams};
pub use retry::{Disposition, FetchError, Fetched};
pub use transport::{CurlTransport, HttpResponse, PreparedRequest, Transport, TransportError};
