//! Retry and backoff policy for a single GET.
//!
//! This module classifies responses (benign empty, retryable, fatal) and
//! transport errors (retryable, DNS-fatal, over the cap), and runs the loop
//! that re-dispatches until one of them says stop.

mod classify;
mod connect;
mod error;
pub mod policy;
mod run;

pub use classify::{classify_response, ClassifyFlags};
pub use connect::{handle_transport_error, handle_unexpected_error};
pub use error::FetchError;
pub use policy::{Disposition, RetryState, Verdict};
pub use run::{run_get, Fetched};
