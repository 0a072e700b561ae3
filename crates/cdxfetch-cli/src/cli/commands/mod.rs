//! CLI command handlers.

mod get;
mod known_hosts;

pub use get::run_get;
pub use known_hosts::run_known_hosts;
