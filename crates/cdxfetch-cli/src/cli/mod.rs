//! CLI for the cdxfetch retrying GET helper.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cdxfetch_core::config;
use std::path::PathBuf;

use commands::{run_get, run_known_hosts};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cdxfetch")]
#[command(about = "cdxfetch: retrying GET for flaky CDX index servers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL, retrying transient failures.
    Get(GetArgs),

    /// List hostnames whose DNS failures are retried instead of fatal.
    KnownHosts,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// HTTP/HTTPS URL to fetch.
    pub url: String,

    /// Query parameter, repeatable (e.g. -p url=example.com/* -p limit=10).
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Extra request header, repeatable (e.g. -H "Accept: application/json").
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Treat 400/404 as "no captures found" (CDX index query).
    #[arg(long)]
    pub index_query: bool,

    /// Treat 404 as an empty result.
    #[arg(long = "allow-404")]
    pub allow_404: bool,

    /// Status code that is an expected, non-error answer.
    #[arg(long, value_name = "STATUS")]
    pub expect_status: Option<u16>,

    /// Write the body to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(format!("expected NAME:VALUE, got {s:?}")),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get(args) => run_get(&cfg, args).await?,
            CliCommand::KnownHosts => run_known_hosts(&cfg),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
