//! `cdxfetch get <url>` – one retrying GET.

use anyhow::{Context, Result};
use cdxfetch_core::config::FetchConfig;
use cdxfetch_core::{Disposition, FetchClient, GetRequest, ParamValue};
use std::io::Write;

use crate::cli::GetArgs;

fn describe(disposition: Disposition) -> &'static str {
    match disposition {
        Disposition::Success => "success",
        Disposition::BenignEmpty => "no results",
        Disposition::ExpectedStatus => "expected status",
        Disposition::Redirect => "redirect (not followed)",
    }
}

fn build_request(args: GetArgs) -> GetRequest {
    let mut req = GetRequest::new(args.url)
        .index_query(args.index_query)
        .allow_404_as_empty(args.allow_404)
        .expected_status(args.expect_status);
    for (k, v) in args.params {
        req = req.param(k, ParamValue::Str(v));
    }
    for (k, v) in args.headers {
        req = req.header(k, v);
    }
    req
}

pub async fn run_get(cfg: &FetchConfig, args: GetArgs) -> Result<()> {
    let output = args.output.clone();
    let client = FetchClient::from_config(cfg);
    let fetched = client.get(build_request(args)).await?;

    let resp = &fetched.response;
    eprintln!(
        "HTTP {} ({}) after {} status retries, {} transport errors",
        resp.status,
        describe(fetched.disposition),
        fetched.stats.retries,
        fetched.stats.connect_errors
    );
    if fetched.disposition == Disposition::Redirect {
        if let Some(location) = resp.header("location") {
            eprintln!("Location: {}", location);
        }
    }

    match output {
        Some(path) => std::fs::write(&path, &resp.body)
            .with_context(|| format!("writing body to {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(&resp.body)
            .context("writing body to stdout")?,
    }
    Ok(())
}
