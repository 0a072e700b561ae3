//! Pre-dispatch adjustment of parameters and headers.

use std::collections::HashMap;

use super::{ParamValue, QueryParams};
use crate::retry::FetchError;

/// `cdxfetch/<crate version>`.
pub fn default_user_agent() -> String {
    format!("cdxfetch/{}", env!("CARGO_PKG_VERSION"))
}

/// Adjust parameters and headers before the first dispatch.
///
/// - `from_ts` becomes `from`; if both are given, `from_ts` wins.
/// - a non-integer `limit` is coerced to an integer, since pagination subtracts from it.
/// - `User-Agent` is added unless some casing of it is already present.
pub fn normalize(
    mut params: QueryParams,
    mut headers: HashMap<String, String>,
    user_agent: &str,
) -> Result<(QueryParams, HashMap<String, String>), FetchError> {
    if let Some(from) = params.remove("from_ts") {
        if let Some(previous) = params.insert("from".to_string(), from) {
            tracing::debug!("from_ts overrides from={}", previous);
        }
    }

    if let Some(limit) = params.get_mut("limit") {
        if !matches!(limit, ParamValue::Int(_)) {
            *limit = ParamValue::Int(coerce_limit(limit)?);
        }
    }

    if !headers.keys().any(|k| k.eq_ignore_ascii_case("user-agent")) {
        headers.insert("User-Agent".to_string(), user_agent.to_string());
    }

    Ok((params, headers))
}

fn coerce_limit(value: &ParamValue) -> Result<i64, FetchError> {
    let invalid = || FetchError::InvalidParam {
        name: "limit".to_string(),
        value: value.to_string(),
    };
    match value {
        ParamValue::Int(n) => Ok(*n),
        ParamValue::Float(x) => truncate(*x).ok_or_else(invalid),
        ParamValue::Str(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Ok(n);
            }
            s.parse::<f64>().ok().and_then(truncate).ok_or_else(invalid)
        }
    }
}

fn truncate(x: f64) -> Option<i64> {
    if x.is_finite() && x.abs() < i64::MAX as f64 {
        Some(x.trunc() as i64)
    } else {
        None
    }
}
