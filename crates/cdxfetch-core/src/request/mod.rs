//! Request intent: URL, query parameters, headers and the classification flags.

mod normalize;

pub use normalize::{default_user_agent, normalize};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single query-parameter value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(n.into())
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

/// Query parameters, keyed by name. Ordered so diagnostics and URLs are stable.
pub type QueryParams = BTreeMap<String, ParamValue>;

/// Render params the way they appear in failure diagnostics: `{"k": v, ...}`.
pub fn describe_params(params: &QueryParams) -> String {
    let body: Vec<String> = params
        .iter()
        .map(|(k, v)| match v {
            ParamValue::Str(s) => format!("{:?}: {:?}", k, s),
            other => format!("{:?}: {}", k, other),
        })
        .collect();
    format!("{{{}}}", body.join(", "))
}

/// One logical GET: target, parameters, headers and how to read its status codes.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub url: String,
    pub params: QueryParams,
    pub headers: HashMap<String, String>,
    /// 400/404 mean "no captures found" rather than failure.
    pub index_query: bool,
    /// 404 is an empty result, not an error.
    pub allow_404_as_empty: bool,
    /// This exact status is a non-error outcome for the caller.
    pub expected_status: Option<u16>,
}

impl GetRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn index_query(mut self, yes: bool) -> Self {
        self.index_query = yes;
        self
    }

    pub fn allow_404_as_empty(mut self, yes: bool) -> Self {
        self.allow_404_as_empty = yes;
        self
    }

    pub fn expected_status(mut self, status: Option<u16>) -> Self {
        self.expected_status = status;
        self
    }
}
