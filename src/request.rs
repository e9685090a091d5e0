//! Outgoing request model and per-call retry state.

use crate::error::{Error, RequestError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

/// Query string parameters, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, stringifying the value.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.push(key, value);
        self
    }

    /// Add a parameter in place, stringifying the value.
    pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Build parameters from any value that serializes to a flat JSON object.
    ///
    /// Strings are taken verbatim, `null` fields are skipped, arrays are
    /// joined with commas and every other value uses its JSON text.
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> Result<Self> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(Self(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, stringify(&v)))
                    .collect(),
            )),
            Value::Null => Ok(Self::new()),
            other => Err(Error::Config(format!(
                "query parameters must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// A request being prepared for the API.
///
/// Owned by a single logical call and mutated by the auth provider before
/// each attempt.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, without the query string.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Query string parameters.
    pub query: QueryParams,
    /// JSON body.
    pub body: Option<Value>,
}

impl Request {
    /// Create a request with no headers, query or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid value for header {}: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Set `Authorization: Bearer <token>`.
    pub fn bearer_auth(&mut self, token: &str) -> Result<()> {
        self.set_header(AUTHORIZATION, &format!("Bearer {}", token))
    }

    /// The URL with query parameters applied.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }
}

/// Retry state of one logical call.
///
/// Created fresh for every call and handed to the auth provider on each
/// attempt so it can react to previous failures.
#[derive(Debug, Clone, Default)]
pub struct RetryContext {
    /// Number of failed attempts so far.
    pub attempt: u32,
    /// The last transient failure, if any.
    pub last_error: Option<RequestError>,
}

impl RetryContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, error: RequestError) {
        self.attempt += 1;
        self.last_error = Some(error);
    }
}
