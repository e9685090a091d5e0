//! Successful API responses.

use crate::error::Result;
use crate::request::Request;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A successful response from the API.
#[derive(Debug, Clone)]
pub struct Response {
    /// Parsed JSON body, `Value::Null` when the body was empty.
    pub data: Value,
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status.
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// The request that produced this response.
    pub request: Request,
}

impl Response {
    /// Deserialize the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.data)?)
    }

    /// Deserialize the body field `key` into `T`, treating a missing field as `null`.
    pub fn field<T: DeserializeOwned>(mut self, key: &str) -> Result<T> {
        let value = self
            .data
            .as_object_mut()
            .and_then(|obj| obj.remove(key))
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}
