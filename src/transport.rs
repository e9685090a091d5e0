//! The physical HTTP exchange.

use crate::error::RequestError;
use crate::events::{Event, EventEmitter};
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Performs exactly one HTTP exchange.
///
/// Implementations must not retry: every failure is reported as a
/// [`RequestError`] and the executor decides what happens next.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and normalize the outcome.
    async fn execute(&self, request: &Request) -> std::result::Result<Response, RequestError>;
}

/// [`Transport`] backed by a `reqwest` client.
///
/// Mirrors every attempt on the `transport:request` and `transport:error` events.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    default_headers: HeaderMap,
    events: Arc<EventEmitter>,
}

impl ReqwestTransport {
    /// Wrap `http_client`, reporting attempts to `events`.
    pub fn new(http_client: reqwest::Client, events: Arc<EventEmitter>) -> Self {
        Self {
            http_client,
            default_headers: HeaderMap::new(),
            events,
        }
    }

    /// Headers sent with every request unless the request overrides them.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    async fn send(&self, request: &Request) -> std::result::Result<Response, RequestError> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), request.full_url())
            .headers(self.default_headers.clone())
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                RequestError::setup(request.clone(), e)
            } else {
                RequestError::no_response(request.clone(), e)
            }
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response.headers().clone();
        let data = match response.bytes().await {
            Ok(bytes) => parse_body(&bytes),
            // The status already tells what went wrong; keep it and drop the body.
            Err(e) if !status.is_success() => {
                debug!(
                    url = %request.url,
                    status = status.as_u16(),
                    error = %e,
                    "Could not read error response body"
                );
                Value::Null
            }
            Err(e) => return Err(RequestError::no_response(request.clone(), e)),
        };

        debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            "Received response"
        );

        if status.is_success() {
            Ok(Response {
                data,
                status: status.as_u16(),
                status_text,
                headers,
                request: request.clone(),
            })
        } else {
            Err(RequestError::from_response(
                request.clone(),
                status.as_u16(),
                status_text,
                headers,
                data,
            ))
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &Request) -> std::result::Result<Response, RequestError> {
        self.events.emit(Event::TransportRequest(request));
        let result = self.send(request).await;
        if let Err(err) = &result {
            self.events.emit(Event::TransportError(err));
        }
        result
    }
}

/// JSON when the body parses, the raw text otherwise, `Null` when empty.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
