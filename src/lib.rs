//! Rust SDK for the Reyah API.
//!
//! Reyah extracts structured data from documents. This crate turns API calls
//! into authenticated HTTP requests, retries transient failures and maps
//! errors to typed variants.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reyah::{Client, ResourceName, TokenAuthProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), reyah::Error> {
//!     let client = Client::builder()
//!         .auth_provider(Arc::new(TokenAuthProvider::from_access_token("your-token")))
//!         .build()?;
//!
//!     let quota = client.quota().retrieve(ResourceName::ExtractionJob).await?;
//!     println!("{:?}", quota.quotas);
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! Every call gets a fixed attempt budget (3 by default). Network failures and
//! 5xx responses are retried with exponential backoff; 3xx and 4xx responses
//! and missing credentials fail immediately.
//!
//! # Events
//!
//! ```rust,no_run
//! # fn example(client: &reyah::Client) {
//! client.events().on("error", |event| {
//!     eprintln!("request failed: {:?}", event);
//! });
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod events;
mod executor;
mod request;
mod response;
mod services;
mod transport;
mod types;
mod version;

pub use auth::{AuthManager, AuthProvider, TokenAuthProvider, Tokens};
pub use client::{Client, ClientBuilder};
pub use config::{Config, Protocol};
pub use error::{
    classify, dispatch, Error, ErrorBody, ErrorHandler, FailureClass, RawResponse, RequestError,
    Result,
};
pub use events::{Event, EventEmitter};
pub use executor::{Executor, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use request::{QueryParams, Request, RetryContext};
pub use response::Response;
pub use services::{
    DataModelService, DataTypeService, DocumentModelService, FeedService, JobService,
    OAuthService, ProfileService, QuotaService,
};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
pub use version::SDK_VERSION;

pub use async_trait::async_trait;
pub use reqwest::Method;
