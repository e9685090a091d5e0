//! Main Reyah client implementation.

use crate::auth::{AuthManager, AuthProvider};
use crate::config::{Config, Protocol};
use crate::error::{Error, Result};
use crate::events::EventEmitter;
use crate::executor::{Executor, RetryPolicy};
use crate::services::{
    DataModelService, DataTypeService, DocumentModelService, FeedService, JobService,
    OAuthService, ProfileService, QuotaService,
};
use crate::transport::{ReqwestTransport, Transport};
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    config: Config,
    timeout: Duration,
    retry: RetryPolicy,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    events: Option<Arc<EventEmitter>>,
    transport: Option<Arc<dyn Transport>>,
    user_agent_suffix: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a builder targeting the default API host.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            auth_provider: None,
            events: None,
            transport: None,
            user_agent_suffix: None,
        }
    }

    /// Replace the whole API configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Point the client at a base URL such as `http://localhost:8080`.
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        self.config = Config::from_base_url(url)?;
        Ok(self)
    }

    /// Set the API protocol.
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.config.protocol = protocol;
        self
    }

    /// Set the API hostname.
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.config.hostname = hostname.into();
        self
    }

    /// Set the per-attempt timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts per call.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts;
        self
    }

    /// Replace the retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Authenticate requests with `provider`.
    pub fn auth_provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Publish lifecycle events on an existing emitter.
    pub fn events(mut self, events: Arc<EventEmitter>) -> Self {
        self.events = Some(events);
        self
    }

    /// Use a custom transport instead of `reqwest`.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.config.hostname.trim().is_empty() {
            return Err(Error::Config("API hostname is required".into()));
        }

        // Warn about insecure connections
        if self.config.protocol == Protocol::Http {
            warn!(
                base_url = %self.config.base_url(),
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let events = self.events.unwrap_or_default();

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let user_agent = build_user_agent(self.user_agent_suffix.as_deref());
                let mut headers = HeaderMap::new();
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
                headers.insert(
                    USER_AGENT,
                    HeaderValue::from_str(&user_agent)
                        .map_err(|e| Error::Config(format!("invalid user agent: {}", e)))?,
                );

                let http_client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(Error::Http)?;

                Arc::new(ReqwestTransport::new(http_client, events.clone()).default_headers(headers))
            }
        };

        let auth = Arc::new(AuthManager::new());
        if let Some(provider) = self.auth_provider {
            auth.use_auth_provider(provider);
        }

        let executor = Executor::new(self.config, transport)
            .with_auth(auth)
            .with_events(events)
            .with_retry_policy(self.retry);

        Ok(Client {
            executor: Arc::new(executor),
        })
    }
}

/// The Reyah SDK client.
///
/// Cheap to clone; clones share the executor, auth slot and event emitter.
///
/// # Example
///
/// ```rust,no_run
/// use reyah::{Client, TokenAuthProvider};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), reyah::Error> {
///     let client = Client::builder()
///         .auth_provider(Arc::new(TokenAuthProvider::from_access_token("token")))
///         .build()?;
///
///     let me = client.profile().me().await?;
///     println!("{} {}", me.first_name, me.last_name);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    executor: Arc<Executor>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The request executor, for calls not covered by a service.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Lifecycle events of this client.
    pub fn events(&self) -> &Arc<EventEmitter> {
        self.executor.events()
    }

    /// Set the auth provider, replacing any previous one.
    pub fn use_auth_provider(&self, provider: Arc<dyn AuthProvider>) {
        self.executor.auth().use_auth_provider(provider);
    }

    /// The active auth provider, or [`Error::NoAuthProvided`].
    pub fn auth_provider(&self) -> Result<Arc<dyn AuthProvider>> {
        self.executor.auth().auth_provider()
    }

    // === Services ===

    /// Quota service.
    pub fn quota(&self) -> QuotaService<'_> {
        QuotaService::new(&self.executor)
    }

    /// Profile service.
    pub fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(&self.executor)
    }

    /// OAuth client service.
    pub fn oauth(&self) -> OAuthService<'_> {
        OAuthService::new(&self.executor)
    }

    /// Feed service.
    pub fn feed(&self) -> FeedService<'_> {
        FeedService::new(&self.executor)
    }

    /// Extraction and rendering job service.
    pub fn job(&self) -> JobService<'_> {
        JobService::new(&self.executor)
    }

    /// Data model service.
    pub fn data_model(&self) -> DataModelService<'_> {
        DataModelService::new(&self.executor)
    }

    /// Document model service.
    pub fn document_model(&self) -> DocumentModelService<'_> {
        DocumentModelService::new(&self.executor)
    }

    /// Data type service.
    pub fn data_type(&self) -> DataTypeService<'_> {
        DataTypeService::new(&self.executor)
    }
}
