//! Turns a logical API call into authenticated, retried transport attempts.

use crate::auth::AuthManager;
use crate::config::Config;
use crate::error::{dispatch, Error, ErrorHandler, Result};
use crate::events::{Event, EventEmitter};
use crate::request::{QueryParams, Request, RetryContext};
use crate::response::Response;
use crate::transport::Transport;
use rand::Rng;
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default number of transport attempts per logical call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(5);

/// How many attempts a logical call gets and how long to wait between them.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum transport attempts per logical call.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub backoff: Duration,
    /// Upper bound for the delay.
    pub max_backoff: Duration,
    /// Randomize each delay between 50% and 100% of its value.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Retry immediately, without any delay.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            jitter: false,
        }
    }

    /// Delay after `failed_attempts` failures (1-indexed).
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1).min(16);
        let delay = self
            .backoff
            .saturating_mul(2u32.pow(exponent))
            .min(self.max_backoff);

        if self.jitter && !delay.is_zero() {
            delay.mul_f64(rand::rng().random_range(0.5..=1.0))
        } else {
            delay
        }
    }
}

/// Executes API calls against the configured host.
///
/// Each call gets its own [`Request`] and [`RetryContext`]; only the auth
/// slot and the event emitter are shared between concurrent calls.
pub struct Executor {
    config: Config,
    transport: Arc<dyn Transport>,
    auth: Arc<AuthManager>,
    events: Arc<EventEmitter>,
    retry: RetryPolicy,
}

impl Executor {
    /// Create an executor with no auth provider, its own event emitter and
    /// the default retry policy.
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            auth: Arc::new(AuthManager::new()),
            events: Arc::new(EventEmitter::new()),
            retry: RetryPolicy::default(),
        }
    }

    /// Use `auth` to authenticate requests.
    pub fn with_auth(mut self, auth: Arc<AuthManager>) -> Self {
        self.auth = auth;
        self
    }

    /// Publish lifecycle events on `events`.
    pub fn with_events(mut self, events: Arc<EventEmitter>) -> Self {
        self.events = events;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The API configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The auth slot.
    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    /// The lifecycle event emitter.
    pub fn events(&self) -> &Arc<EventEmitter> {
        &self.events
    }

    /// The retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// `GET subpath`.
    pub async fn get(
        &self,
        subpath: &str,
        use_auth: bool,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute(Method::GET, subpath, use_auth, None::<&()>, query)
            .await
    }

    /// `POST subpath` with an optional JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        subpath: &str,
        use_auth: bool,
        data: Option<&B>,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute(Method::POST, subpath, use_auth, data, query)
            .await
    }

    /// `PUT subpath` with an optional JSON body.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        subpath: &str,
        use_auth: bool,
        data: Option<&B>,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute(Method::PUT, subpath, use_auth, data, query)
            .await
    }

    /// `PATCH subpath` with an optional JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        subpath: &str,
        use_auth: bool,
        data: Option<&B>,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute(Method::PATCH, subpath, use_auth, data, query)
            .await
    }

    /// `DELETE subpath`.
    pub async fn delete(
        &self,
        subpath: &str,
        use_auth: bool,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute(Method::DELETE, subpath, use_auth, None::<&()>, query)
            .await
    }

    /// Run one logical call and map failures with the default status mapping.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        subpath: &str,
        use_auth: bool,
        data: Option<&B>,
        query: Option<QueryParams>,
    ) -> Result<Response> {
        self.execute_with_handler(method, subpath, use_auth, data, query, None)
            .await
    }

    /// Run one logical call, letting `handler` map transport failures first.
    ///
    /// Emits `request` once before the first attempt and `error` once if the
    /// call ultimately fails (except when no auth provider is registered).
    /// A request that cannot be built fails without a `request` event.
    pub async fn execute_with_handler<B: Serialize + ?Sized>(
        &self,
        method: Method,
        subpath: &str,
        use_auth: bool,
        data: Option<&B>,
        query: Option<QueryParams>,
        handler: Option<ErrorHandler<'_>>,
    ) -> Result<Response> {
        let mut request = match self.prepare(method, subpath, data, query) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err, handler)),
        };

        self.events.emit(Event::Request(&request));

        let max_attempts = self.retry.max_attempts;
        let mut context = RetryContext::new();

        while context.attempt < max_attempts {
            debug!(
                method = %request.method,
                url = %request.url,
                attempt = context.attempt + 1,
                max_attempts = max_attempts,
                "Sending request"
            );

            match self.attempt(&mut request, &mut context, use_auth).await {
                Ok(response) => return Ok(response),
                Err(Error::NoAuthProvided) => return Err(Error::NoAuthProvided),
                Err(Error::Request(err)) if err.class().is_retryable() => {
                    let status = err.code;
                    context.record(err);
                    if context.attempt < max_attempts {
                        let delay = self.retry.delay_for(context.attempt);
                        warn!(
                            method = %request.method,
                            url = %request.url,
                            status = status,
                            attempt = context.attempt,
                            max_attempts = max_attempts,
                            "Request failed. Retrying in {:?}",
                            delay
                        );
                        if !delay.is_zero() {
                            sleep(delay).await;
                        }
                    }
                }
                Err(err) => return Err(self.fail(err, handler)),
            }
        }

        match context.last_error {
            Some(err) => {
                warn!(
                    method = %request.method,
                    url = %request.url,
                    attempts = context.attempt,
                    "Giving up on request"
                );
                Err(self.fail(Error::Request(err), handler))
            }
            // Only reachable with a zero attempt budget.
            None => Err(Error::TooManyAttempts),
        }
    }

    fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        subpath: &str,
        data: Option<&B>,
        query: Option<QueryParams>,
    ) -> Result<Request> {
        let mut request = Request::new(method, self.config.resolve(subpath)?);
        request.body = data.map(serde_json::to_value).transpose()?;
        if let Some(query) = query {
            request.query = query;
        }
        Ok(request)
    }

    async fn attempt(
        &self,
        request: &mut Request,
        context: &mut RetryContext,
        use_auth: bool,
    ) -> Result<Response> {
        if use_auth {
            let provider = self.auth.auth_provider()?;
            provider.apply_auth(request, context).await?;
        }
        self.transport
            .execute(request)
            .await
            .map_err(Error::Request)
    }

    fn fail(&self, err: Error, handler: Option<ErrorHandler<'_>>) -> Error {
        let err = dispatch(err, handler);
        self.events.emit(Event::Error(&err));
        err
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
