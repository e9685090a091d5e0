//! Authentication providers and the slot that holds the active one.

use crate::error::{Error, Result};
use crate::request::{Request, RetryContext};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Attaches credentials to outgoing requests.
///
/// Token refresh, if any, is the provider's own business: it receives the
/// retry context on every attempt and may renew before applying.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticate `request` in place.
    async fn apply_auth(&self, request: &mut Request, context: &mut RetryContext) -> Result<()>;

    /// Short name of the provider, for diagnostics.
    fn name(&self) -> &str;

    /// When the current credentials expire, if known.
    fn token_expiry(&self) -> Option<SystemTime>;

    /// Whether the provider can obtain fresh credentials on its own.
    fn can_be_renewed(&self) -> bool;

    /// Whether the provider currently holds usable credentials.
    fn is_logged_in(&self) -> bool;
}

/// Holds the single auth provider used by a client.
///
/// One identity per client: setting a provider replaces the previous one.
#[derive(Default)]
pub struct AuthManager {
    provider: RwLock<Option<Arc<dyn AuthProvider>>>,
}

impl AuthManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager holding `provider`.
    pub fn with_provider(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider: RwLock::new(Some(provider)),
        }
    }

    /// Set the active provider. Last writer wins.
    pub fn use_auth_provider(&self, provider: Arc<dyn AuthProvider>) {
        *self.provider.write() = Some(provider);
    }

    /// The active provider, or [`Error::NoAuthProvided`].
    pub fn auth_provider(&self) -> Result<Arc<dyn AuthProvider>> {
        self.provider.read().clone().ok_or(Error::NoAuthProvided)
    }

    /// Whether a provider has been set.
    pub fn has_auth_provider(&self) -> bool {
        self.provider.read().is_some()
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let provider = self.provider.read();
        f.debug_struct("AuthManager")
            .field("provider", &provider.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

/// Tokens issued by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    /// Bearer token sent with every request.
    pub access_token: String,
    /// Token used to obtain a new access token.
    #[serde(default)]
    pub refresh_token: String,
    /// Expiry of the access token, in seconds since the Unix epoch.
    #[serde(default)]
    pub expiration_date: u64,
}

/// Sends a fixed access token as `Authorization: Bearer`.
#[derive(Debug)]
pub struct TokenAuthProvider {
    tokens: RwLock<Tokens>,
}

impl TokenAuthProvider {
    /// Create a provider from issued tokens.
    pub fn new(tokens: Tokens) -> Self {
        Self {
            tokens: RwLock::new(tokens),
        }
    }

    /// Create a provider from a bare access token that never expires.
    pub fn from_access_token(access_token: impl Into<String>) -> Self {
        Self::new(Tokens {
            access_token: access_token.into(),
            refresh_token: String::new(),
            expiration_date: 0,
        })
    }

    /// Replace the held tokens, e.g. after a refresh done elsewhere.
    pub fn set_tokens(&self, tokens: Tokens) {
        *self.tokens.write() = tokens;
    }

    /// Copy of the held tokens.
    pub fn tokens(&self) -> Tokens {
        self.tokens.read().clone()
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn apply_auth(&self, request: &mut Request, _context: &mut RetryContext) -> Result<()> {
        let token = self.tokens.read().access_token.clone();
        if token.is_empty() {
            return Err(Error::Auth("no access token".into()));
        }
        request.bearer_auth(&token)
    }

    fn name(&self) -> &str {
        "token"
    }

    fn token_expiry(&self) -> Option<SystemTime> {
        match self.tokens.read().expiration_date {
            0 => None,
            secs => Some(UNIX_EPOCH + Duration::from_secs(secs)),
        }
    }

    fn can_be_renewed(&self) -> bool {
        !self.tokens.read().refresh_token.is_empty()
    }

    fn is_logged_in(&self) -> bool {
        if self.tokens.read().access_token.is_empty() {
            return false;
        }
        match self.token_expiry() {
            Some(expiry) => expiry > SystemTime::now(),
            None => true,
        }
    }
}
