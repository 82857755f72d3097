//! The account service the client asks for credentials before every call.
//!
//! Acquiring and refreshing OAuth tokens is somebody else's job; the client only ever asks
//! "who is signed in right now?".

use eyre::Context;
use oauth2::TokenResponse;
use oauth2::basic::BasicTokenResponse;
use std::path::Path;
use std::sync::RwLock;

/// The authentication state of one online account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service_authenticated: bool,
    pub access_token: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Source of account credentials, queried anew for every request.
pub trait AccountService: Send + Sync {
    fn service_statuses(&self) -> Vec<ServiceStatus>;
}

impl<F> AccountService for F
where
    F: Fn() -> Vec<ServiceStatus> + Send + Sync,
{
    fn service_statuses(&self) -> Vec<ServiceStatus> {
        self()
    }
}

/// An [`AccountService`] backed by persisted OAuth2 token responses.
///
/// Every stored token is reported as one authenticated account. Tokens can be swapped out with
/// [`StoredAccounts::replace_tokens`] while a client is using the store; the next call picks up
/// the change.
#[derive(Debug)]
pub struct StoredAccounts {
    client_id: String,
    client_secret: String,
    tokens: RwLock<Vec<BasicTokenResponse>>,
}

impl StoredAccounts {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tokens: Vec<BasicTokenResponse>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            tokens: RwLock::new(tokens),
        }
    }

    /// Parses a JSON array of token responses, as written to `tokens.json`.
    ///
    /// An empty string is treated as "no accounts".
    pub fn from_json(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        json: &str,
    ) -> eyre::Result<Self> {
        let tokens = if json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(json).context("parse stored YouTube access tokens")?
        };
        Ok(Self::new(client_id, client_secret, tokens))
    }

    /// Loads tokens from a file; a missing file means no accounts.
    pub fn load(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> eyre::Result<Self> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read tokens from {}", path.display()));
            }
        };
        Self::from_json(client_id, client_secret, &json)
    }

    pub fn replace_tokens(&self, tokens: Vec<BasicTokenResponse>) {
        *self
            .tokens
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = tokens;
    }
}

impl AccountService for StoredAccounts {
    fn service_statuses(&self) -> Vec<ServiceStatus> {
        self.tokens
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|token| ServiceStatus {
                service_authenticated: true,
                access_token: token.access_token().secret().to_string(),
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
            })
            .collect()
    }
}
