//! Per-call client configuration.
//!
//! Configuration is never cached between calls: credentials can be revoked or refreshed by the
//! account service at any time, so every request starts again from the caller's defaults and
//! re-queries the accounts.

use crate::accounts::AccountService;
use std::sync::Arc;

/// Environment variable that replaces [`ClientConfig::api_root`].
pub const API_ROOT_ENV: &str = "YOUTUBE_SCOPE_APIROOT";

/// Environment variable whose mere presence forces unauthenticated mode.
pub const IGNORE_ACCOUNTS_ENV: &str = "YOUTUBE_SCOPE_IGNORE_ACCOUNTS";

const DEFAULT_API_ROOT: &str = "https://www.googleapis.com";

/// Everything a single request needs to know about where and how to talk to the API.
///
/// If `authenticated` is true, `access_token` is non-empty and is sent as a bearer token in
/// place of `api_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_root: String,
    pub api_key: String,
    pub user_agent: String,
    pub accept: String,
    pub authenticated: bool,
    pub access_token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            api_key: String::new(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            accept: "application/json".to_string(),
            authenticated: false,
            access_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

/// Overrides applied on top of the caller's defaults during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_root: Option<String>,
    pub ignore_accounts: bool,
}

impl Overrides {
    /// Reads [`API_ROOT_ENV`] and [`IGNORE_ACCOUNTS_ENV`] from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_root: std::env::var(API_ROOT_ENV).ok(),
            ignore_accounts: std::env::var_os(IGNORE_ACCOUNTS_ENV).is_some(),
        }
    }
}

/// Where a [`ConfigResolver`] gets its [`Overrides`] from.
#[derive(Debug, Clone, Default)]
pub enum OverrideSource {
    /// Re-read the process environment on every resolution.
    #[default]
    Environment,
    /// Use these overrides regardless of the environment.
    Fixed(Overrides),
}

impl OverrideSource {
    fn current(&self) -> Overrides {
        match self {
            Self::Environment => Overrides::from_env(),
            Self::Fixed(overrides) => overrides.clone(),
        }
    }
}

/// Builds a fresh [`ClientConfig`] for every call.
pub struct ConfigResolver {
    defaults: ClientConfig,
    overrides: OverrideSource,
    accounts: Arc<dyn AccountService>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("defaults", &self.defaults)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    pub fn new(
        defaults: ClientConfig,
        overrides: OverrideSource,
        accounts: Arc<dyn AccountService>,
    ) -> Self {
        Self {
            defaults,
            overrides,
            accounts,
        }
    }

    /// Resolves the configuration to use for the next request.
    ///
    /// The first status reporting `service_authenticated` with a non-empty access token wins.
    /// When none does, the config stays in API-key mode.
    pub fn resolve(&self) -> ClientConfig {
        let mut config = ClientConfig {
            authenticated: false,
            access_token: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            ..self.defaults.clone()
        };

        let overrides = self.overrides.current();
        if let Some(api_root) = overrides.api_root {
            config.api_root = api_root;
        }

        if overrides.ignore_accounts {
            tracing::debug!("ignoring accounts, YouTube client is unauthenticated");
            return config;
        }

        let authenticated = self
            .accounts
            .service_statuses()
            .into_iter()
            .find(|status| status.service_authenticated && !status.access_token.is_empty());

        if let Some(status) = authenticated {
            config.authenticated = true;
            config.access_token = status.access_token;
            config.client_id = status.client_id;
            config.client_secret = status.client_secret;
            tracing::debug!("YouTube client is authenticated");
        } else {
            tracing::debug!("YouTube client is unauthenticated");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::ServiceStatus;

    fn status(authenticated: bool, token: &str) -> ServiceStatus {
        ServiceStatus {
            service_authenticated: authenticated,
            access_token: token.to_string(),
            client_id: format!("id-{token}"),
            client_secret: format!("secret-{token}"),
        }
    }

    fn fixed(api_root: Option<&str>, ignore_accounts: bool) -> OverrideSource {
        OverrideSource::Fixed(Overrides {
            api_root: api_root.map(str::to_string),
            ignore_accounts,
        })
    }

    #[test]
    fn picks_first_authenticated_status() {
        let resolver = ConfigResolver::new(ClientConfig::default(), fixed(None, false), Arc::new(|| {
            vec![status(false, "a"), status(true, "b"), status(true, "c")]
        }));

        let config = resolver.resolve();
        assert!(config.authenticated);
        assert_eq!(config.access_token, "b");
        assert_eq!(config.client_id, "id-b");
        assert_eq!(config.client_secret, "secret-b");
    }

    #[test]
    fn no_authenticated_status_means_api_key_mode() {
        let defaults = ClientConfig {
            api_key: "the-key".to_string(),
            ..ClientConfig::default()
        };
        let resolver =
            ConfigResolver::new(defaults, fixed(None, false), Arc::new(|| vec![status(false, "a")]));

        let config = resolver.resolve();
        assert!(!config.authenticated);
        assert!(config.access_token.is_empty());
        assert_eq!(config.api_key, "the-key");
    }

    #[test]
    fn ignore_accounts_skips_the_account_service() {
        let resolver = ConfigResolver::new(
            ClientConfig::default(),
            fixed(Some("http://localhost:1234"), true),
            Arc::new(|| -> Vec<ServiceStatus> { panic!("account service must not be queried") }),
        );

        let config = resolver.resolve();
        assert!(!config.authenticated);
        assert_eq!(config.api_root, "http://localhost:1234");
    }

    #[test]
    fn resolves_fresh_state_every_call() {
        let tokens = Arc::new(std::sync::Mutex::new(vec![status(true, "first")]));
        let source = Arc::clone(&tokens);
        let resolver = ConfigResolver::new(
            ClientConfig::default(),
            fixed(None, false),
            Arc::new(move || source.lock().unwrap().clone()),
        );

        assert_eq!(resolver.resolve().access_token, "first");

        tokens.lock().unwrap().clear();
        let config = resolver.resolve();
        assert!(!config.authenticated);
        assert!(config.access_token.is_empty());
    }

    #[test]
    fn defaults_point_at_google() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root, "https://www.googleapis.com");
        assert_eq!(config.accept, "application/json");
        assert!(config.user_agent.starts_with("youtube-scope/"));
    }
}
