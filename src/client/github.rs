use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, StoreError};

/// Connection settings for the GitHub client factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            user_agent: concat!("playground-store/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// An authenticated GitHub API client.
///
/// Holds everything needed to issue requests; no connection is opened until a
/// request is made.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubClient {
    token: String,
    base_url: String,
    user_agent: String,
}

impl GitHubClient {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("token {}", self.token)
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builds API clients from stored credentials.
pub trait ClientFactory: Send + Sync {
    /// Build a client for `credential`.
    ///
    /// Callers only invoke this with non-empty credentials.
    fn make_client(&self, credential: &str) -> Result<GitHubClient>;
}

/// Factory producing [`GitHubClient`]s against a configured endpoint.
#[derive(Debug, Clone, Default)]
pub struct GitHubClientFactory {
    config: GitHubConfig,
}

impl GitHubClientFactory {
    pub fn new(config: GitHubConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for GitHubClientFactory {
    fn make_client(&self, credential: &str) -> Result<GitHubClient> {
        if credential.trim().is_empty() {
            return Err(StoreError::client("credential is blank"));
        }
        if credential.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(StoreError::client(
                "credential contains whitespace or control characters",
            ));
        }

        Ok(GitHubClient {
            token: credential.to_string(),
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            user_agent: self.config.user_agent.clone(),
        })
    }
}

/// The session's derived client.
///
/// Only hydration can create one, from the persisted credential. It is never
/// serialized, so a stale client can never be read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHandle(Arc<GitHubClient>);

impl ClientHandle {
    pub(crate) fn synthesize(client: GitHubClient) -> Self {
        Self(Arc::new(client))
    }

    pub fn client(&self) -> &GitHubClient {
        &self.0
    }
}
