//! Bearer token sources.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// An OAuth access token and the instant it stops being valid.
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        AccessToken {
            token: token.into(),
            expires_on,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Something that can hand out tokens for a set of scopes.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken>;
}

/// A fixed token. Useful for tests and for tokens obtained out of band.
#[derive(Debug, Clone)]
pub struct StaticTokenCredential {
    token: AccessToken,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        StaticTokenCredential {
            token: AccessToken::new(token, expires_on),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[&str]) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

/// Adapter over any `azure_identity` credential.
#[derive(Clone)]
pub struct AzureIdentityCredential {
    inner: Arc<dyn azure_core::auth::TokenCredential>,
}

impl AzureIdentityCredential {
    pub fn new(inner: Arc<dyn azure_core::auth::TokenCredential>) -> Self {
        AzureIdentityCredential { inner }
    }

    /// `azure_identity`'s default chain: service principal variables, then
    /// managed identity, then the Azure CLI. Sources are tried on first use.
    pub fn from_environment() -> Self {
        let inner = azure_identity::DefaultAzureCredentialBuilder::new().build();
        Self::new(Arc::new(inner))
    }
}

impl fmt::Debug for AzureIdentityCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureIdentityCredential").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for AzureIdentityCredential {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken> {
        let token = self
            .inner
            .get_token(scopes)
            .await
            .map_err(|e| Error::Authentication(e.to_string()))?;
        let expires_on = DateTime::from_timestamp(token.expires_on.unix_timestamp(), 0)
            .ok_or_else(|| Error::Authentication("token expiry out of range".to_string()))?;
        Ok(AccessToken::new(token.token.secret(), expires_on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_default_chain_builds_without_network() {
        let cred = AzureIdentityCredential::from_environment();
        assert!(format!("{cred:?}").starts_with("AzureIdentityCredential"));
    }

    #[tokio::test]
    async fn test_static_credential() {
        let expires = Utc::now() + Duration::hours(1);
        let cred = StaticTokenCredential::new("abc", expires);
        let token = cred.get_token(&["scope/.default"]).await.unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.expires_on, expires);
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AccessToken::new("supersecret", Utc::now());
        assert!(!format!("{token:?}").contains("supersecret"));
    }
}
