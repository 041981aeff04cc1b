//! Crate wide constants and environment configuration.
//!
//! Library callers configure clients through [`crate::ClientOptions`]; the
//! values here are the defaults those options start from. [`EnvConfig`] is
//! what the `azure-network-summary` binary reads from the environment.

use crate::error::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

/// Module name reported in the `User-Agent` header.
pub const MODULE_NAME: &str = "armnetwork";
/// Module version reported in the `User-Agent` header.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Microsoft.Network REST API version every client targets by default.
pub const API_VERSION: &str = "2024-05-01";

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Base delay of the exponential backoff.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(800);
/// Upper bound for a single backoff delay.
pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Delay between two polls of a long-running operation when the service
/// does not send `Retry-After`.
pub const DEFAULT_POLL_FREQUENCY: Duration = Duration::from_secs(30);

/// A cached token is refreshed when it expires within this window.
pub const TOKEN_REFRESH_OFFSET_SECS: i64 = 300;

/// Azure cloud the clients talk to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cloud {
    #[default]
    AzurePublic,
    AzureChina,
    AzureGovernment,
    /// Any other ARM endpoint (Azure Stack, a local fake, ...).
    Custom { endpoint: String, audience: String },
}

impl Cloud {
    /// Resource Manager endpoint.
    pub fn endpoint(&self) -> &str {
        match self {
            Cloud::AzurePublic => "https://management.azure.com",
            Cloud::AzureChina => "https://management.chinacloudapi.cn",
            Cloud::AzureGovernment => "https://management.usgovcloudapi.net",
            Cloud::Custom { endpoint, .. } => endpoint,
        }
    }

    /// Token audience; the bearer scope is `<audience>/.default`.
    pub fn audience(&self) -> &str {
        match self {
            Cloud::AzurePublic => "https://management.core.windows.net/",
            Cloud::AzureChina => "https://management.core.chinacloudapi.cn",
            Cloud::AzureGovernment => "https://management.core.usgovcloudapi.net",
            Cloud::Custom { audience, .. } => audience,
        }
    }

    /// Scope requested from the credential.
    pub fn scope(&self) -> String {
        format!("{}/.default", self.audience().trim_end_matches('/'))
    }
}

impl FromStr for Cloud {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "public" | "azurepublic" | "azurecloud" => Ok(Cloud::AzurePublic),
            "china" | "azurechina" | "azurechinacloud" => Ok(Cloud::AzureChina),
            "government" | "azuregovernment" | "azureusgovernment" => Ok(Cloud::AzureGovernment),
            other => Err(Error::Config(format!("unknown Azure cloud: {other}"))),
        }
    }
}

/// Settings the CLI reads from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub subscription_id: String,
    pub cloud: Cloud,
    /// Only list virtual networks of this resource group when set.
    pub resource_group: Option<String>,
}

impl EnvConfig {
    /// Read `AZURE_SUBSCRIPTION_ID`, `AZURE_CLOUD` and `AZURE_RESOURCE_GROUP`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let subscription_id = lookup("AZURE_SUBSCRIPTION_ID")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config("AZURE_SUBSCRIPTION_ID is not set".to_string()))?;
        let cloud = match lookup("AZURE_CLOUD") {
            Some(name) => name.parse()?,
            None => Cloud::default(),
        };
        let resource_group = lookup("AZURE_RESOURCE_GROUP").filter(|s| !s.trim().is_empty());
        Ok(EnvConfig {
            subscription_id,
            cloud,
            resource_group,
        })
    }
}
