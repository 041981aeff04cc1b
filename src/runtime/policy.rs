//! Retry and bearer token policies applied by the [`super::Pipeline`].

use super::credential::{AccessToken, TokenCredential};
use super::request::Request;
use crate::config::{
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_DELAY, DEFAULT_RETRY_DELAY, TOKEN_REFRESH_OFFSET_SECS,
};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use url::{Host, Url};

/// Status codes that are retried.
pub const RETRYABLE_STATUS_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

const HEADER_RETRY_AFTER_MS: &str = "retry-after-ms";
const HEADER_X_MS_RETRY_AFTER_MS: &str = "x-ms-retry-after-ms";
const HEADER_RETRY_AFTER: &str = "retry-after";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOptions {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Base delay of the exponential backoff.
    pub retry_delay: Duration,
    /// Cap on the backoff delay. A `Retry-After` hint above it is not
    /// retried. `None` removes the cap.
    pub max_retry_delay: Option<Duration>,
    pub status_codes: Vec<u16>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        RetryOptions {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_retry_delay: Some(DEFAULT_MAX_RETRY_DELAY),
            status_codes: RETRYABLE_STATUS_CODES.to_vec(),
        }
    }
}

impl RetryOptions {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.status_codes.contains(&status)
    }

    /// Backoff before retry number `attempt` (1-based): `(2^attempt - 1) * retry_delay`
    /// with 0.8 to 1.3 jitter, capped at `max_retry_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = (1u64 << attempt.min(30)) - 1;
        let base = self.retry_delay.as_millis() as u64 * factor;
        let jitter = rand::thread_rng().gen_range(0.8..1.3);
        let delay = Duration::from_millis((base as f64 * jitter) as u64);
        match self.max_retry_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }

    /// Delay before the next attempt: the service hint when present, the backoff otherwise.
    ///
    /// `None` when the service asks to wait longer than `max_retry_delay`;
    /// the response is then handed back instead of retried.
    pub fn delay(&self, attempt: u32, headers: Option<&HeaderMap>) -> Option<Duration> {
        match headers.and_then(retry_after) {
            Some(hint) => match self.max_retry_delay {
                Some(max) if hint > max => None,
                _ => Some(hint),
            },
            None => Some(self.backoff(attempt)),
        }
    }
}

/// Delay requested by the service through `retry-after-ms`, `x-ms-retry-after-ms`
/// or `Retry-After` (seconds or an HTTP date), in that order.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim);

    for name in [HEADER_RETRY_AFTER_MS, HEADER_X_MS_RETRY_AFTER_MS] {
        if let Some(ms) = get(name).and_then(|v| v.parse::<u64>().ok()) {
            return Some(Duration::from_millis(ms));
        }
    }

    let value = get(HEADER_RETRY_AFTER)?;
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?;
    let wait = at.with_timezone(&Utc) - Utc::now();
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        None => false,
    }
}

/// Adds `Authorization: Bearer` to each request, caching the token until it
/// is close to expiry.
pub struct BearerTokenPolicy {
    credential: Arc<dyn TokenCredential>,
    scopes: Vec<String>,
    cache: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for BearerTokenPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenPolicy")
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl BearerTokenPolicy {
    pub fn new(credential: Arc<dyn TokenCredential>, scopes: Vec<String>) -> Self {
        BearerTokenPolicy {
            credential,
            scopes,
            cache: RwLock::new(None),
        }
    }

    fn is_fresh(token: &AccessToken) -> bool {
        token.expires_on - Utc::now() > chrono::Duration::seconds(TOKEN_REFRESH_OFFSET_SECS)
    }

    async fn token(&self) -> Result<String> {
        if let Some(token) = self.cache.read().await.as_ref() {
            if Self::is_fresh(token) {
                return Ok(token.token.clone());
            }
        }

        let mut cache = self.cache.write().await;
        if let Some(token) = cache.as_ref() {
            if Self::is_fresh(token) {
                return Ok(token.token.clone());
            }
        }
        log::debug!("requesting token for scopes {:?}", self.scopes);
        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        let token = self.credential.get_token(&scopes).await?;
        let secret = token.token.clone();
        *cache = Some(token);
        Ok(secret)
    }

    pub async fn authorize(&self, request: &mut Request) -> Result<()> {
        let url = request.url();
        if url.scheme() != "https" && !is_loopback(url) {
            return Err(Error::InsecureTransport(url.to_string()));
        }
        let token = self.token().await?;
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            Error::InvalidHeader {
                name: AUTHORIZATION.to_string(),
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        request.insert_header_value(AUTHORIZATION, value);
        Ok(())
    }
}
