//! Shared helpers for the integration tests: a wiremock server standing in for ARM.

#![allow(dead_code)]

use azure_network_arm::{ClientFactory, ClientOptions, Cloud, RetryOptions, StaticTokenCredential};
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Test token (not a real token).
pub const TEST_TOKEN: &str = "test-token";
pub const SUBSCRIPTION_ID: &str = "subid";
pub const API_VERSION: &str = "2024-05-01";
pub const POLL: Option<Duration> = Some(Duration::from_millis(5));

pub fn test_options(server: &MockServer) -> ClientOptions {
    ClientOptions::default()
        .with_cloud(Cloud::Custom {
            endpoint: server.uri(),
            audience: "https://management.core.windows.net/".to_string(),
        })
        .with_retry(RetryOptions {
            retry_delay: Duration::from_millis(1),
            max_retry_delay: Some(Duration::from_millis(10)),
            ..RetryOptions::default()
        })
        .with_application_id("integration-tests")
}

/// Create a client factory connected to a mock server.
pub fn setup_factory(server: &MockServer) -> ClientFactory {
    let credential = Arc::new(StaticTokenCredential::new(
        TEST_TOKEN,
        Utc::now() + ChronoDuration::hours(1),
    ));
    ClientFactory::new(SUBSCRIPTION_ID, credential, Some(test_options(server)))
        .expect("should build factory")
}

/// `/subscriptions/subid/resourceGroups/{rg}/providers/Microsoft.Network/{rest}`
pub fn rg_path(rg: &str, rest: &str) -> String {
    format!("/subscriptions/{SUBSCRIPTION_ID}/resourceGroups/{rg}/providers/Microsoft.Network/{rest}")
}

/// Absolute URL on the mock server for an operation status monitor.
pub fn operation_url(server: &MockServer, kind: &str, id: &str) -> String {
    format!(
        "{}/subscriptions/{SUBSCRIPTION_ID}/providers/Microsoft.Network/locations/westus/{kind}/{id}?api-version={API_VERSION}",
        server.uri()
    )
}

pub fn operation_path(kind: &str, id: &str) -> String {
    format!("/subscriptions/{SUBSCRIPTION_ID}/providers/Microsoft.Network/locations/westus/{kind}/{id}")
}
