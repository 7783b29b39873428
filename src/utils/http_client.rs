// ABOUTME: HTTP client construction with request timeout, connect timeout and user agent
// ABOUTME: Builds the reqwest clients used by the chat backend and the Firestore store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Connection timeout applied to every client
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// User agent sent by every outbound request
pub const USER_AGENT: &str = concat!("wellness-coach/", env!("CARGO_PKG_VERSION"));

/// Create a new HTTP client with a custom request timeout
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs.max(1))))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_identifies_itself() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = create_client_with_timeout(5).get(server.uri()).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 204);
    }

    #[tokio::test]
    async fn test_request_timeout_applies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let error = create_client_with_timeout(1).get(server.uri()).send().await.unwrap_err();
        assert!(error.is_timeout());
    }
}
