//! HTTP plumbing shared by the providers.
//!
//! Maps transport errors and response statuses onto [`FailureReason`]s so
//! every provider reports failures the same way.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::errors::{FailureReason, ProviderFailure};

/// Transport timeout for a single outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("skinprice/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt carried into a failure detail.
const DETAIL_LIMIT: usize = 200;

pub(crate) fn build_client(timeout: Duration) -> Client {
    build_client_with(timeout, USER_AGENT)
}

fn build_client_with(timeout: Duration, user_agent: &str) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|e| {
            warn!(
                "HTTP client setup failed ({}); using defaults without the {}ms timeout",
                e,
                timeout.as_millis()
            );
            Client::new()
        })
}

/// Classify a response status. `None` for 2xx.
pub fn classify_status(provider: &str, status: StatusCode, body: &str) -> Option<ProviderFailure> {
    if status.is_success() {
        return None;
    }

    let reason = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureReason::AuthError,
        StatusCode::TOO_MANY_REQUESTS => FailureReason::RateLimited,
        _ => FailureReason::Unknown,
    };

    let excerpt = excerpt(body);
    let detail = if excerpt.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), excerpt)
    };
    Some(ProviderFailure::new(provider.to_string(), reason, detail))
}

/// Classify a reqwest error raised before a usable response arrived.
pub fn transport_failure(provider: &str, error: &reqwest::Error) -> ProviderFailure {
    if error.is_timeout() {
        ProviderFailure::timeout(provider.to_string(), "request timed out")
    } else if error.is_decode() {
        ProviderFailure::malformed(provider.to_string(), format!("Decode failed: {}", error))
    } else {
        ProviderFailure::unknown(provider.to_string(), format!("Request failed: {}", error))
    }
}

/// Read a response as JSON after checking its status.
pub(crate) async fn read_json(provider: &str, response: Response) -> Result<Value, ProviderFailure> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_failure(provider, &e))?;

    if let Some(failure) = classify_status(provider, status, &body) {
        return Err(failure);
    }

    if body.trim().is_empty() {
        return Err(ProviderFailure::empty(
            provider.to_string(),
            "empty response body",
        ));
    }

    debug!("{} response: HTTP {} ({} bytes)", provider, status, body.len());

    serde_json::from_str(&body).map_err(|e| {
        ProviderFailure::malformed(provider.to_string(), format!("invalid JSON: {}", e))
    })
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(DETAIL_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_setup_failure_falls_back() {
        // A header value with a newline is rejected by the builder.
        let _client = build_client_with(Duration::from_secs(1), "bad\nagent");
        let _ok = build_client(DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_success_is_not_a_failure() {
        assert!(classify_status("X", StatusCode::OK, "").is_none());
        assert!(classify_status("X", StatusCode::CREATED, "{}").is_none());
    }

    #[test]
    fn test_status_mapping() {
        let reason = |status| {
            classify_status("X", status, "")
                .map(|failure| failure.reason)
                .unwrap()
        };
        assert_eq!(reason(StatusCode::UNAUTHORIZED), FailureReason::AuthError);
        assert_eq!(reason(StatusCode::FORBIDDEN), FailureReason::AuthError);
        assert_eq!(reason(StatusCode::TOO_MANY_REQUESTS), FailureReason::RateLimited);
        assert_eq!(reason(StatusCode::NOT_FOUND), FailureReason::Unknown);
        assert_eq!(reason(StatusCode::BAD_GATEWAY), FailureReason::Unknown);
    }

    #[test]
    fn test_detail_carries_status_and_body_excerpt() {
        let failure = classify_status("CSFloat", StatusCode::FORBIDDEN, "  key revoked \n").unwrap();
        assert_eq!(failure.provider, "CSFloat");
        assert_eq!(failure.detail, "HTTP 403: key revoked");

        let long_body = "x".repeat(1000);
        let failure = classify_status("CSFloat", StatusCode::BAD_REQUEST, &long_body).unwrap();
        assert_eq!(failure.detail.len(), "HTTP 400: ".len() + DETAIL_LIMIT);
    }
}
