//! Attempt tracking for provider fallback diagnostics.

use std::time::Duration;

use crate::errors::ProviderFailure;
use crate::models::ProviderId;

/// Record of a single provider attempt during a fetch.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub failure: Option<ProviderFailure>,
    pub elapsed: Duration,
}

impl ProviderAttempt {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Ordered attempts of one fetch.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, failure: ProviderFailure, elapsed: Duration) {
        self.attempts.push(ProviderAttempt {
            provider: failure.provider.clone(),
            failure: Some(failure),
            elapsed,
        });
    }

    pub fn record_success(&mut self, provider: ProviderId, elapsed: Duration) {
        self.attempts.push(ProviderAttempt {
            provider,
            failure: None,
            elapsed,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match &a.failure {
                None => format!("{}: SUCCESS", a.provider),
                Some(failure) => format!("{}: {}", a.provider, failure.reason),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Check if any provider succeeded.
    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(ProviderAttempt::is_success)
    }

    /// Failures in attempt order.
    pub fn failures(&self) -> Vec<ProviderFailure> {
        self.attempts
            .iter()
            .filter_map(|a| a.failure.clone())
            .collect()
    }
}
