//! Error types for the market data crate.
//!
//! This module provides:
//! - [`ProviderFailure`]: A typed failure from a single provider attempt
//! - [`FailureReason`]: Classification of why a provider attempt failed
//! - [`MarketDataError`]: Errors surfaced once the provider chain is done

use std::fmt;

use thiserror::Error;

use crate::models::ProviderId;

/// Why a single provider attempt failed.
///
/// Every reason is recoverable by moving on to the next provider; none of
/// them is retried against the same provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FailureReason {
    /// Credential rejected (HTTP 401/403).
    AuthError,
    /// Provider throttled the request (HTTP 429).
    RateLimited,
    /// Provider answered but had no usable listings.
    EmptyResult,
    /// Provider answered with a payload we could not decode.
    MalformedData,
    /// The attempt deadline or the job poll bound was exceeded.
    Timeout,
    /// Anything else: transport errors, other non-2xx statuses, failed jobs.
    Unknown,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::AuthError => "AuthError",
            FailureReason::RateLimited => "RateLimited",
            FailureReason::EmptyResult => "EmptyResult",
            FailureReason::MalformedData => "MalformedData",
            FailureReason::Timeout => "Timeout",
            FailureReason::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A failed attempt against one provider.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{provider}: {reason} ({detail})")]
pub struct ProviderFailure {
    /// Display name of the provider that failed
    pub provider: ProviderId,
    pub reason: FailureReason,
    /// Human-readable detail from the provider or transport
    pub detail: String,
}

impl ProviderFailure {
    pub fn new(
        provider: impl Into<ProviderId>,
        reason: FailureReason,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            reason,
            detail: detail.into(),
        }
    }

    pub fn auth(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::AuthError, detail)
    }

    pub fn rate_limited(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::RateLimited, detail)
    }

    pub fn empty(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::EmptyResult, detail)
    }

    pub fn malformed(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::MalformedData, detail)
    }

    pub fn timeout(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::Timeout, detail)
    }

    pub fn unknown(provider: impl Into<ProviderId>, detail: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::Unknown, detail)
    }
}

/// Errors that can occur during price resolution.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No providers are configured for the chain.
    #[error("No providers available")]
    NoProvidersAvailable,

    /// All providers were tried and all failed.
    /// Failures are kept in attempt order.
    #[error("All price sources failed. {}", join_failures(.failures))]
    AllProvidersFailed {
        /// One entry per provider, in the order they were tried
        failures: Vec<ProviderFailure>,
    },
}

impl MarketDataError {
    /// Per-provider failures behind this error, in attempt order.
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            Self::AllProvidersFailed { failures } => failures,
            Self::NoProvidersAvailable => &[],
        }
    }
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(". ")
}
