//! Provider registry for orchestrating price providers.
//!
//! The registry holds the configured providers in priority order and walks
//! them for each request:
//! - every attempt is bounded by a deadline, and by what is left of the
//!   request deadline when one is set
//! - listings from a provider are reconciled into a quote
//! - any failure moves on to the next provider, never back
//! - every attempt is recorded for diagnostics

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::Instant;

use super::FetchDiagnostics;
use crate::errors::{MarketDataError, ProviderFailure};
use crate::models::{PriceQuote, ProviderId, QuoteContext};
use crate::provider::PriceProvider;
use crate::reconciler;

/// Deadline for one provider attempt, polling included.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(75_000);

/// Provider registry for orchestrating price fetching.
pub struct ProviderRegistry {
    /// Sorted by effective priority at construction
    providers: Vec<Arc<dyn PriceProvider>>,
    attempt_timeout: Duration,
    /// Budget for a whole `fetch_price` call, all attempts included
    request_timeout: Option<Duration>,
}

impl ProviderRegistry {
    /// Create a registry ordered by each provider's own priority.
    pub fn new(providers: Vec<Arc<dyn PriceProvider>>) -> Self {
        Self::with_priorities(providers, HashMap::new())
    }

    /// Create a new provider registry with custom priorities.
    ///
    /// # Arguments
    ///
    /// * `providers` - Price providers, in configuration order
    /// * `custom_priorities` - Priorities by provider id. Lower values = higher
    ///   priority. Providers without an entry use their own `priority()`;
    ///   ties keep configuration order.
    pub fn with_priorities(
        mut providers: Vec<Arc<dyn PriceProvider>>,
        custom_priorities: HashMap<String, i32>,
    ) -> Self {
        providers.sort_by_key(|p| {
            custom_priorities
                .get(p.id())
                .copied()
                .unwrap_or_else(|| p.priority() as i32)
        });

        Self {
            providers,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            request_timeout: None,
        }
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Bound every `fetch_price` call as a whole. Providers still untried
    /// when it runs out are recorded as timed out.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    /// Get the providers in the order they are tried.
    pub fn providers(&self) -> &[Arc<dyn PriceProvider>] {
        &self.providers
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Fetch a reconciled quote, falling back through providers in order.
    pub async fn fetch_price(&self, context: &QuoteContext) -> Result<PriceQuote, MarketDataError> {
        let (result, diagnostics) = self.fetch_price_with_diagnostics(context).await;
        if !diagnostics.attempts.is_empty() {
            debug!("Price fetch for '{}': {}", context.item_id, diagnostics.summary());
        }
        result
    }

    /// Fetch a quote and report every attempt made.
    pub async fn fetch_price_with_diagnostics(
        &self,
        context: &QuoteContext,
    ) -> (Result<PriceQuote, MarketDataError>, FetchDiagnostics) {
        let mut diagnostics = FetchDiagnostics::new();

        if self.providers.is_empty() {
            warn!("No price providers configured");
            return (Err(MarketDataError::NoProvidersAvailable), diagnostics);
        }

        let deadline = self.request_timeout.map(|timeout| Instant::now() + timeout);

        for provider in &self.providers {
            let started = Instant::now();

            let budget = match deadline {
                Some(deadline) => self
                    .attempt_timeout
                    .min(deadline.saturating_duration_since(started)),
                None => self.attempt_timeout,
            };
            if budget.is_zero() {
                let failure = ProviderFailure::timeout(
                    provider.name().to_string(),
                    "request deadline passed before this provider was tried",
                );
                warn!("{}", failure);
                diagnostics.record_failure(failure, Duration::ZERO);
                continue;
            }

            match self.attempt(provider.as_ref(), context, budget).await {
                Ok(quote) => {
                    let provider_name: ProviderId = Cow::Owned(provider.name().to_string());
                    if !diagnostics.attempts.is_empty() {
                        info!(
                            "'{}' priced by {} after {} failed attempt(s)",
                            context.item_id,
                            provider_name,
                            diagnostics.attempts.len()
                        );
                    }
                    diagnostics.record_success(provider_name, started.elapsed());
                    return (Ok(quote), diagnostics);
                }
                Err(failure) => {
                    warn!("{}, trying next provider", failure);
                    diagnostics.record_failure(failure, started.elapsed());
                }
            }
        }

        let failures = diagnostics.failures();
        (Err(MarketDataError::AllProvidersFailed { failures }), diagnostics)
    }

    /// One attempt bounded by `budget`: fetch, then reconcile.
    async fn attempt(
        &self,
        provider: &dyn PriceProvider,
        context: &QuoteContext,
        budget: Duration,
    ) -> Result<PriceQuote, ProviderFailure> {
        debug!(
            "Fetching '{}' from provider '{}' (term: {})",
            context.item_id,
            provider.id(),
            context.key.term
        );

        let listings = tokio::time::timeout(budget, provider.fetch_listings(&context.key))
            .await
            .map_err(|_| {
                ProviderFailure::timeout(
                    provider.name().to_string(),
                    format!("no answer within {}ms", budget.as_millis()),
                )
            })??;

        reconciler::reconcile(provider.name(), &provider.capabilities(), context, listings)
    }
}
