//! Provider capabilities.
//!
//! Describes how a price provider talks to its source and what the
//! reconciler should record as provenance for its quotes.

use crate::models::SourceMethod;

/// How a provider obtains listings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderKind {
    /// One request, answer in the response body.
    DirectQuery,
    /// Start a remote job, poll until it settles, then read its results.
    AsyncJob,
}

/// Describes the capabilities of a price provider.
///
/// Used by the registry for diagnostics and by the reconciler to fill in
/// the quote's source block.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    pub kind: ProviderKind,

    /// Reported as `source.method` on quotes from this provider.
    pub method: SourceMethod,

    /// Marketplace the listings come from, when it differs from the provider.
    pub marketplace: Option<&'static str>,

    /// Currency the source quotes in before conversion.
    pub native_currency: &'static str,

    /// Whether the provider refuses to start without a credential.
    pub requires_credential: bool,
}

impl ProviderCapabilities {
    pub fn direct(method: SourceMethod) -> Self {
        Self {
            kind: ProviderKind::DirectQuery,
            method,
            marketplace: None,
            native_currency: crate::models::USD,
            requires_credential: false,
        }
    }

    pub fn async_job(method: SourceMethod) -> Self {
        Self {
            kind: ProviderKind::AsyncJob,
            ..Self::direct(method)
        }
    }

    pub fn with_marketplace(mut self, marketplace: &'static str) -> Self {
        self.marketplace = Some(marketplace);
        self
    }

    pub fn with_native_currency(mut self, currency: &'static str) -> Self {
        self.native_currency = currency;
        self
    }

    pub fn with_credential(mut self) -> Self {
        self.requires_credential = true;
        self
    }
}
