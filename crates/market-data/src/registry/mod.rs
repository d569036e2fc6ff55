//! Provider registry module.
//!
//! This module provides orchestration for price providers, including:
//! - Provider registration and priority ordering
//! - Per-attempt deadlines
//! - Ordered fallback with attempt diagnostics

mod diagnostics;
mod provider_registry;

pub use diagnostics::{FetchDiagnostics, ProviderAttempt};
pub use provider_registry::{ProviderRegistry, DEFAULT_ATTEMPT_TIMEOUT};
