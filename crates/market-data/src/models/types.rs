use std::borrow::Cow;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// The only currency a quote is ever expressed in.
pub const USD: &str = "USD";

/// Fixed schema version stamped on every quote and error body.
pub const SCHEMA_VERSION: &str = "1.0";
