//! Search key derivation for price providers.
//!
//! Catalog identifiers are lowercase, hyphen-delimited tokens with an
//! optional trailing condition suffix (`fn`, `mw`, `ft`, `ww`, `bs`) and an
//! optional StatTrak marker (`stit`). Providers need the market display name
//! instead, so the identifier is turned into a [`SearchKey`](crate::models::SearchKey):
//!
//! ```text
//! "butterfly-gamma-fn"
//!        │ strip suffix        → qualifier = Factory New
//!        │ split + title-case  → Butterfly Gamma
//!        │ base-name table     → ★ Butterfly Knife
//!        │ finish table        → Gamma Doppler
//!        ▼
//! "★ Butterfly Knife Gamma Doppler"
//! ```
//!
//! Derivation is pure and never fails; unknown tokens pass through.

mod name_tables;
mod search_key;

pub use name_tables::{MELEE_GLYPH, STAT_TRAK_PREFIX};
pub use search_key::derive_search_key;
