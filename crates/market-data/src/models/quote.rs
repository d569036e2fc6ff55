use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::search_key::SearchKey;

/// Request context for price resolution
#[derive(Clone, Debug)]
pub struct QuoteContext {
    /// Catalog identifier the quote is for
    pub item_id: String,

    /// Derived search key
    pub key: SearchKey,

    /// Catalog display name, used when the representative listing has none
    pub default_name: String,

    /// Catalog variant (condition), used when no wear is known
    pub default_variant: Option<String>,

    /// Catalog image, used when the representative listing has none
    pub default_image_url: Option<String>,
}

/// How a provider obtained its listings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMethod {
    Api,
    Scrape,
}

/// Which provider produced a quote, for auditability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    pub method: SourceMethod,
    /// Number of listings the median was computed over
    pub sample_size: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    String,
    Number,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Display trait of the representative item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
    pub display_type: DisplayType,
}

impl Attribute {
    pub fn condition(wear: impl Into<String>) -> Self {
        Self {
            trait_type: "Condition".to_string(),
            value: AttributeValue::Text(wear.into()),
            display_type: DisplayType::String,
        }
    }

    pub fn float(value: f64) -> Self {
        Self {
            trait_type: "Float".to_string(),
            value: AttributeValue::Float(value),
            display_type: DisplayType::Number,
        }
    }

    pub fn pattern(value: i64) -> Self {
        Self {
            trait_type: "Pattern".to_string(),
            value: AttributeValue::Integer(value),
            display_type: DisplayType::Number,
        }
    }
}

/// Canonical per-item market price.
///
/// Built fresh for every request from live listings; never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[serde(rename = "productId")]
    pub item_id: String,

    /// Median listing price in USD, always positive
    pub price: Decimal,

    /// Always "USD"
    pub unit: String,

    pub timestamp: DateTime<Utc>,

    /// Always "1.0"
    pub schema_version: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(rename = "source")]
    pub provenance: Provenance,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SCHEMA_VERSION;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_wire_shape() {
        let quote = PriceQuote {
            item_id: "awp-asiimov-fn".to_string(),
            price: dec!(152.5),
            unit: "USD".to_string(),
            timestamp: Utc::now(),
            schema_version: SCHEMA_VERSION.to_string(),
            name: "AWP | Asiimov".to_string(),
            variant: Some("Factory New".to_string()),
            image_url: None,
            provenance: Provenance {
                provider: "CSFloat".to_string(),
                marketplace: Some("CSFloat Market".to_string()),
                method: SourceMethod::Api,
                sample_size: 3,
            },
            attributes: Some(vec![
                Attribute::condition("Factory New"),
                Attribute::float(0.0123),
                Attribute::pattern(661),
            ]),
        };

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["productId"], "awp-asiimov-fn");
        assert_eq!(json["price"], 152.5);
        assert_eq!(json["schemaVersion"], "1.0");
        assert_eq!(json["source"]["provider"], "CSFloat");
        assert_eq!(json["source"]["method"], "api");
        assert_eq!(json["source"]["sampleSize"], 3);
        assert!(json.get("imageUrl").is_none());
        assert_eq!(json["attributes"][0]["trait_type"], "Condition");
        assert_eq!(json["attributes"][0]["display_type"], "string");
        assert_eq!(json["attributes"][2]["value"], 661);
    }
}
