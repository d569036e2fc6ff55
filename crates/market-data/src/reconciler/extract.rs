//! Defensive field extraction from loosely-shaped provider payloads.
//!
//! Scraper and actor outputs change shape between runs and targets. Each
//! attribute is looked up under several known key names and the first usable
//! value wins; prices fall back to parsing free text such as `"¥1,234.56"`.

use std::str::FromStr;

use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::{Currency, PriceUnit, RawListing};

lazy_static! {
    /// First number in a price string, thousands separators allowed
    static ref PRICE_TEXT_REGEX: Regex =
        Regex::new(r"-?\d[\d,]*(?:\.\d+)?").expect("Invalid regex pattern");
}

/// Known key names per listing attribute, most specific first.
pub mod keys {
    pub const PRICE: &[&str] = &["price", "priceUSD", "usd"];
    pub const PRICE_TEXT: &[&str] = &["priceStr", "priceText"];
    pub const NAME: &[&str] = &["name", "itemName", "market_hash_name"];
    pub const WEAR: &[&str] = &["wear", "condition", "wear_name"];
    pub const IMAGE: &[&str] = &["image", "imageUrl", "icon_url"];
    pub const FLOAT: &[&str] = &["float", "floatValue", "float_value"];
    pub const PATTERN: &[&str] = &["pattern", "patternIndex", "paint_seed"];
}

/// Parse the first number out of free price text.
///
/// A minus sign counts whether it sits on the number (`"$-3"`) or before a
/// currency glyph (`"-$3"`).
pub fn parse_price_text(text: &str) -> Option<Decimal> {
    let found = PRICE_TEXT_REGEX.find(text)?;
    let value = Decimal::from_str(&found.as_str().replace(',', "")).ok()?;
    let signed_prefix = text[..found.start()]
        .trim_end_matches(|c: char| !c.is_alphanumeric() && c != '-')
        .ends_with('-');
    Some(if signed_prefix && value.is_sign_positive() {
        -value
    } else {
        value
    })
}

/// Decimal from a JSON number or numeric string.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => match number.as_i64() {
            Some(int) => Some(Decimal::from(int)),
            None => number.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(text) => Decimal::from_str(text.trim())
            .ok()
            .or_else(|| parse_price_text(text)),
        _ => None,
    }
}

/// First non-blank string under any of `keys`.
pub fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// First positive price under `keys`, else parsed from any text key.
pub fn first_price(value: &Value, keys: &[&str], text_keys: &[&str]) -> Option<Decimal> {
    let positive = |price: &Decimal| *price > Decimal::ZERO;
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(decimal_from_value))
        .find(positive)
        .or_else(|| {
            text_keys
                .iter()
                .filter_map(|key| value.get(*key)?.as_str().and_then(parse_price_text))
                .find(positive)
        })
}

/// First number (or numeric string) under any of `keys`.
pub fn first_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// First integer (or integral number / numeric string) under any of `keys`.
pub fn first_i64(value: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// First array found along any of `paths` (each a chain of object keys).
///
/// An empty path means the payload itself.
pub fn first_array<'a>(payload: &'a Value, paths: &[&[&str]]) -> Option<&'a Vec<Value>> {
    paths.iter().find_map(|path| {
        path.iter()
            .try_fold(payload, |node, key| node.get(*key))
            .and_then(Value::as_array)
    })
}

/// Flatten dataset records that may wrap their listings.
///
/// A record is either a listing, an array of listings, or an object with an
/// `items` array.
pub fn flatten_records(records: &[Value]) -> Vec<&Value> {
    records
        .iter()
        .flat_map(|record| match record {
            Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
            _ => match record.get("items").and_then(Value::as_array) {
                Some(inner) => inner.iter().collect(),
                None => vec![record],
            },
        })
        .filter(|record| record.is_object())
        .collect()
}

/// Build a listing from a flat scraped record.
///
/// `price_keys` lists the numeric price fields for this source; text
/// fields are the fallback.
pub fn listing_from_record(
    record: &Value,
    price_keys: &[&str],
    currency: impl Into<Currency>,
) -> RawListing {
    let amount = first_price(record, price_keys, keys::PRICE_TEXT);
    let mut listing = RawListing::new(amount, PriceUnit::Major, currency);
    listing.name = first_str(record, keys::NAME);
    listing.wear = first_str(record, keys::WEAR);
    listing.image_url = first_str(record, keys::IMAGE);
    listing.float_value = first_f64(record, keys::FLOAT);
    listing.pattern_index = first_i64(record, keys::PATTERN);
    listing
}
