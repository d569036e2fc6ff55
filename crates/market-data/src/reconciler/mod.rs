//! Listing reconciliation.
//!
//! Turns one provider's raw listings into a single [`PriceQuote`]:
//!
//! 1. narrow to the requested wear (falling back to every listing when none match)
//! 2. keep positive USD prices, cents converted to dollars
//! 3. take the median
//! 4. pick a representative listing for display metadata
//!
//! Reconciliation is pure; the registry calls it once per provider response.

pub mod extract;

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::ProviderFailure;
use crate::models::{
    Attribute, PriceQuote, Provenance, QuoteContext, RawListing, SCHEMA_VERSION, USD,
};
use crate::provider::ProviderCapabilities;

/// Largest distance from the median at which a listing counts as sitting on it.
const REPRESENTATIVE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reconcile a provider's listings into a quote.
///
/// Fails with `EmptyResult` when no listing carries a usable USD price.
pub fn reconcile(
    provider_name: &str,
    capabilities: &ProviderCapabilities,
    context: &QuoteContext,
    listings: Vec<RawListing>,
) -> Result<PriceQuote, ProviderFailure> {
    let listings = filter_by_qualifier(context, listings);

    let priced: Vec<(usize, Decimal)> = listings
        .iter()
        .enumerate()
        .filter_map(|(index, listing)| listing.usd_price().map(|price| (index, price)))
        .collect();

    if priced.is_empty() {
        return Err(ProviderFailure::empty(
            provider_name.to_string(),
            "No valid prices found",
        ));
    }

    let mut prices: Vec<Decimal> = priced.iter().map(|(_, price)| *price).collect();
    let price = median(&mut prices);

    let representative = priced
        .iter()
        .find(|(_, candidate)| (*candidate - price).abs() < REPRESENTATIVE_TOLERANCE)
        .map(|(index, _)| &listings[*index])
        .unwrap_or(&listings[listings.len() / 2]);

    debug!(
        "{}: median {} over {} prices ({} listings)",
        provider_name,
        price,
        prices.len(),
        listings.len()
    );

    Ok(build_quote(
        provider_name,
        capabilities,
        context,
        price,
        prices.len(),
        representative,
    ))
}

/// Listings matching the requested wear, or all of them when none match.
fn filter_by_qualifier(context: &QuoteContext, listings: Vec<RawListing>) -> Vec<RawListing> {
    let Some(qualifier) = context.key.qualifier else {
        return listings;
    };

    let matching: Vec<RawListing> = listings
        .iter()
        .filter(|listing| {
            listing
                .wear
                .as_deref()
                .is_some_and(|wear| qualifier.matches(wear))
        })
        .cloned()
        .collect();

    if matching.is_empty() {
        debug!(
            "No listings match {}, using all {}",
            qualifier,
            listings.len()
        );
        listings
    } else {
        matching
    }
}

/// Median of a non-empty price list. Sorts in place.
pub fn median(prices: &mut [Decimal]) -> Decimal {
    prices.sort();
    let mid = prices.len() / 2;
    if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / Decimal::TWO
    } else {
        prices[mid]
    }
}

fn build_quote(
    provider_name: &str,
    capabilities: &ProviderCapabilities,
    context: &QuoteContext,
    price: Decimal,
    sample_size: usize,
    representative: &RawListing,
) -> PriceQuote {
    let wear = representative
        .wear
        .clone()
        .or_else(|| context.key.qualifier.map(|q| q.display_name().to_string()));

    let mut attributes = Vec::new();
    if let Some(wear) = &wear {
        attributes.push(Attribute::condition(wear.clone()));
    }
    if let Some(float_value) = representative.float_value {
        attributes.push(Attribute::float(float_value));
    }
    if let Some(pattern) = representative.pattern_index {
        attributes.push(Attribute::pattern(pattern));
    }

    PriceQuote {
        item_id: context.item_id.clone(),
        price,
        unit: USD.to_string(),
        timestamp: Utc::now(),
        schema_version: SCHEMA_VERSION.to_string(),
        name: representative
            .name
            .clone()
            .unwrap_or_else(|| context.default_name.clone()),
        variant: wear.or_else(|| context.default_variant.clone()),
        image_url: representative
            .image_url
            .clone()
            .or_else(|| context.default_image_url.clone()),
        provenance: Provenance {
            provider: provider_name.to_string(),
            marketplace: capabilities.marketplace.map(str::to_string),
            method: capabilities.method,
            sample_size,
        },
        attributes: (!attributes.is_empty()).then_some(attributes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureReason;
    use crate::models::{AttributeValue, PriceUnit, SearchKey, SourceMethod, Wear};
    use rust_decimal_macros::dec;

    fn context(qualifier: Option<Wear>) -> QuoteContext {
        let mut key = SearchKey::new("AK-47 Redline");
        key.qualifier = qualifier;
        QuoteContext {
            item_id: "ak-redline-ft".to_string(),
            key,
            default_name: "AK-47 | Redline".to_string(),
            default_variant: Some("Field-Tested".to_string()),
            default_image_url: Some("https://img/default.png".to_string()),
        }
    }

    fn caps() -> ProviderCapabilities {
        ProviderCapabilities::direct(SourceMethod::Api).with_marketplace("CSFloat Market")
    }

    fn usd(amounts: &[Decimal]) -> Vec<RawListing> {
        amounts.iter().map(|amount| RawListing::usd(*amount)).collect()
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&mut [dec!(40), dec!(10), dec!(30), dec!(20)]), dec!(25));
        assert_eq!(median(&mut [dec!(30), dec!(10), dec!(20)]), dec!(20));
        assert_eq!(median(&mut [dec!(7)]), dec!(7));
    }

    #[test]
    fn test_quote_from_listings() {
        let quote = reconcile(
            "CSFloat",
            &caps(),
            &context(None),
            usd(&[dec!(10), dec!(20), dec!(30), dec!(40)]),
        )
        .unwrap();

        assert_eq!(quote.price, dec!(25));
        assert_eq!(quote.item_id, "ak-redline-ft");
        assert_eq!(quote.unit, "USD");
        assert_eq!(quote.schema_version, "1.0");
        assert_eq!(quote.provenance.provider, "CSFloat");
        assert_eq!(quote.provenance.marketplace.as_deref(), Some("CSFloat Market"));
        assert_eq!(quote.provenance.method, SourceMethod::Api);
        assert_eq!(quote.provenance.sample_size, 4);
        assert_eq!(quote.name, "AK-47 | Redline");
        assert_eq!(quote.image_url.as_deref(), Some("https://img/default.png"));
        assert_eq!(quote.variant.as_deref(), Some("Field-Tested"));
        assert!(quote.attributes.is_none());
    }

    #[test]
    fn test_representative_sits_on_median() {
        let listings = vec![
            RawListing::usd(dec!(9.99)).with_name("low"),
            RawListing::usd(dec!(10.00)).with_name("mid"),
            RawListing::usd(dec!(10.01)).with_name("high"),
        ];
        let quote = reconcile("X", &caps(), &context(None), listings).unwrap();
        assert_eq!(quote.price, dec!(10.00));
        assert_eq!(quote.name, "mid");
    }

    #[test]
    fn test_representative_falls_back_to_middle_listing() {
        let listings = vec![
            RawListing::usd(dec!(10)).with_name("a"),
            RawListing::usd(dec!(20)).with_name("b"),
            RawListing::usd(dec!(40)).with_name("c"),
            RawListing::usd(dec!(50)).with_name("d"),
        ];
        let quote = reconcile("X", &caps(), &context(None), listings).unwrap();
        assert_eq!(quote.price, dec!(30));
        assert_eq!(quote.name, "c");
    }

    #[test]
    fn test_qualifier_filters_listings() {
        let listings = vec![
            RawListing::usd(dec!(100)).with_wear("Factory New"),
            RawListing::usd(dec!(10)).with_wear("Field-Tested"),
            RawListing::usd(dec!(12)).with_wear("field tested"),
            RawListing::usd(dec!(999)),
        ];
        let quote = reconcile("X", &caps(), &context(Some(Wear::FieldTested)), listings).unwrap();
        assert_eq!(quote.price, dec!(11));
        assert_eq!(quote.provenance.sample_size, 2);
    }

    #[test]
    fn test_qualifier_without_matches_uses_everything() {
        let listings = vec![
            RawListing::usd(dec!(10)).with_wear("Well-Worn"),
            RawListing::usd(dec!(20)).with_wear("Battle-Scarred"),
            RawListing::usd(dec!(30)),
        ];
        let quote = reconcile("X", &caps(), &context(Some(Wear::FactoryNew)), listings).unwrap();
        assert_eq!(quote.price, dec!(20));
        assert_eq!(quote.provenance.sample_size, 3);
        assert_eq!(quote.variant.as_deref(), Some("Battle-Scarred"));
    }

    #[test]
    fn test_cents_are_converted() {
        let listings = vec![
            RawListing::new(Some(dec!(1999)), PriceUnit::Minor, "USD"),
            RawListing::new(Some(dec!(2001)), PriceUnit::Minor, "USD"),
        ];
        let quote = reconcile("X", &caps(), &context(None), listings).unwrap();
        assert_eq!(quote.price, dec!(20.00));
    }

    #[test]
    fn test_invalid_prices_are_discarded() {
        let listings = vec![
            RawListing::usd(dec!(0)),
            RawListing::usd(dec!(-5)),
            RawListing::new(None, PriceUnit::Major, "USD"),
            RawListing::new(Some(dec!(500)), PriceUnit::Major, "CNY"),
            RawListing::usd(dec!(15)),
        ];
        let quote = reconcile("X", &caps(), &context(None), listings).unwrap();
        assert_eq!(quote.price, dec!(15));
        assert_eq!(quote.provenance.sample_size, 1);
    }

    #[test]
    fn test_no_valid_prices_is_empty_result() {
        let failure = reconcile("Apify", &caps(), &context(None), usd(&[dec!(0)])).unwrap_err();
        assert_eq!(failure.reason, FailureReason::EmptyResult);
        assert_eq!(failure.provider, "Apify");

        let failure = reconcile("Apify", &caps(), &context(None), Vec::new()).unwrap_err();
        assert_eq!(failure.reason, FailureReason::EmptyResult);
    }

    #[test]
    fn test_attributes_from_representative() {
        let listings = vec![RawListing::usd(dec!(250))
            .with_name("★ Karambit | Fade (Factory New)")
            .with_wear("Factory New")
            .with_image_url("https://img/karambit.png")
            .with_float_value(0.0123)
            .with_pattern_index(412)];
        let quote = reconcile("CSFloat", &caps(), &context(Some(Wear::FactoryNew)), listings).unwrap();

        assert_eq!(quote.name, "★ Karambit | Fade (Factory New)");
        assert_eq!(quote.image_url.as_deref(), Some("https://img/karambit.png"));
        let attributes = quote.attributes.unwrap();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0].trait_type, "Condition");
        assert_eq!(attributes[0].value, AttributeValue::Text("Factory New".to_string()));
        assert_eq!(attributes[1].value, AttributeValue::Float(0.0123));
        assert_eq!(attributes[2].value, AttributeValue::Integer(412));
    }

    #[test]
    fn test_wear_falls_back_to_qualifier() {
        let quote = reconcile(
            "Steam",
            &ProviderCapabilities::direct(SourceMethod::Api),
            &context(Some(Wear::MinimalWear)),
            usd(&[dec!(5)]),
        )
        .unwrap();
        assert_eq!(quote.variant.as_deref(), Some("Minimal Wear"));
        assert_eq!(quote.provenance.marketplace, None);
        let attributes = quote.attributes.unwrap();
        assert_eq!(attributes, vec![Attribute::condition("Minimal Wear")]);
    }
}
