use rust_decimal::Decimal;

use super::types::{Currency, USD};

/// Unit a provider quotes its amounts in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PriceUnit {
    /// Whole currency units (dollars, yuan).
    #[default]
    Major,
    /// Hundredths of the currency unit (cents).
    Minor,
}

/// A single marketplace listing as a provider reported it.
///
/// Shape and units vary per provider. Providers fill what they can find;
/// the reconciler decides what is usable.
#[derive(Clone, Debug, PartialEq)]
pub struct RawListing {
    pub name: Option<String>,
    /// Listed amount, `None` when the payload held no parseable price.
    pub amount: Option<Decimal>,
    pub unit: PriceUnit,
    pub currency: Currency,
    pub wear: Option<String>,
    pub image_url: Option<String>,
    pub float_value: Option<f64>,
    pub pattern_index: Option<i64>,
}

impl RawListing {
    pub fn new(amount: Option<Decimal>, unit: PriceUnit, currency: impl Into<Currency>) -> Self {
        Self {
            name: None,
            amount,
            unit,
            currency: currency.into(),
            wear: None,
            image_url: None,
            float_value: None,
            pattern_index: None,
        }
    }

    /// Listing priced in whole US dollars.
    pub fn usd(amount: Decimal) -> Self {
        Self::new(Some(amount), PriceUnit::Major, USD)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_wear(mut self, wear: impl Into<String>) -> Self {
        self.wear = Some(wear.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_float_value(mut self, float_value: f64) -> Self {
        self.float_value = Some(float_value);
        self
    }

    pub fn with_pattern_index(mut self, pattern_index: i64) -> Self {
        self.pattern_index = Some(pattern_index);
        self
    }

    /// Amount in whole currency units, whatever the listing currency.
    pub fn major_amount(&self) -> Option<Decimal> {
        let amount = self.amount?;
        Some(match self.unit {
            PriceUnit::Major => amount,
            PriceUnit::Minor => amount / Decimal::ONE_HUNDRED,
        })
    }

    /// Positive amount in whole US dollars, or `None` if the listing is
    /// unpriced, not in USD, or not positive.
    pub fn usd_price(&self) -> Option<Decimal> {
        if self.currency != USD {
            return None;
        }
        self.major_amount().filter(|price| *price > Decimal::ZERO)
    }

    /// Convert to USD by a fixed divisor (native units per dollar).
    ///
    /// Rounded to cents. Unpriced listings stay unpriced.
    pub fn convert_to_usd(mut self, units_per_usd: Decimal) -> Self {
        if self.currency == USD {
            return self;
        }
        self.amount = match self.major_amount() {
            Some(amount) if !units_per_usd.is_zero() => {
                Some((amount / units_per_usd).round_dp(2))
            }
            _ => None,
        };
        self.unit = PriceUnit::Major;
        self.currency = USD.into();
        self
    }
}
