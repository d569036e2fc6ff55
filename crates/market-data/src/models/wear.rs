use std::fmt;

/// Cosmetic condition tier of a skin.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Wear {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl Wear {
    pub const ALL: [Wear; 5] = [
        Wear::FactoryNew,
        Wear::MinimalWear,
        Wear::FieldTested,
        Wear::WellWorn,
        Wear::BattleScarred,
    ];

    /// Parse the short identifier suffix (`fn`, `mw`, `ft`, `ww`, `bs`).
    pub fn from_suffix(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|wear| wear.suffix().eq_ignore_ascii_case(token))
    }

    /// Short suffix used in catalog identifiers.
    pub fn suffix(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "fn",
            Wear::MinimalWear => "mw",
            Wear::FieldTested => "ft",
            Wear::WellWorn => "ww",
            Wear::BattleScarred => "bs",
        }
    }

    /// Market display name, as it appears in market hash names.
    pub fn display_name(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "Factory New",
            Wear::MinimalWear => "Minimal Wear",
            Wear::FieldTested => "Field-Tested",
            Wear::WellWorn => "Well-Worn",
            Wear::BattleScarred => "Battle-Scarred",
        }
    }

    /// Normalize a free-form condition string.
    ///
    /// Accepts suffixes and display names in any case, with hyphens or
    /// spaces (`"ft"`, `"field tested"`, `"Field-Tested"`).
    pub fn normalize(input: &str) -> Option<Self> {
        let needle = fold(input);
        if needle.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|wear| wear.suffix() == needle || fold(wear.display_name()) == needle)
    }

    /// Whether a listing's free-form wear text refers to this tier.
    ///
    /// Case-insensitive substring match in either direction, hyphens compared
    /// as spaces. Blank wear text never matches.
    pub fn matches(&self, listing_wear: &str) -> bool {
        let listing = fold(listing_wear);
        if listing.is_empty() {
            return false;
        }
        let target = fold(self.display_name());
        listing.contains(&target) || target.contains(&listing)
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase().replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_suffix() {
        assert_eq!(Wear::from_suffix("fn"), Some(Wear::FactoryNew));
        assert_eq!(Wear::from_suffix("BS"), Some(Wear::BattleScarred));
        assert_eq!(Wear::from_suffix("stit"), None);
    }

    #[test]
    fn test_normalize_accepts_abbreviations_and_names() {
        assert_eq!(Wear::normalize("mw"), Some(Wear::MinimalWear));
        assert_eq!(Wear::normalize(" Field-Tested "), Some(Wear::FieldTested));
        assert_eq!(Wear::normalize("well worn"), Some(Wear::WellWorn));
        assert_eq!(Wear::normalize("pristine"), None);
        assert_eq!(Wear::normalize(""), None);
    }

    #[test]
    fn test_matches_either_direction() {
        assert!(Wear::FactoryNew.matches("Factory New"));
        assert!(Wear::FieldTested.matches("field tested"));
        assert!(Wear::FactoryNew.matches("StatTrak Factory New"));
        assert!(Wear::MinimalWear.matches("Minimal"));
        assert!(!Wear::FactoryNew.matches("Minimal Wear"));
        assert!(!Wear::FactoryNew.matches("  "));
    }

    #[test]
    fn test_display() {
        assert_eq!(Wear::BattleScarred.to_string(), "Battle-Scarred");
    }
}
