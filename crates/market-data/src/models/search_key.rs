use super::wear::Wear;

/// Provider-agnostic search key derived from a catalog identifier.
///
/// `term` is the canonical display name providers are queried with
/// (e.g. `"★ Butterfly Knife Gamma Doppler"`); `qualifier` narrows
/// listings to one condition tier when the identifier carried one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchKey {
    pub term: String,
    pub qualifier: Option<Wear>,
    pub stat_trak: bool,
}

impl SearchKey {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            qualifier: None,
            stat_trak: false,
        }
    }

    pub fn with_qualifier(mut self, qualifier: Wear) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Term with the condition appended, the way markets name a single item.
    pub fn market_hash_name(&self) -> String {
        match self.qualifier {
            Some(wear) => format!("{} ({})", self.term, wear),
            None => self.term.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_hash_name() {
        let key = SearchKey::new("AWP Asiimov").with_qualifier(Wear::FieldTested);
        assert_eq!(key.market_hash_name(), "AWP Asiimov (Field-Tested)");

        let bare = SearchKey::new("AWP Asiimov");
        assert_eq!(bare.market_hash_name(), "AWP Asiimov");
    }
}
