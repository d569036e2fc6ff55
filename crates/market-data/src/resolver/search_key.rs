//! Catalog identifier → search key derivation.

use crate::models::{SearchKey, Wear};

use super::name_tables::{BASE_NAMES, FINISHES, MELEE_GLYPH, STAT_TRAK_PREFIX};

/// Identifier token marking a StatTrak variant.
const STAT_TRAK_TOKEN: &str = "stit";

/// Derive the provider-agnostic search key for a catalog identifier.
///
/// `"butterfly-gamma-fn"` becomes `"★ Butterfly Knife Gamma Doppler"` with a
/// Factory New qualifier. Tokens missing from the name tables pass through
/// title-cased.
pub fn derive_search_key(item_id: &str) -> SearchKey {
    let mut tokens: Vec<String> = item_id
        .split('-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect();

    let stat_trak = tokens.last().is_some_and(|token| token == STAT_TRAK_TOKEN);
    if stat_trak {
        tokens.pop();
    }

    let qualifier = tokens.last().and_then(|token| Wear::from_suffix(token));
    if qualifier.is_some() {
        tokens.pop();
    }

    let mut words: Vec<String> = Vec::with_capacity(tokens.len() + 2);
    let mut rest: &[String] = &tokens;

    if let Some(base) = BASE_NAMES.iter().find(|base| starts_with(rest, base.tokens)) {
        if base.melee {
            words.push(MELEE_GLYPH.to_string());
        }
        if stat_trak {
            words.push(STAT_TRAK_PREFIX.to_string());
        }
        words.push(base.display.to_string());
        rest = &rest[base.tokens.len()..];
    } else if stat_trak {
        words.push(STAT_TRAK_PREFIX.to_string());
    }

    while let Some(first) = rest.first() {
        match FINISHES.iter().find(|(keys, _)| starts_with(rest, keys)) {
            Some((keys, display)) => {
                words.push((*display).to_string());
                rest = &rest[keys.len()..];
            }
            None => {
                words.push(title_case(first));
                rest = &rest[1..];
            }
        }
    }

    SearchKey {
        term: words.join(" "),
        qualifier,
        stat_trak,
    }
}

fn starts_with(tokens: &[String], keys: &[&str]) -> bool {
    tokens.len() >= keys.len() && tokens.iter().zip(keys).all(|(token, key)| token == key)
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knife_with_finish_and_wear() {
        let key = derive_search_key("butterfly-gamma-fn");
        assert_eq!(key.term, "★ Butterfly Knife Gamma Doppler");
        assert!(key.term.contains("★ Butterfly Knife"));
        assert!(key.term.contains("Gamma Doppler"));
        assert_eq!(key.qualifier, Some(Wear::FactoryNew));
        assert!(!key.stat_trak);
    }

    #[test]
    fn test_rifles_and_pistols() {
        assert_eq!(derive_search_key("ak-fire-serpent-ft").term, "AK-47 Fire Serpent");
        assert_eq!(derive_search_key("m4-howl-mw").term, "M4A4 Howl");
        assert_eq!(
            derive_search_key("m4a1-jungle-mw").term,
            "M4A1-S Welcome to the Jungle"
        );
        assert_eq!(derive_search_key("ak-xray-fn").term, "AK-47 X-Ray");
        assert_eq!(derive_search_key("awp-prince-fn").term, "AWP The Prince");
        assert_eq!(
            derive_search_key("five-seven-angry-mob-fn").term,
            "Five-SeveN Angry Mob"
        );
        assert_eq!(derive_search_key("tec9-nuclear-fn").term, "Tec-9 Nuclear Threat");
        assert_eq!(derive_search_key("p250-asimov-fn").term, "P250 Asiimov");
        assert_eq!(derive_search_key("deagle-blaze-fn").term, "Desert Eagle Blaze");
    }

    #[test]
    fn test_each_wear_suffix() {
        assert_eq!(derive_search_key("x-fn").qualifier, Some(Wear::FactoryNew));
        assert_eq!(derive_search_key("x-mw").qualifier, Some(Wear::MinimalWear));
        assert_eq!(derive_search_key("x-ft").qualifier, Some(Wear::FieldTested));
        assert_eq!(derive_search_key("x-ww").qualifier, Some(Wear::WellWorn));
        assert_eq!(derive_search_key("x-bs").qualifier, Some(Wear::BattleScarred));
    }

    #[test]
    fn test_no_wear_suffix() {
        let key = derive_search_key("karambit-fade");
        assert_eq!(key.term, "★ Karambit Fade");
        assert_eq!(key.qualifier, None);
    }

    #[test]
    fn test_stat_trak_suffix() {
        let key = derive_search_key("ak-vulcan-fn-stit");
        assert_eq!(key.term, "StatTrak™ AK-47 Vulcan");
        assert_eq!(key.qualifier, Some(Wear::FactoryNew));
        assert!(key.stat_trak);

        let knife = derive_search_key("karambit-doppler-fn-stit");
        assert_eq!(knife.term, "★ StatTrak™ Karambit Doppler Phase 2");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let key = derive_search_key("sawed-off-kraken-ww");
        assert_eq!(key.term, "Sawed Off Kraken");
        assert_eq!(key.qualifier, Some(Wear::WellWorn));
    }

    #[test]
    fn test_is_deterministic() {
        assert_eq!(
            derive_search_key("ursus-marble-fn"),
            derive_search_key("ursus-marble-fn")
        );
        assert_eq!(derive_search_key("ursus-marble-fn").term, "★ Ursus Knife Marble Fade");
    }
}
