//! Substitution tables from identifier tokens to market display names.
//!
//! Keys are lowercase token sequences as they appear in catalog identifiers.
//! Longer keys must come before their prefixes; lookup takes the first match.

/// Leading glyph the markets put in front of every melee weapon.
pub const MELEE_GLYPH: &str = "★";

/// Prefix the markets put in front of StatTrak variants.
pub const STAT_TRAK_PREFIX: &str = "StatTrak™";

/// A base weapon name.
pub struct BaseName {
    pub tokens: &'static [&'static str],
    pub display: &'static str,
    pub melee: bool,
}

const fn melee(tokens: &'static [&'static str], display: &'static str) -> BaseName {
    BaseName {
        tokens,
        display,
        melee: true,
    }
}

const fn gun(tokens: &'static [&'static str], display: &'static str) -> BaseName {
    BaseName {
        tokens,
        display,
        melee: false,
    }
}

/// Base weapon names, matched at the start of the identifier.
pub const BASE_NAMES: &[BaseName] = &[
    melee(&["butterfly"], "Butterfly Knife"),
    melee(&["karambit"], "Karambit"),
    melee(&["talon"], "Talon Knife"),
    melee(&["m9", "bayonet"], "M9 Bayonet"),
    melee(&["m9"], "M9 Bayonet"),
    melee(&["skeleton"], "Skeleton Knife"),
    melee(&["ursus"], "Ursus Knife"),
    melee(&["stiletto"], "Stiletto Knife"),
    melee(&["classic"], "Classic Knife"),
    melee(&["bayonet"], "Bayonet"),
    melee(&["flip"], "Flip Knife"),
    melee(&["huntsman"], "Huntsman Knife"),
    melee(&["bowie"], "Bowie Knife"),
    gun(&["awp"], "AWP"),
    gun(&["ak", "47"], "AK-47"),
    gun(&["ak47"], "AK-47"),
    gun(&["ak"], "AK-47"),
    gun(&["m4a1", "s"], "M4A1-S"),
    gun(&["m4a1s"], "M4A1-S"),
    gun(&["m4a1"], "M4A1-S"),
    gun(&["m4a4"], "M4A4"),
    gun(&["m4"], "M4A4"),
    gun(&["glock", "18"], "Glock-18"),
    gun(&["glock"], "Glock-18"),
    gun(&["desert", "eagle"], "Desert Eagle"),
    gun(&["deagle"], "Desert Eagle"),
    gun(&["usp", "s"], "USP-S"),
    gun(&["usps"], "USP-S"),
    gun(&["usp"], "USP-S"),
    gun(&["p250"], "P250"),
    gun(&["five", "seven"], "Five-SeveN"),
    gun(&["fiveseven"], "Five-SeveN"),
    gun(&["tec", "9"], "Tec-9"),
    gun(&["tec9"], "Tec-9"),
];

/// Finish and pattern names, matched anywhere after the base name.
pub const FINISHES: &[(&[&str], &str)] = &[
    (&["gamma", "doppler"], "Gamma Doppler"),
    (&["gamma"], "Gamma Doppler"),
    (&["tiger", "tooth"], "Tiger Tooth"),
    (&["tiger"], "Tiger Tooth"),
    (&["crimson", "web"], "Crimson Web"),
    (&["crimson"], "Crimson Web"),
    (&["case", "hardened"], "Case Hardened"),
    (&["case"], "Case Hardened"),
    (&["doppler", "phase", "2"], "Doppler Phase 2"),
    (&["doppler"], "Doppler Phase 2"),
    (&["marble", "fade"], "Marble Fade"),
    (&["marble"], "Marble Fade"),
    (&["dragon", "lore"], "Dragon Lore"),
    (&["fire", "serpent"], "Fire Serpent"),
    (&["wild", "lotus"], "Wild Lotus"),
    (&["gold", "arabesque"], "Gold Arabesque"),
    (&["the", "prince"], "The Prince"),
    (&["prince"], "The Prince"),
    (&["welcome", "to", "the", "jungle"], "Welcome to the Jungle"),
    (&["welcome", "to", "jungle"], "Welcome to the Jungle"),
    (&["jungle"], "Welcome to the Jungle"),
    (&["x", "ray"], "X-Ray"),
    (&["xray"], "X-Ray"),
    (&["asimov"], "Asiimov"),
    (&["neon", "rider"], "Neon Rider"),
    (&["kill", "confirmed"], "Kill Confirmed"),
    (&["angry", "mob"], "Angry Mob"),
    (&["water", "elemental"], "Water Elemental"),
    (&["nuclear", "threat"], "Nuclear Threat"),
    (&["nuclear"], "Nuclear Threat"),
];
