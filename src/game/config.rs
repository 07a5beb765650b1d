use crate::scoring::{STARTING_SCORE, Variant, VariantParseError};
use crate::storage::HIGH_SCORE_KEY;

/// Per-session settings. `Default` is the Classic game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub variant: Variant,
    pub starting_score: u32,
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl GameConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            starting_score: STARTING_SCORE,
            storage_key: HIGH_SCORE_KEY.to_string(),
        }
    }

    /// Build from a page query string such as `?variant=blitz&x=1`.
    /// A missing `variant` parameter selects the default; an unknown one is an error.
    pub fn from_query(query: &str) -> Result<Self, VariantParseError> {
        let variant = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "variant")
            .map(|(_, v)| v.parse::<Variant>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self::for_variant(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_variant() {
        assert_eq!(GameConfig::from_query("").unwrap().variant, Variant::Classic);
        assert_eq!(GameConfig::from_query("?lang=en").unwrap().variant, Variant::Classic);
        assert_eq!(GameConfig::from_query("?lang=en&variant=blitz").unwrap().variant, Variant::Blitz);
        assert!(GameConfig::from_query("?variant=turbo").is_err());
    }

    #[test]
    fn defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.starting_score, 10);
        assert_eq!(cfg.storage_key, "highestScore");
    }
}
