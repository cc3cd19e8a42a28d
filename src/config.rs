//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::pricing::MONEY_SCALE;

/// How the fractional part of an amount is rendered in words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaisaMode {
    /// Append "and <N> Paisa" when the amount has a fractional part
    #[default]
    Words,
    /// Spell only the rupee part
    Truncate,
}

/// Settings shared by the draft and the invoice manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places for persisted and displayed amounts
    pub scale: i64,
    /// Paisa rendering for `amount_in_words`
    pub paisa: PaisaMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale: MONEY_SCALE,
            paisa: PaisaMode::Words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.scale, 2);
        assert_eq!(config.paisa, PaisaMode::Words);
    }
}
