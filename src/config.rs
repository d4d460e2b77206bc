//! Tunable timings and limits. Every field has a default, so a partial JSON
//! object only overrides what it names.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::storage::DEFAULT_STORAGE_KEY;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub storage_key: String,
    pub matching: MatchingConfig,
    pub puzzle: PuzzleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            matching: MatchingConfig::default(),
            puzzle: PuzzleConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchingConfig {
    /// Most words dealt into one game (each yields a card pair).
    pub max_words: usize,
    /// Debounce between the second pick and resolution.
    pub resolve_delay_ms: f64,
    pub match_feedback_ms: f64,
    pub mismatch_feedback_ms: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_words: 10,
            resolve_delay_ms: 300.0,
            match_feedback_ms: 400.0,
            mismatch_feedback_ms: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PuzzleConfig {
    pub max_attempts: u32,
    pub points_per_line: u32,
    pub pieces_per_reward: usize,
    /// How long the correct answers stay visible after the last failed attempt.
    pub reveal_ms: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            points_per_line: 10,
            pieces_per_reward: 3,
            reveal_ms: 3000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"puzzle":{"maxAttempts":5}}"#).unwrap();
        assert_eq!(cfg.puzzle.max_attempts, 5);
        assert_eq!(cfg.puzzle.points_per_line, 10);
        assert_eq!(cfg.matching, MatchingConfig::default());
        assert_eq!(cfg.storage_key, "vocabSets");
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(GameConfig::from_json("[").is_err());
    }
}
