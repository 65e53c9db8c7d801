//! Tunable game constants.
//!
//! Defaults reproduce the classic game: a ten-slot array seeded with
//! `[3, 1, 7, _, 2, 1, 4, 9]`, three levels of sixty seconds each, half a second
//! between search steps and a two second celebration after each cracked code.
//! With the `serde_json` feature a config can be loaded from JSON; missing
//! fields fall back to these defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::Slot;

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_INITIAL_SLOTS: [Slot; 8] =
    [Some(3), Some(1), Some(7), None, Some(2), Some(1), Some(4), Some(9)];
pub const DEFAULT_MAX_LEVEL: u32 = 3;
pub const DEFAULT_LEVEL_SECONDS: u32 = 60;
pub const DEFAULT_SEARCH_STEP_MS: f64 = 500.0;
pub const DEFAULT_CELEBRATION_MS: f64 = 2000.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Maximum number of present digits the array may hold.
    pub capacity: usize,
    /// Fixture restored by "reset array" and at the start of every level.
    pub initial_slots: Vec<Slot>,
    pub max_level: u32,
    pub level_seconds: u32,
    /// Delay between two comparison steps of the animated search.
    pub search_step_ms: f64,
    /// Pause after a level objective is met before the next level starts.
    pub celebration_ms: f64,
    /// Fixed RNG seed for reproducible target patterns; `None` draws entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            initial_slots: DEFAULT_INITIAL_SLOTS.to_vec(),
            max_level: DEFAULT_MAX_LEVEL,
            level_seconds: DEFAULT_LEVEL_SECONDS,
            search_step_ms: DEFAULT_SEARCH_STEP_MS,
            celebration_ms: DEFAULT_CELEBRATION_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.capacity == 0 {
            return Err(GameError::Config("capacity must be at least 1".into()));
        }
        if self.initial_slots.len() > self.capacity {
            return Err(GameError::Config(format!(
                "initial array has {} slots but capacity is {}",
                self.initial_slots.len(),
                self.capacity
            )));
        }
        if let Some(bad) = self.initial_slots.iter().flatten().find(|&&d| d > 9) {
            return Err(GameError::Config(format!("initial digit {bad} is not 0-9")));
        }
        if self.max_level == 0 {
            return Err(GameError::Config("max_level must be at least 1".into()));
        }
        if self.level_seconds == 0 {
            return Err(GameError::Config("level_seconds must be at least 1".into()));
        }
        if !(self.search_step_ms >= 0.0 && self.celebration_ms >= 0.0) {
            return Err(GameError::Config("delays must be non-negative".into()));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.initial_slots.len(), 8);
        assert_eq!(cfg.initial_slots.iter().flatten().count(), 7);
    }

    #[test]
    fn rejects_fixture_larger_than_capacity() {
        let cfg = GameConfig { capacity: 4, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn rejects_non_digit_fixture() {
        let cfg = GameConfig { initial_slots: vec![Some(12)], ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_levels_and_zero_timer() {
        assert!(GameConfig { max_level: 0, ..GameConfig::default() }.validate().is_err());
        assert!(GameConfig { level_seconds: 0, ..GameConfig::default() }.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = GameConfig::from_json(r#"{ "level_seconds": 30, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.level_seconds, 30);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.capacity, DEFAULT_CAPACITY);
        assert_eq!(cfg.initial_slots, DEFAULT_INITIAL_SLOTS.to_vec());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_errors_become_config_errors() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(GameError::Config(_))));
        assert!(matches!(
            GameConfig::from_json(r#"{ "capacity": 2 }"#),
            Err(GameError::Config(_))
        ));
    }
}
