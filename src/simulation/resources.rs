//! Shared resources: configuration, the seeded random source, and the turn
//! clock that tracks which phase the year is in.

use std::path::Path;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::Superpower;

pub const START_YEAR: i64 = 1989;
pub const END_YEAR: i64 = 1997;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_year: i64,
    pub end_year: i64,
    /// Difficulty, 1 (beginner) to 4 (nuclear war and minor-country wars).
    pub level: u8,
    pub human_player: Superpower,
    pub two_player: bool,
    pub seed: u64,
    /// Base of the per-directive resource heuristic.
    pub policy_budget: i64,
    pub turn_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: START_YEAR,
            end_year: END_YEAR,
            level: MIN_LEVEL,
            human_player: Superpower::Usa,
            two_player: false,
            seed: 1989,
            policy_budget: 100,
            turn_interval_ms: 500,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: SimulationConfig = toml::from_str(raw)?;
        config.level = config.level.clamp(MIN_LEVEL, MAX_LEVEL);
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn turn_interval(&self) -> Duration {
        Duration::from_millis(self.turn_interval_ms.max(1))
    }
}

/// The one random source the simulation draws from. Its stream position is
/// saved with the game, so a resumed game draws what the original would have.
#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// True with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.0.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform draw in `low..=high`.
    pub fn range(&mut self, low: i64, high: i64) -> i64 {
        self.0.gen_range(low..=high)
    }

    /// Uniform draw in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.0.gen_range(0..items.len());
        items.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "winner", rename_all = "snake_case")]
pub enum TurnOutcome {
    Continuing,
    Win(Superpower),
    Tie,
    NuclearWar,
}

impl TurnOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TurnOutcome::Continuing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Planning,
    PrePlan,
    ReactNews,
    MainMove,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Resource, Serialize, Deserialize)]
pub struct TurnClock {
    pub phase: TurnPhase,
    pub outcome: TurnOutcome,
    pub turns_played: u32,
}

impl Default for TurnClock {
    fn default() -> Self {
        Self {
            phase: TurnPhase::Planning,
            outcome: TurnOutcome::Continuing,
            turns_played: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_fills_missing_keys_with_defaults() {
        let config = SimulationConfig::from_toml_str("level = 9\ntwo_player = true\nhuman_player = \"Ussr\"\n")
            .unwrap();
        assert_eq!(config.level, MAX_LEVEL);
        assert!(config.two_player);
        assert_eq!(config.human_player, Superpower::Ussr);
        assert_eq!(config.end_year, END_YEAR);
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(
            SimulationConfig::from_toml_str("level = \"hard\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = SimRng::seeded(42);
        let mut b = SimRng::seeded(42);
        let left: Vec<i64> = (0..16).map(|_| a.range(0, 100)).collect();
        let right: Vec<i64> = (0..16).map(|_| b.range(0, 100)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn restored_rng_continues_the_same_stream() {
        let mut rng = SimRng::seeded(7);
        for _ in 0..5 {
            rng.chance(0.5);
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SimRng = serde_json::from_str(&json).unwrap();

        let original: Vec<i64> = (0..8).map(|_| rng.range(0, 1000)).collect();
        let resumed: Vec<i64> = (0..8).map(|_| restored.range(0, 1000)).collect();
        assert_eq!(original, resumed);
    }
}
