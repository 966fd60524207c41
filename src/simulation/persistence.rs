//! JSON save games and the invariant-repair pass run on every load.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::simulation::{
    COUNTRY_COUNT, CountryId, CrisisManager, FIXED_SUPERPOWER_POPULARITY, INTEGRITY_MAX,
    NASTINESS_MAX, SimRng, SimulationConfig, TurnClock, WorldState,
};

pub const SAVE_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("malformed save game: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save game i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save game version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("save game tables have the wrong shape")]
    InvalidShape,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    /// Unix seconds.
    pub saved_at: u64,
    pub config: SimulationConfig,
    pub world: WorldState,
    pub crises: CrisisManager,
    pub clock: TurnClock,
    /// Position in the random stream, so resuming does not replay old draws.
    pub rng: SimRng,
}

impl SaveGame {
    pub fn new(
        config: SimulationConfig,
        world: WorldState,
        crises: CrisisManager,
        clock: TurnClock,
        rng: SimRng,
    ) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self {
            version: SAVE_VERSION,
            saved_at,
            config,
            world,
            crises,
            clock,
            rng,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a save and repairs the world it carries.
    pub fn from_json(raw: &str) -> Result<Self, PersistenceError> {
        let mut save: SaveGame = serde_json::from_str(raw)?;
        if save.version != SAVE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        if !has_valid_shape(&save.world) {
            return Err(PersistenceError::InvalidShape);
        }
        let repairs = repair_invariants(&mut save.world);
        if repairs > 0 {
            warn!(repairs, "save game needed repairs on load");
        }
        Ok(save)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), PersistenceError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PersistenceError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

fn clamp_into(value: &mut i64, low: i64, high: i64) -> usize {
    let clamped = (*value).clamp(low, high);
    let changed = usize::from(clamped != *value);
    *value = clamped;
    changed
}

fn has_valid_shape(world: &WorldState) -> bool {
    world.diplomacy.has_valid_shape()
        && world.policies.has_valid_shape()
        && world.countries.len() == usize::from(COUNTRY_COUNT)
        && world
            .countries
            .iter()
            .zip(CountryId::all())
            .all(|(country, id)| country.id == id)
}

/// Restores every structural invariant of a loaded world, returning how
/// many values had to change. A valid world comes back untouched.
pub fn repair_invariants(world: &mut WorldState) -> usize {
    let mut repairs = world.diplomacy.repair();
    repairs += world
        .policies
        .matrices_mut()
        .map(|matrix| matrix.clamp_levels())
        .sum::<usize>();

    for country in world.countries.iter_mut() {
        if country.government_strength < 1 {
            country.government_strength = 1;
            repairs += 1;
        }
        if country.is_superpower() {
            if country.insurgency_power != 1
                || country.government_popularity != FIXED_SUPERPOWER_POPULARITY
            {
                repairs += 1;
            }
            country.insurgency_power = 1;
            country.government_popularity = FIXED_SUPERPOWER_POPULARITY;
        }
    }

    repairs += clamp_into(&mut world.globals.nastiness, 0, NASTINESS_MAX);
    for state in world.globals.superpowers.iter_mut() {
        repairs += clamp_into(&mut state.integrity, i64::MIN, INTEGRITY_MAX);
    }

    let scores = world.expected_scores();
    if scores != world.globals.scores {
        world.globals.scores = scores;
        repairs += 1;
    }
    repairs
}
