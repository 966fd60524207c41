//! The canonical simulation state and the builder for the 1989 position.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::data::{
    COUNTRY_SEEDS, CountrySeed, POLICY_SEEDS, USA_AFFINITY, USA_DEFAULT_AFFINITY, USSR_AFFINITY,
    USSR_DEFAULT_AFFINITY,
};
use crate::simulation::{
    AFFINITY_MIN, Country, CountryFlags, CountryId, DiplomaticMatrix, PolicyBook, PolicyChange,
    Scores, SimulationConfig, StrengthSnapshot, Superpower, TurnOutcome, calculate_scores,
    floor_div, harmonic_blend,
};

pub const NASTINESS_MAX: i64 = 127;
pub const STARTING_NASTINESS: i64 = 8;
pub const FIXED_SUPERPOWER_POPULARITY: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperpowerState {
    pub pugnacity: i64,
    pub integrity: i64,
    pub adventure: i64,
}

impl Default for SuperpowerState {
    fn default() -> Self {
        Self {
            pugnacity: 32,
            integrity: 127,
            adventure: 64,
        }
    }
}

/// Running totals of upheavals, for end-of-game statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTallies {
    pub coups: u32,
    pub revolutions: u32,
    pub finlandizations: u32,
    pub crises: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    pub year: i64,
    pub nastiness: i64,
    pub superpowers: [SuperpowerState; 2],
    pub scores: Scores,
    /// Prestige won or lost in crises, carried on top of the computed scores.
    pub crisis_prestige: Scores,
    pub quit_flag: bool,
    pub win_flag: bool,
    pub winner: Option<Superpower>,
    pub nuclear_war: bool,
    pub tallies: EventTallies,
}

impl GlobalState {
    pub fn superpower(&self, superpower: Superpower) -> &SuperpowerState {
        &self.superpowers[superpower.slot()]
    }

    pub fn superpower_mut(&mut self, superpower: Superpower) -> &mut SuperpowerState {
        &mut self.superpowers[superpower.slot()]
    }

    pub fn outcome(&self) -> TurnOutcome {
        if self.nuclear_war {
            TurnOutcome::NuclearWar
        } else if self.win_flag {
            self.winner.map_or(TurnOutcome::Tie, TurnOutcome::Win)
        } else if self.quit_flag {
            TurnOutcome::Tie
        } else {
            TurnOutcome::Continuing
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub year: i64,
    pub scores: Scores,
    pub nastiness: i64,
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Eq, Resource, Serialize, Deserialize)]
pub struct WorldState {
    pub countries: Vec<Country>,
    pub diplomacy: DiplomaticMatrix,
    pub policies: PolicyBook,
    pub globals: GlobalState,
    pub history: Vec<HistoryEntry>,
    /// Policy changes made since the last reaction phase.
    pub pending_news: Vec<PolicyChange>,
}

impl WorldState {
    pub fn country(&self, id: CountryId) -> &Country {
        &self.countries[id.index() - 1]
    }

    pub fn country_mut(&mut self, id: CountryId) -> &mut Country {
        &mut self.countries[id.index() - 1]
    }

    /// Adds to global tension. Returns true when this pushed the world into
    /// nuclear war.
    pub fn raise_nastiness(&mut self, delta: i64) -> bool {
        let next = (self.globals.nastiness + delta).clamp(0, NASTINESS_MAX);
        self.globals.nastiness = next;
        if next >= NASTINESS_MAX && !self.globals.nuclear_war {
            self.declare_nuclear_war();
            return true;
        }
        false
    }

    /// Terminal exchange between the superpowers.
    pub fn declare_nuclear_war(&mut self) {
        self.diplomacy
            .set(CountryId::USA, CountryId::USSR, AFFINITY_MIN);
        self.globals.nastiness = NASTINESS_MAX;
        for superpower in Superpower::ALL {
            self.globals.superpower_mut(superpower).pugnacity = NASTINESS_MAX;
        }
        self.globals.quit_flag = true;
        self.globals.win_flag = false;
        self.globals.winner = None;
        self.globals.nuclear_war = true;
    }

    /// Scores the world should show: the matrix-derived standing plus the
    /// crisis prestige ledger.
    pub fn expected_scores(&self) -> Scores {
        calculate_scores(self) + self.globals.crisis_prestige
    }

    pub fn refresh_scores(&mut self) {
        self.globals.scores = self.expected_scores();
    }
}

fn build_country(seed: &CountrySeed) -> Option<Country> {
    let id = CountryId::new(seed.id)?;
    let gnp = (seed.gnp / 2).max(1);
    let military_spending = seed.military_spending / 2;
    let population = seed.population.max(1);
    let military_men = seed.military_men;
    let maturity = (256 - seed.deaths / population).max(0);

    let temp = military_spending / 2;
    let military_power = harmonic_blend(4, temp, military_men);
    let prestige_value = harmonic_blend(16, temp, military_men);
    let insurgency_power = if id.is_superpower() {
        1
    } else {
        let exposed = floor_div((256 - maturity) * population, 256);
        harmonic_blend(4, exposed / 8 + 1, exposed)
    };

    let military_fraction = floor_div(255 * military_spending, 10 * gnp);
    let investment_fraction = seed.investment_fraction;
    let consumption_fraction = (255 - military_fraction - investment_fraction).max(0);
    let government_popularity = if id.is_superpower() {
        FIXED_SUPERPOWER_POPULARITY
    } else {
        10 + (128 - seed.government_wing.abs()) / 8
    };

    let government_strength = military_power.max(1);
    let insurgency_strength = insurgency_power;

    Some(Country {
        id,
        name: seed.name.to_string(),
        gnp,
        population,
        military_spending,
        military_men,
        government_wing: seed.government_wing,
        insurgency_wing: seed.insurgency_wing,
        draft_fraction: military_men * 255 / population,
        deaths: seed.deaths,
        left_power: seed.government_wing < 0,
        dont_mess: seed.dont_mess,
        government_strength,
        insurgency_strength,
        government_popularity,
        government_stability: seed.government_stability,
        military_power,
        insurgency_power,
        prestige_value,
        strength_ratio: government_strength / insurgency_strength.max(1),
        consumption_fraction,
        investment_fraction,
        military_fraction,
        consumption_spending: consumption_fraction * gnp / 256,
        investment_spending: investment_fraction * gnp / 256,
        maturity,
        government_aid: 0,
        military_pressure: 0,
        finlandization_probability: [0, 0],
        flags: CountryFlags::default(),
        previous: StrengthSnapshot {
            government_strength,
            insurgency_strength,
            government_popularity,
        },
    })
}

fn opening_diplomacy() -> DiplomaticMatrix {
    let mut matrix = DiplomaticMatrix::default();
    let rows = [
        (Superpower::Usa, USA_DEFAULT_AFFINITY, &USA_AFFINITY[..]),
        (Superpower::Ussr, USSR_DEFAULT_AFFINITY, &USSR_AFFINITY[..]),
    ];
    for (superpower, default, overrides) in rows {
        let actor = superpower.country();
        for other in CountryId::all() {
            matrix.set(actor, other, default);
        }
        for &(raw, affinity) in overrides {
            if let Some(other) = CountryId::new(raw) {
                matrix.set(actor, other, affinity);
            }
        }
    }
    matrix
}

fn opening_policies() -> PolicyBook {
    let mut book = PolicyBook::default();
    for &(actor, kind, target, level) in POLICY_SEEDS.iter() {
        if let (Some(actor), Some(target)) = (CountryId::new(actor), CountryId::new(target)) {
            book.set_level(kind, actor, target, level);
        }
    }
    book.snapshot_previous();
    book
}

/// Builds the 1989 world with every derived quantity consistent.
pub fn initial_world(config: &SimulationConfig) -> WorldState {
    let countries: Vec<Country> = COUNTRY_SEEDS.iter().filter_map(build_country).collect();

    let mut world = WorldState {
        countries,
        diplomacy: opening_diplomacy(),
        policies: opening_policies(),
        globals: GlobalState {
            year: config.start_year,
            nastiness: STARTING_NASTINESS,
            superpowers: [SuperpowerState::default(); 2],
            scores: Scores::default(),
            crisis_prestige: Scores::default(),
            quit_flag: false,
            win_flag: false,
            winner: None,
            nuclear_war: false,
            tallies: EventTallies::default(),
        },
        history: Vec::new(),
        pending_news: Vec::new(),
    };
    world.refresh_scores();
    world
}
