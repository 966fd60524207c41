//! Read-only status and report queries.

use serde::Serialize;

use crate::simulation::{
    Country, CountryId, CountryPolicies, CrisisManager, Leaning, LeaningTally, Superpower,
    TurnClock, TurnOutcome, WorldState, calculate_finlandization_probability,
    calculate_total_influence, get_country_policies, leaning,
};

/// Tension from which the status line warns of nuclear war.
pub const NUCLEAR_RISK_NASTINESS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub is_game_over: bool,
    pub outcome: TurnOutcome,
    pub winner: Option<Superpower>,
    pub nuclear_war_risk: bool,
    pub crisis_count: usize,
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryReport {
    pub country: Country,
    /// Affinity toward the USA and the USSR, in that order.
    pub affinity: [i64; 2],
    pub policies: CountryPolicies,
    pub influence: [i64; 2],
    pub finlandization_probability: [i64; 2],
    pub leaning: Leaning,
}

impl CountryReport {
    pub fn affinity(&self, superpower: Superpower) -> i64 {
        self.affinity[superpower.slot()]
    }

    pub fn influence(&self, superpower: Superpower) -> i64 {
        self.influence[superpower.slot()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatistics {
    pub turns_played: u32,
    pub years_recorded: usize,
    pub leanings: LeaningTally,
    pub coups: u32,
    pub revolutions: u32,
    pub finlandizations: u32,
    pub crises: u32,
    pub peak_nastiness: i64,
}

pub fn game_status(world: &WorldState, crises: &CrisisManager) -> GameStatus {
    let outcome = world.globals.outcome();
    GameStatus {
        is_game_over: outcome.is_terminal(),
        outcome,
        winner: world.globals.winner,
        nuclear_war_risk: world.globals.nastiness >= NUCLEAR_RISK_NASTINESS,
        crisis_count: crises.active_crises().count(),
        year: world.globals.year,
    }
}

pub fn country_report(world: &WorldState, country: CountryId) -> CountryReport {
    let per_superpower = |f: fn(&WorldState, Superpower, CountryId) -> i64| {
        Superpower::ALL.map(|superpower| f(world, superpower, country))
    };
    CountryReport {
        country: world.country(country).clone(),
        affinity: Superpower::ALL.map(|superpower| world.diplomacy.get(country, superpower.country())),
        policies: get_country_policies(world, country),
        influence: per_superpower(calculate_total_influence),
        finlandization_probability: per_superpower(calculate_finlandization_probability),
        leaning: leaning(world, country),
    }
}

pub fn game_statistics(world: &WorldState, clock: &TurnClock) -> GameStatistics {
    let tallies = world.globals.tallies;
    let peak_nastiness = world
        .history
        .iter()
        .map(|entry| entry.nastiness)
        .chain(std::iter::once(world.globals.nastiness))
        .max()
        .unwrap_or_default();
    GameStatistics {
        turns_played: clock.turns_played,
        years_recorded: world.history.len(),
        leanings: LeaningTally::of(world),
        coups: tallies.coups,
        revolutions: tallies.revolutions,
        finlandizations: tallies.finlandizations,
        crises: tallies.crises,
        peak_nastiness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{PolicyKind, SimulationConfig, apply_policy, initial_world};

    #[test]
    fn fresh_game_is_running_and_calm() {
        let world = initial_world(&SimulationConfig::default());
        let status = game_status(&world, &CrisisManager::default());
        assert!(!status.is_game_over);
        assert_eq!(status.outcome, TurnOutcome::Continuing);
        assert!(!status.nuclear_war_risk);
        assert_eq!(status.year, 1989);
    }

    #[test]
    fn country_report_bundles_both_sides() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let cuba = CountryId::new(7).unwrap();
        apply_policy(&mut world, &config, 2, 7, PolicyKind::Treaty, 3).unwrap();

        let report = country_report(&world, cuba);

        assert_eq!(report.country.name, "Cuba");
        assert_eq!(report.affinity(Superpower::Ussr), world.diplomacy.get(cuba, CountryId::USSR));
        assert_eq!(
            report.influence(Superpower::Ussr),
            calculate_total_influence(&world, Superpower::Ussr, cuba)
        );
        assert_eq!(report.policies.level(Superpower::Ussr, PolicyKind::Treaty), 3);
    }

    #[test]
    fn statistics_track_peak_tension() {
        let mut world = initial_world(&SimulationConfig::default());
        world.globals.nastiness = 30;
        world.globals.tallies.coups = 2;
        let stats = game_statistics(&world, &TurnClock::default());
        assert_eq!(stats.peak_nastiness, 30);
        assert_eq!(stats.coups, 2);
        assert_eq!(stats.leanings.usa + stats.leanings.ussr + stats.leanings.contested
            + stats.leanings.neutral + stats.leanings.unrest + stats.leanings.finlandized, 78);
    }
}
