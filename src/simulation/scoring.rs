//! Read-only score, influence and finlandization formulas.
//!
//! Everything here takes `&WorldState`; nothing in this module can mutate
//! the world.

use serde::{Deserialize, Serialize};

use crate::simulation::{CountryId, PolicyKind, Superpower, WorldState, floor_div};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub usa: i64,
    pub ussr: i64,
}

impl Scores {
    pub fn get(&self, superpower: Superpower) -> i64 {
        match superpower {
            Superpower::Usa => self.usa,
            Superpower::Ussr => self.ussr,
        }
    }

    pub fn get_mut(&mut self, superpower: Superpower) -> &mut i64 {
        match superpower {
            Superpower::Usa => &mut self.usa,
            Superpower::Ussr => &mut self.ussr,
        }
    }
}

impl std::ops::Add for Scores {
    type Output = Scores;

    fn add(self, other: Scores) -> Scores {
        Scores {
            usa: self.usa + other.usa,
            ussr: self.ussr + other.ussr,
        }
    }
}

/// Prestige-weighted affinity of every minor country toward each superpower.
pub fn calculate_scores(world: &WorldState) -> Scores {
    let mut totals = [0i64; 2];
    for country in CountryId::minors() {
        let prestige = world.country(country).prestige_value;
        for superpower in Superpower::ALL {
            totals[superpower.slot()] +=
                world.diplomacy.get(country, superpower.country()) * prestige;
        }
    }
    Scores {
        usa: floor_div(totals[0], 1024),
        ussr: floor_div(totals[1], 1024),
    }
}

/// Net leverage a superpower holds over a country, floored at zero.
pub fn calculate_total_influence(world: &WorldState, superpower: Superpower, country: CountryId) -> i64 {
    let actor = superpower.country();
    let level = |kind| world.policies.value(kind, actor, country);
    let influence = level(PolicyKind::Treaty)
        + level(PolicyKind::EconomicAid)
        + level(PolicyKind::MilitaryAid)
        + 2 * level(PolicyKind::GovernmentIntervention)
        - 2 * level(PolicyKind::Destabilization)
        - 2 * level(PolicyKind::InsurgencyAid)
        - 4 * level(PolicyKind::RebelIntervention);
    influence.max(0)
}

/// Same quantity as [`calculate_total_influence`], under the score-side name.
pub fn calculate_influence(world: &WorldState, superpower: Superpower, country: CountryId) -> i64 {
    calculate_total_influence(world, superpower, country)
}

/// Likelihood (0..=256) that a country bends to a superpower under threat.
pub fn calculate_finlandization_probability(
    world: &WorldState,
    superpower: Superpower,
    country: CountryId,
) -> i64 {
    let rival = superpower.rival();
    let target = world.country(country);
    let own_power = world.country(superpower.country()).military_power;
    let rival_power = world.country(rival.country()).military_power;

    let intervention = world
        .policies
        .value(PolicyKind::GovernmentIntervention, superpower.country(), country);
    let projected_power = floor_div(intervention * own_power, own_power.max(1));

    let rival_treaty = world.policies.value(PolicyKind::Treaty, rival.country(), country);
    let treaty_power = floor_div(rival_treaty * rival_power, 128);
    let self_power = target.military_power - target.insurgency_power
        + floor_div(treaty_power * world.globals.superpower(rival).integrity, 128);

    let adventure = world.globals.superpower(superpower).adventure;
    let affinity = world.diplomacy.get(superpower.country(), country);
    let pressure = world
        .policies
        .value(PolicyKind::Pressure, superpower.country(), country);

    let probability = floor_div(
        (adventure - affinity) * projected_power * (pressure + 4),
        self_power.max(1),
    );
    probability.clamp(0, 2048) / 8
}

/// Whether a country's government is weak enough for a coup attempt.
pub fn coup_threatened(world: &WorldState, country: CountryId, level: u8) -> bool {
    let destabilization: i64 = Superpower::ALL
        .iter()
        .map(|sp| world.policies.value(PolicyKind::Destabilization, sp.country(), country))
        .sum();
    world.country(country).government_popularity <= destabilization && level > 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    Unrest,
    Finlandized(Superpower),
    Aligned(Superpower),
    Contested,
    Neutral,
}

/// Map classification of a country from influence and this year's events.
pub fn leaning(world: &WorldState, country: CountryId) -> Leaning {
    let target = world.country(country);
    if target.flags.coup || target.flags.revolution {
        return Leaning::Unrest;
    }

    let usa = calculate_influence(world, Superpower::Usa, country);
    let ussr = calculate_influence(world, Superpower::Ussr, country);
    let dominant = if usa > ussr { Superpower::Usa } else { Superpower::Ussr };

    if target.flags.finlandized.iter().any(|flag| *flag) {
        return Leaning::Finlandized(dominant);
    }
    if usa != ussr && usa.max(ussr) > 12 {
        Leaning::Aligned(dominant)
    } else if world.globals.nastiness > 7 && usa.max(ussr) > 8 {
        Leaning::Contested
    } else {
        Leaning::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationConfig, apply_policy, initial_world};

    fn id(raw: u8) -> CountryId {
        CountryId::new(raw).unwrap()
    }

    #[test]
    fn scores_ignore_superpower_rows() {
        let mut world = initial_world(&SimulationConfig::default());
        let before = calculate_scores(&world);
        world.country_mut(CountryId::USA).prestige_value = 1_000_000;
        assert_eq!(calculate_scores(&world), before);
    }

    #[test]
    fn scores_follow_affinity_times_prestige() {
        let mut world = initial_world(&SimulationConfig::default());
        for country in CountryId::minors() {
            world.diplomacy.set(country, CountryId::USA, 0);
            world.diplomacy.set(country, CountryId::USSR, 0);
        }
        world.country_mut(id(20)).prestige_value = 3000;
        world.diplomacy.set(id(20), CountryId::USA, 127);
        world.diplomacy.set(id(21), CountryId::USSR, -10);
        world.country_mut(id(21)).prestige_value = 100;

        let scores = calculate_scores(&world);

        assert_eq!(scores.usa, 127 * 3000 / 1024);
        // -1000 / 1024 rounds down, not toward zero.
        assert_eq!(scores.ussr, -1);
    }

    #[test]
    fn influence_is_never_negative_and_formulas_agree() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        apply_policy(&mut world, &config, 1, 33, PolicyKind::RebelIntervention, 3).unwrap();
        apply_policy(&mut world, &config, 1, 33, PolicyKind::EconomicAid, 2).unwrap();

        let total = calculate_total_influence(&world, Superpower::Usa, id(33));
        assert_eq!(total, 0);
        assert_eq!(total, calculate_influence(&world, Superpower::Usa, id(33)));

        apply_policy(&mut world, &config, 2, 33, PolicyKind::Treaty, 4).unwrap();
        apply_policy(&mut world, &config, 2, 33, PolicyKind::GovernmentIntervention, 2).unwrap();
        assert_eq!(calculate_total_influence(&world, Superpower::Ussr, id(33)), 8);
    }

    #[test]
    fn finlandization_needs_intervention() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        assert_eq!(calculate_finlandization_probability(&world, Superpower::Ussr, id(16)), 0);

        apply_policy(&mut world, &config, 2, 16, PolicyKind::GovernmentIntervention, 5).unwrap();
        apply_policy(&mut world, &config, 2, 16, PolicyKind::Pressure, 4).unwrap();
        let probability = calculate_finlandization_probability(&world, Superpower::Ussr, id(16));
        assert!((0..=256).contains(&probability));
    }

    #[test]
    fn coups_need_destabilization_and_a_harder_level() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        world.country_mut(id(79)).government_popularity = 3;
        apply_policy(&mut world, &config, 1, 79, PolicyKind::Destabilization, 2).unwrap();
        apply_policy(&mut world, &config, 2, 79, PolicyKind::Destabilization, 1).unwrap();

        assert!(!coup_threatened(&world, id(79), 1));
        assert!(coup_threatened(&world, id(79), 2));
    }
}
