//! MainMove bookkeeping and the per-country development step: forces,
//! upheavals, the economy and finlandization.

use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::simulation::{
    Country, CountryFlags, CountryId, EventCountry, FIXED_SUPERPOWER_POPULARITY, HistoryEntry,
    PolicyKind, SimRng, SimulationConfig, Superpower, TurnClock, TurnPhase, WorldEvent,
    WorldEventKind, WorldEventLog, WorldState, aid_conv, calculate_total_influence,
    coup_threatened, econ_conv, floor_div, harmonic_blend, intervention_conv,
};

pub const REVOLUTION_POPULARITY: i64 = 20;
pub const REVOLUTION_CHANCE: f64 = 0.05;
pub const COUP_CHANCE: f64 = 0.1;
pub const FINLANDIZATION_THRESHOLD: i64 = 100;
pub const FINLANDIZATION_CHANCE: f64 = 0.1;

/// Outside support flowing into one country this year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncomingSupport {
    pub economic: i64,
    pub government_aid: i64,
    pub insurgency_aid: i64,
    pub government_troops: i64,
    pub rebel_troops: i64,
}

impl IncomingSupport {
    pub fn gather(world: &WorldState, country: CountryId) -> Self {
        let mut support = Self::default();
        for superpower in Superpower::ALL {
            support.economic +=
                econ_conv(world.policies.value(PolicyKind::EconomicAid, superpower.country(), country));
        }
        for actor in CountryId::all().filter(|actor| *actor != country) {
            let value = |kind| world.policies.value(kind, actor, country);
            support.government_aid += aid_conv(value(PolicyKind::MilitaryAid));
            support.insurgency_aid += 2 * aid_conv(value(PolicyKind::InsurgencyAid));
            support.government_troops += intervention_conv(value(PolicyKind::GovernmentIntervention));
            support.rebel_troops += intervention_conv(value(PolicyKind::RebelIntervention));
        }
        support
    }
}

/// Rebuilds military and insurgency power from spending, manpower and aid.
pub fn develop_forces(country: &mut Country, support: &IncomingSupport) {
    country.government_aid = support.government_aid;
    let funds = floor_div(country.military_spending + country.government_aid, 2).max(1);
    let men = country.military_men.max(1);
    country.military_power = harmonic_blend(4, funds, men) + support.government_troops;
    country.prestige_value = harmonic_blend(16, funds, men);
    country.government_strength = country.military_power.max(1);

    country.insurgency_power = if country.is_superpower() {
        1
    } else {
        let exposed = floor_div((256 - country.maturity) * country.population, 256);
        let recruits = floor_div(exposed * country.strength_ratio, 80);
        let materiel = support.insurgency_aid.max(recruits / 8 + 1);
        harmonic_blend(4, materiel, recruits) + support.rebel_troops
    };
    country.insurgency_strength = country.insurgency_power;
    country.strength_ratio = floor_div(country.government_strength, country.insurgency_strength.max(1));
}

/// Rebalances spending, grows the economy and population, and moves
/// popularity with consumption per head.
pub fn develop_economy(country: &mut Country, economic_aid: i64) {
    let consumption_pressure = ((20 - country.government_popularity) * 10).max(1);
    let investment_pressure = ((80 - country.investment_fraction) * 2).max(1);
    let military_pressure = (country.strength_ratio
        + country.finlandization_probability.iter().sum::<i64>())
    .max(1);
    country.military_pressure = military_pressure;

    let mut pot = 0;
    for fraction in [
        &mut country.consumption_fraction,
        &mut country.investment_fraction,
        &mut country.military_fraction,
    ] {
        if *fraction > 16 {
            *fraction -= 8;
            pot += 8;
        }
    }
    let total_pressure = consumption_pressure + investment_pressure + military_pressure;
    country.investment_fraction += floor_div(investment_pressure * pot, total_pressure);
    country.military_fraction += floor_div(military_pressure * pot, total_pressure);
    country.consumption_fraction =
        (255 - country.investment_fraction - country.military_fraction).max(0);

    let pseudo_gnp = country.gnp + economic_aid;
    let growth = floor_div(pseudo_gnp * 2 * (country.investment_fraction - 30), 1000);
    country.gnp = (country.gnp + growth).max(1);

    let population = country.population.max(1);
    let old_per_head = floor_div(country.consumption_spending * 255, population);
    let birth_rate = (30 - old_per_head / 40).max(1);
    country.population = (population + floor_div(population * birth_rate, 1000)).max(1);
    country.military_men = floor_div(country.population * country.draft_fraction, 256);

    let pseudo_gnp = country.gnp + economic_aid;
    country.consumption_spending = floor_div(country.consumption_fraction * pseudo_gnp, 256);
    country.investment_spending = floor_div(country.investment_fraction * pseudo_gnp, 256);
    country.military_spending =
        ((pseudo_gnp - country.consumption_spending - country.investment_spending) * 10).max(1);

    if country.is_superpower() {
        country.government_popularity = FIXED_SUPERPOWER_POPULARITY;
    } else {
        let new_per_head = floor_div(country.consumption_fraction * pseudo_gnp, country.population);
        let change = floor_div((new_per_head - old_per_head) * 100, old_per_head + 1);
        let wing_drift = country.government_wing.abs() / 64;
        country.government_popularity =
            (country.government_popularity + change + wing_drift - 3).clamp(0, 255);
    }
}

/// Decides whether MainMove runs this year.
pub fn begin_main_move_system(world: Res<WorldState>, mut clock: ResMut<TurnClock>) {
    clock.phase = if world.globals.is_terminal() {
        TurnPhase::Terminal
    } else {
        TurnPhase::MainMove
    };
}

pub fn history_system(mut world: ResMut<WorldState>) {
    let entry = HistoryEntry {
        year: world.globals.year,
        scores: world.globals.scores,
        nastiness: world.globals.nastiness,
        countries: world.countries.clone(),
    };
    world.history.push(entry);
}

fn record(events: &mut WorldEventLog, year: i64, kind: WorldEventKind) {
    events.push(WorldEvent { year, kind });
}

pub fn development_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
    mut events: ResMut<WorldEventLog>,
) {
    let year = world.globals.year;
    let (mut coups, mut revolutions, mut finlandizations) = (0u32, 0u32, 0u32);

    for id in CountryId::all() {
        let support = IncomingSupport::gather(&world, id);
        {
            let country = world.country_mut(id);
            country.flags = CountryFlags::default();
            develop_forces(country, &support);
        }

        if !id.is_superpower() {
            let country = world.country_mut(id);
            if country.government_popularity < REVOLUTION_POPULARITY
                && country.insurgency_strength > country.government_strength
                && rng.chance(REVOLUTION_CHANCE)
            {
                country.apply_revolution();
                revolutions += 1;
                debug!(year, country = id.get(), "revolution");
                record(&mut events, year, WorldEventKind::Revolution {
                    country: EventCountry::of(country),
                });
            }
        }

        develop_economy(world.country_mut(id), support.economic);

        if id.is_superpower() {
            continue;
        }

        if coup_threatened(&world, id, config.level) && rng.chance(COUP_CHANCE) {
            let country = world.country_mut(id);
            country.apply_coup();
            coups += 1;
            debug!(year, country = id.get(), "coup");
            record(&mut events, year, WorldEventKind::Coup {
                country: EventCountry::of(country),
            });
        }

        let influences = Superpower::ALL.map(|superpower| calculate_total_influence(&world, superpower, id));
        let country = world.country_mut(id);
        for superpower in Superpower::ALL {
            let slot = superpower.slot();
            let probability = floor_div(influences[slot] * country.prestige_value, 1000).clamp(0, 127);
            country.finlandization_probability[slot] = probability;
            if probability >= FINLANDIZATION_THRESHOLD && rng.chance(FINLANDIZATION_CHANCE) {
                country.flags.finlandized[slot] = true;
                finlandizations += 1;
                record(&mut events, year, WorldEventKind::Finlandization {
                    country: EventCountry::of(country),
                    superpower,
                });
            }
        }

        for superpower in Superpower::ALL {
            for kind in PolicyKind::ALL.into_iter().filter(|kind| kind.lapses_yearly()) {
                world.policies.set_level(kind, superpower.country(), id, 0);
            }
        }
    }

    let tallies = &mut world.globals.tallies;
    tallies.coups += coups;
    tallies.revolutions += revolutions;
    tallies.finlandizations += finlandizations;
    info!(year, coups, revolutions, finlandizations, "countries developed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationConfig, apply_policy, initial_world};

    fn id(raw: u8) -> CountryId {
        CountryId::new(raw).unwrap()
    }

    #[test]
    fn military_aid_from_every_backer_is_pooled() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        apply_policy(&mut world, &config, 1, 60, PolicyKind::MilitaryAid, 3).unwrap();
        apply_policy(&mut world, &config, 2, 60, PolicyKind::MilitaryAid, 2).unwrap();

        let support = IncomingSupport::gather(&world, id(60));

        assert_eq!(support.government_aid, 20 + 5);
        assert_eq!(support.rebel_troops, 0);
    }

    #[test]
    fn government_intervention_adds_troops_to_military_power() {
        let config = SimulationConfig::default();
        let world = initial_world(&config);
        let mut country = world.country(id(45)).clone();
        let plain = {
            let mut copy = country.clone();
            develop_forces(&mut copy, &IncomingSupport::default());
            copy.military_power
        };

        develop_forces(&mut country, &IncomingSupport {
            government_troops: 100,
            ..IncomingSupport::default()
        });

        assert_eq!(country.military_power, plain + 100);
        assert_eq!(country.government_strength, country.military_power);
    }

    #[test]
    fn superpowers_keep_token_insurgency_and_fixed_popularity() {
        let world = initial_world(&SimulationConfig::default());
        let mut usa = world.country(CountryId::USA).clone();

        develop_forces(&mut usa, &IncomingSupport::default());
        develop_economy(&mut usa, 0);

        assert_eq!(usa.insurgency_power, 1);
        assert_eq!(usa.government_popularity, FIXED_SUPERPOWER_POPULARITY);
        assert!(usa.gnp >= 1);
    }

    #[test]
    fn spending_fractions_stay_within_the_budget() {
        let world = initial_world(&SimulationConfig::default());
        for country in world.countries.iter() {
            let mut copy = country.clone();
            develop_economy(&mut copy, 0);
            assert!(copy.consumption_fraction >= 0);
            assert!(copy.consumption_fraction + copy.investment_fraction + copy.military_fraction <= 255);
            assert!((0..=255).contains(&copy.government_popularity));
            assert!(copy.population >= 1);
        }
    }
}
