use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

use crate::simulation::{
    CountryId, EventCountry, PolicyChange, PolicyKind, SimulationConfig, Superpower, TurnClock,
    TurnPhase, WorldEvent, WorldEventKind, WorldEventLog, WorldState, econ_conv, floor_div,
};

/// Yearly shift in a minor country's affinity toward one superpower.
pub fn superpower_reaction(world: &WorldState, country: CountryId, superpower: Superpower) -> i64 {
    let actor = superpower.country();
    let target = world.country(country);
    let value = |kind| world.policies.value(kind, actor, country);
    let pressure = target.military_pressure.max(1);
    let integrity = world.globals.superpower(superpower).integrity;

    let aid_per_gnp = floor_div(256 * econ_conv(value(PolicyKind::EconomicAid)), target.gnp.max(1));
    let x = floor_div(25 * aid_per_gnp, target.government_popularity + 1)
        - 32 * value(PolicyKind::Destabilization)
        + floor_div(value(PolicyKind::MilitaryAid) * pressure, 8)
        - 12 * value(PolicyKind::InsurgencyAid)
        + floor_div(value(PolicyKind::GovernmentIntervention) * pressure, 4)
        - 64 * value(PolicyKind::RebelIntervention)
        - 16 * value(PolicyKind::Pressure)
        + floor_div(floor_div(value(PolicyKind::Treaty) * integrity, 128) * pressure, 8)
        + 8 * (value(PolicyKind::Trade) - 3);
    floor_div(x, 8)
}

/// Yearly shift in a minor country's affinity toward a meddling neighbour.
pub fn minor_reaction(world: &WorldState, country: CountryId, neighbour: CountryId) -> i64 {
    let value = |kind| world.policies.value(kind, neighbour, country);
    let pressure = world.country(country).military_pressure.max(1);
    let x = floor_div(value(PolicyKind::MilitaryAid) * pressure, 8)
        - 12 * value(PolicyKind::InsurgencyAid)
        + floor_div(value(PolicyKind::GovernmentIntervention) * pressure, 4)
        - 64 * value(PolicyKind::RebelIntervention);
    floor_div(x, 8)
}

/// Tension added by a superpower's provocative move, if any.
fn provocation(change: &PolicyChange) -> Option<i64> {
    let by_superpower = change.subject.is_superpower();
    (by_superpower && change.kind.is_provocative()).then(|| change.delta())
}

/// Digests the year's news and lets every minor country react.
pub fn react_news_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut clock: ResMut<TurnClock>,
    mut events: ResMut<WorldEventLog>,
) {
    let news: Vec<PolicyChange> = world.pending_news.drain(..).collect();
    if world.globals.is_terminal() {
        return;
    }
    clock.phase = TurnPhase::ReactNews;
    let year = world.globals.year;

    for change in &news {
        events.push(WorldEvent {
            year,
            kind: WorldEventKind::PolicyShift {
                subject: EventCountry::of(world.country(change.subject)),
                object: EventCountry::of(world.country(change.object)),
                policy: change.kind,
                old_level: change.old_level,
                new_level: change.new_level,
                news_worth: change.news_worth(),
            },
        });
        let Some(delta) = provocation(change) else {
            continue;
        };
        if world.raise_nastiness(delta) {
            warn!(year, kind = ?change.kind, "provocation pushed tension over the edge");
            events.push(WorldEvent {
                year,
                kind: WorldEventKind::NuclearWar {
                    cause: format!(
                        "{} provokes one crisis too many",
                        world.country(change.subject).name
                    ),
                },
            });
            clock.phase = TurnPhase::Terminal;
            return;
        }
    }

    if year <= config.start_year {
        debug!(year, "no diplomatic feedback in the opening year");
        return;
    }

    for country in CountryId::minors() {
        for superpower in Superpower::ALL {
            let delta = superpower_reaction(&world, country, superpower);
            world.diplomacy.adjust(country, superpower.country(), delta);
        }
        if config.level == 4 {
            for neighbour in CountryId::minors().filter(|other| *other != country) {
                let delta = minor_reaction(&world, country, neighbour);
                world.diplomacy.adjust(country, neighbour, delta);
            }
        }
    }
    world.refresh_scores();
    info!(
        year,
        news = news.len(),
        usa = world.globals.scores.usa,
        ussr = world.globals.scores.ussr,
        "reactions digested"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationConfig, apply_policy, initial_world};

    fn id(raw: u8) -> CountryId {
        CountryId::new(raw).unwrap()
    }

    #[test]
    fn trade_baseline_alone_warms_slightly() {
        let world = initial_world(&SimulationConfig::default());
        // Only trade at 4: 8 * (4 - 3) / 8.
        assert_eq!(superpower_reaction(&world, id(70), Superpower::Ussr), 1);
    }

    #[test]
    fn rebel_intervention_sours_the_host() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        apply_policy(&mut world, &config, 2, 70, PolicyKind::RebelIntervention, 2).unwrap();
        // (8 - 128) / 8.
        assert_eq!(superpower_reaction(&world, id(70), Superpower::Ussr), -15);
    }

    #[test]
    fn only_superpower_provocations_raise_tension() {
        let aid = PolicyChange {
            subject: CountryId::USA,
            object: id(9),
            kind: PolicyKind::EconomicAid,
            old_level: 0,
            new_level: 4,
        };
        let pressure = PolicyChange {
            kind: PolicyKind::Pressure,
            ..aid
        };
        let proxy = PolicyChange {
            subject: id(10),
            kind: PolicyKind::InsurgencyAid,
            ..aid
        };
        assert_eq!(provocation(&aid), None);
        assert_eq!(provocation(&pressure), Some(4));
        assert_eq!(provocation(&proxy), None);
    }
}
