use bevy_ecs::prelude::*;
use tracing::{debug, info, warn};

use crate::simulation::{
    CountryId, EventCountry, PolicyKind, SimulationConfig, Superpower, TurnClock, TurnPhase,
    WorldEvent, WorldEventKind, WorldEventLog, WorldState, floor_div, isqrt,
};

/// First country, in id order, where one superpower props up the government
/// while the other backs the rebels.
pub fn superpower_proxy_clash(world: &WorldState) -> Option<CountryId> {
    let level = |kind, superpower: Superpower, country| {
        world.policies.level(kind, superpower.country(), country)
    };
    CountryId::all().find(|&country| {
        Superpower::ALL.into_iter().any(|backer| {
            level(PolicyKind::GovernmentIntervention, backer, country) > 0
                && level(PolicyKind::RebelIntervention, backer.rival(), country) > 0
        })
    })
}

/// Penalizes minor countries found on opposite sides of the same civil war.
fn minor_proxy_penalties(world: &mut WorldState) -> usize {
    let penalty = floor_div(world.globals.nastiness, 8);
    let mut clashes = Vec::new();
    for actor in CountryId::minors() {
        for host in CountryId::minors().filter(|host| *host != actor) {
            let backs_government = world
                .policies
                .level(PolicyKind::GovernmentIntervention, actor, host)
                > 0;
            let backs_rebels = world
                .policies
                .level(PolicyKind::RebelIntervention, actor, host)
                > 0;
            if !backs_government && !backs_rebels {
                continue;
            }
            for other in CountryId::all().filter(|other| *other != actor) {
                let other_rebels = world
                    .policies
                    .level(PolicyKind::RebelIntervention, other, host)
                    > 0;
                let other_government = world
                    .policies
                    .level(PolicyKind::GovernmentIntervention, other, host)
                    > 0;
                if (backs_government && other_rebels) || (backs_rebels && other_government) {
                    clashes.push((actor, other));
                }
            }
        }
    }
    for &(actor, other) in &clashes {
        world.diplomacy.adjust(actor, other, -penalty);
    }
    clashes.len()
}

/// Opens the year: snapshots, strength clamps and the escalation checks.
pub fn pre_plan_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut clock: ResMut<TurnClock>,
    mut events: ResMut<WorldEventLog>,
) {
    clock.phase = TurnPhase::PrePlan;
    clock.turns_played += 1;
    world.globals.year += 1;
    let year = world.globals.year;

    world.policies.snapshot_previous();
    for country in world.countries.iter_mut() {
        country.snapshot_strength();
        if country.government_strength <= 0 {
            country.government_strength = 1;
        }
        if country.insurgency_strength > country.government_strength {
            country.insurgency_strength = country.government_strength;
        }
        let exposure = floor_div(6400 * country.insurgency_strength, country.government_strength);
        country.strength_ratio = isqrt(exposure.clamp(1, 6400));
    }

    if let Some(host) = superpower_proxy_clash(&world) {
        world.declare_nuclear_war();
        let name = world.country(host).name.clone();
        warn!(year, country = host.get(), "superpowers fighting in {}", name);
        events.push(WorldEvent {
            year,
            kind: WorldEventKind::NuclearWar {
                cause: format!("American and Soviet forces clash in {}", name),
            },
        });
        clock.phase = TurnPhase::Terminal;
        return;
    }

    if config.level == 4 {
        let clashes = minor_proxy_penalties(&mut world);
        if clashes > 0 {
            debug!(year, clashes, "minor countries on opposite sides of civil wars");
        }
    }
    info!(year, nastiness = world.globals.nastiness, "pre-plan complete");
}
