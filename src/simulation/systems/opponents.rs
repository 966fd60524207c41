use bevy_ecs::prelude::*;
use tracing::{debug, info};

use crate::simulation::{
    OpponentSlot, SimRng, SimulationConfig, WorldState, apply_minor_policy, apply_policy,
    plan_minor_moves,
};

/// Lets the computer superpower issue its directives for the year.
pub fn opponent_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
    mut opponent: ResMut<OpponentSlot>,
) {
    if config.two_player {
        return;
    }
    let directives = opponent.0.plan(&world, &mut rng);
    let mut applied = 0;
    for directive in &directives {
        let result = apply_policy(
            &mut world,
            &config,
            directive.superpower.country().get().into(),
            directive.country.get().into(),
            directive.kind,
            directive.level.into(),
        );
        match result {
            Ok(_) => applied += 1,
            Err(err) => debug!(?directive, %err, "opponent directive rejected"),
        }
    }
    info!(planned = directives.len(), applied, "opponent moved");
}

pub fn minor_opponent_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<SimRng>,
) {
    if config.level != 4 {
        return;
    }
    for minor_move in plan_minor_moves(&world, &mut rng) {
        if let Err(err) = apply_minor_policy(
            &mut world,
            minor_move.actor.get().into(),
            minor_move.target.get().into(),
            minor_move.kind,
            minor_move.level.into(),
        ) {
            debug!(?minor_move, %err, "minor move rejected");
        }
    }
}
