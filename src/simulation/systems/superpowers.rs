use bevy_ecs::prelude::*;
use tracing::debug;

use crate::simulation::{Superpower, WorldState};

pub const TENSION_DECAY: i64 = 4;
pub const PUGNACITY_DECAY: i64 = 4;
pub const INTEGRITY_RECOVERY: i64 = 5;
pub const INTEGRITY_MAX: i64 = 127;

/// Global tension cools a little every year.
pub fn tension_system(mut world: ResMut<WorldState>) {
    world.globals.nastiness = (world.globals.nastiness - TENSION_DECAY).max(0);
}

/// Pugnacity fades, adventurism tracks tension, and integrity recovers.
pub fn superpower_attitude_system(mut world: ResMut<WorldState>) {
    for superpower in Superpower::ALL {
        let state = world.globals.superpower_mut(superpower);
        state.pugnacity = (state.pugnacity - PUGNACITY_DECAY).max(0);
    }
    let nastiness = world.globals.nastiness;
    for superpower in Superpower::ALL {
        let own = world.globals.superpower(superpower).pugnacity;
        let rival = world.globals.superpower(superpower.rival()).pugnacity;
        let military_fraction = world.country(superpower.country()).military_fraction;
        let state = world.globals.superpower_mut(superpower);
        state.adventure = (own + nastiness - rival - military_fraction + 32).max(1);
        state.integrity = (state.integrity + INTEGRITY_RECOVERY).min(INTEGRITY_MAX);
        debug!(superpower = superpower.name(), ?state, "attitude updated");
    }
}

pub fn score_system(mut world: ResMut<WorldState>) {
    world.refresh_scores();
}
