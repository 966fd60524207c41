//! Schedule systems for one simulated year, in phase order.

use bevy_ecs::prelude::Res;

use crate::simulation::{TurnClock, TurnPhase};

pub mod development;
pub mod logging;
pub mod opponents;
pub mod preplan;
pub mod reactions;
pub mod superpowers;
pub mod victory;

pub use development::*;
pub use logging::*;
pub use opponents::*;
pub use preplan::*;
pub use reactions::*;
pub use superpowers::*;
pub use victory::*;

/// Run condition for every MainMove system.
pub fn main_move_active(clock: Res<TurnClock>) -> bool {
    clock.phase == TurnPhase::MainMove
}
