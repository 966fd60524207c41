use bevy_ecs::prelude::*;
use tracing::{info, warn};

use crate::simulation::{
    NASTINESS_MAX, SimulationConfig, Superpower, TurnClock, TurnOutcome, TurnPhase, WorldEvent,
    WorldEventKind, WorldEventLog, WorldState,
};

/// Settles the year: nuclear war first, then the verdict once the last
/// year is reached.
pub fn victory_system(
    mut world: ResMut<WorldState>,
    config: Res<SimulationConfig>,
    mut clock: ResMut<TurnClock>,
    mut events: ResMut<WorldEventLog>,
) {
    let year = world.globals.year;

    if world.globals.nastiness >= NASTINESS_MAX && !world.globals.nuclear_war {
        warn!(year, "tension reached its limit");
        world.declare_nuclear_war();
        events.push(WorldEvent {
            year,
            kind: WorldEventKind::NuclearWar {
                cause: "tension between the superpowers boils over".to_string(),
            },
        });
    }

    if !world.globals.is_terminal() && year >= config.end_year {
        let scores = world.globals.scores;
        if scores.usa == scores.ussr {
            world.globals.quit_flag = true;
            events.push(WorldEvent {
                year,
                kind: WorldEventKind::Stalemate { score: scores.usa },
            });
        } else {
            let winner = if scores.usa > scores.ussr {
                Superpower::Usa
            } else {
                Superpower::Ussr
            };
            world.globals.win_flag = true;
            world.globals.winner = Some(winner);
            events.push(WorldEvent {
                year,
                kind: WorldEventKind::Victory {
                    winner,
                    usa_score: scores.usa,
                    ussr_score: scores.ussr,
                },
            });
        }
    }

    let outcome = world.globals.outcome();
    clock.phase = if outcome.is_terminal() {
        TurnPhase::Terminal
    } else {
        TurnPhase::Planning
    };
    if outcome != TurnOutcome::Continuing {
        info!(year, ?outcome, "game over");
    }
}
