//! Computer-controlled players: the superpower opponent and the level-4
//! minor-country meddlers.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{
    COUNTRY_COUNT, CountryId, PolicyDirective, PolicyKind, SimRng, SimulationConfig, Superpower,
    WorldState,
};

pub const OPPONENT_MOVE_CHANCE: f64 = 0.1;
pub const OPPONENT_MAX_LEVEL: i64 = 5;
pub const MINOR_MOVE_CHANCE: f64 = 0.05;
pub const MINOR_STRENGTH_RATIO: i64 = 64;

/// Anything that issues superpower directives during MainMove.
pub trait Opponent: Send + Sync {
    fn plan(&mut self, world: &WorldState, rng: &mut SimRng) -> Vec<PolicyDirective>;
}

/// Picks a random instrument for roughly one minor country in ten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomOpponent {
    sides: Vec<Superpower>,
}

impl RandomOpponent {
    pub fn new(sides: Vec<Superpower>) -> Self {
        Self { sides }
    }

    /// Plays the side the human does not.
    pub fn against(human: Superpower) -> Self {
        Self::new(vec![human.rival()])
    }

    /// Plays both superpowers; used when nobody is at the controls.
    pub fn both_sides() -> Self {
        Self::new(Superpower::ALL.to_vec())
    }

    pub fn sides(&self) -> &[Superpower] {
        &self.sides
    }
}

impl Opponent for RandomOpponent {
    fn plan(&mut self, _world: &WorldState, rng: &mut SimRng) -> Vec<PolicyDirective> {
        let mut directives = Vec::new();
        for &superpower in &self.sides {
            for country in CountryId::minors() {
                if !rng.chance(OPPONENT_MOVE_CHANCE) {
                    continue;
                }
                let Some(kind) = rng.pick(&PolicyKind::ALL) else {
                    continue;
                };
                directives.push(PolicyDirective {
                    superpower,
                    country,
                    kind,
                    level: rng.range(0, OPPONENT_MAX_LEVEL) as u8,
                });
            }
        }
        directives
    }
}

#[derive(Resource)]
pub struct OpponentSlot(pub Box<dyn Opponent>);

impl OpponentSlot {
    pub fn for_config(config: &SimulationConfig) -> Self {
        Self(Box::new(RandomOpponent::against(config.human_player)))
    }
}

/// A proxy move by one minor country against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorMove {
    pub actor: CountryId,
    pub target: CountryId,
    pub kind: PolicyKind,
    pub level: u8,
}

/// Strong minor governments occasionally meddle in a random neighbour.
pub fn plan_minor_moves(world: &WorldState, rng: &mut SimRng) -> Vec<MinorMove> {
    let mut moves = Vec::new();
    for actor in CountryId::minors() {
        if world.country(actor).strength_ratio <= MINOR_STRENGTH_RATIO
            || !rng.chance(MINOR_MOVE_CHANCE)
        {
            continue;
        }
        let Some(target) = CountryId::from_raw(rng.range(3, i64::from(COUNTRY_COUNT))) else {
            continue;
        };
        if target == actor {
            continue;
        }
        let Some(kind) = rng.pick(&PolicyKind::MINOR) else {
            continue;
        };
        moves.push(MinorMove {
            actor,
            target,
            kind,
            level: rng.range(1, 3) as u8,
        });
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::initial_world;

    #[test]
    fn opponent_only_moves_its_own_side() {
        let world = initial_world(&SimulationConfig::default());
        let mut opponent = RandomOpponent::against(Superpower::Usa);
        let mut rng = SimRng::seeded(3);

        let directives = opponent.plan(&world, &mut rng);

        assert!(!directives.is_empty());
        for directive in &directives {
            assert_eq!(directive.superpower, Superpower::Ussr);
            assert!(!directive.country.is_superpower());
            assert!(i64::from(directive.level) <= OPPONENT_MAX_LEVEL);
        }
    }

    #[test]
    fn autopilot_moves_both_sides() {
        let world = initial_world(&SimulationConfig::default());
        let mut opponent = RandomOpponent::both_sides();
        let mut rng = SimRng::seeded(11);
        let mut seen = Vec::new();
        for _ in 0..4 {
            for directive in opponent.plan(&world, &mut rng) {
                if !seen.contains(&directive.superpower) {
                    seen.push(directive.superpower);
                }
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn weak_minors_never_meddle() {
        let mut world = initial_world(&SimulationConfig::default());
        for country in world.countries.iter_mut() {
            country.strength_ratio = MINOR_STRENGTH_RATIO;
        }
        let mut rng = SimRng::seeded(5);
        assert!(plan_minor_moves(&world, &mut rng).is_empty());
    }

    #[test]
    fn minor_moves_use_proxy_instruments_only() {
        let mut world = initial_world(&SimulationConfig::default());
        for country in world.countries.iter_mut() {
            country.strength_ratio = 80;
        }
        let mut rng = SimRng::seeded(5);
        let moves: Vec<MinorMove> = (0..10).flat_map(|_| plan_minor_moves(&world, &mut rng)).collect();

        assert!(!moves.is_empty());
        for minor_move in moves {
            assert!(PolicyKind::MINOR.contains(&minor_move.kind));
            assert_ne!(minor_move.actor, minor_move.target);
            assert!(!minor_move.target.is_superpower());
            assert!((1..=3).contains(&minor_move.level));
        }
    }
}
