use std::path::Path;
use std::sync::{Arc, RwLock};

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use tracing::{info, warn};

pub mod country;
pub mod crisis;
pub mod data;
pub mod diplomacy;
pub mod events;
pub mod formulas;
pub mod observer;
pub mod opponent;
pub mod persistence;
pub mod policy;
pub mod reports;
pub mod resources;
pub mod scoring;
pub mod systems;
pub mod world;

pub use country::*;
pub use crisis::*;
pub use diplomacy::*;
pub use events::*;
pub use formulas::*;
pub use observer::*;
pub use opponent::*;
pub use persistence::*;
pub use policy::*;
pub use reports::*;
pub use resources::*;
pub use scoring::*;
pub use systems::*;
pub use world::*;

/// One game of Balance of Power: the ECS world holding every resource, the
/// yearly schedule, and the snapshot shared with observers.
pub struct ColdWarSimulation {
    world: World,
    schedule: Schedule,
    observer: Arc<RwLock<ObserverSnapshot>>,
}

impl ColdWarSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_observer(config, Arc::new(RwLock::new(ObserverSnapshot::default())))
    }

    pub fn with_observer(
        config: SimulationConfig,
        observer: Arc<RwLock<ObserverSnapshot>>,
    ) -> Self {
        let state = initial_world(&config);
        let rng = SimRng::seeded(config.seed);
        Self::assemble(config, state, CrisisManager::default(), 0, rng, observer)
    }

    /// Resumes a saved game where it stopped: same year count, same random
    /// stream, same open crises.
    pub fn from_save(save: SaveGame) -> Self {
        Self::assemble(
            save.config,
            save.world,
            save.crises,
            save.clock.turns_played,
            save.rng,
            Arc::new(RwLock::new(ObserverSnapshot::default())),
        )
    }

    fn assemble(
        config: SimulationConfig,
        state: WorldState,
        crises: CrisisManager,
        turns_played: u32,
        rng: SimRng,
        observer: Arc<RwLock<ObserverSnapshot>>,
    ) -> Self {
        let outcome = state.globals.outcome();
        let clock = TurnClock {
            phase: if outcome.is_terminal() {
                TurnPhase::Terminal
            } else {
                TurnPhase::Planning
            },
            outcome,
            turns_played,
        };

        let mut world = World::default();
        world.insert_resource(rng);
        world.insert_resource(OpponentSlot::for_config(&config));
        world.insert_resource(config);
        world.insert_resource(state);
        world.insert_resource(crises);
        world.insert_resource(clock);
        world.insert_resource(WorldEventLog::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                pre_plan_system,
                react_news_system,
                begin_main_move_system,
                (
                    history_system,
                    development_system,
                    opponent_system,
                    minor_opponent_system,
                    tension_system,
                    superpower_attitude_system,
                    score_system,
                    victory_system,
                )
                    .chain()
                    .distributive_run_if(main_move_active),
                turn_report_system,
            )
                .chain(),
        );

        let mut simulation = Self {
            world,
            schedule,
            observer,
        };
        simulation.refresh_observer_snapshot();
        simulation
    }

    /// Runs PrePlan, ReactNews and MainMove for one year.
    ///
    /// A game that is already over is left untouched and its stored outcome
    /// is returned again.
    pub fn process_turn(&mut self) -> TurnOutcome {
        let stored = self.state().globals.outcome();
        if stored.is_terminal() {
            warn!(?stored, "turn requested after the game ended");
            return stored;
        }

        self.schedule.run(&mut self.world);

        let outcome = self.state().globals.outcome();
        self.world.resource_mut::<TurnClock>().outcome = outcome;
        self.refresh_observer_snapshot();
        outcome
    }

    pub fn apply_policy(
        &mut self,
        superpower: i64,
        country: i64,
        kind: PolicyKind,
        level: i64,
    ) -> Result<PolicyChange, PolicyError> {
        self.world
            .resource_scope(|world, mut state: Mut<WorldState>| {
                let config = world.resource::<SimulationConfig>();
                apply_policy(&mut state, config, superpower, country, kind, level)
            })
    }

    pub fn apply_minor_policy(
        &mut self,
        actor: i64,
        target: i64,
        kind: PolicyKind,
        level: i64,
    ) -> Result<PolicyChange, PolicyError> {
        apply_minor_policy(&mut self.world.resource_mut::<WorldState>(), actor, target, kind, level)
    }

    /// Asks the crisis manager whether a policy change provokes a crisis.
    pub fn check_for_crises(
        &mut self,
        subject: CountryId,
        kind: PolicyKind,
        object: CountryId,
        old_value: u8,
        new_value: u8,
    ) -> Option<Crisis> {
        let crisis = self
            .world
            .resource_scope(|world, mut crises: Mut<CrisisManager>| {
                world.resource_scope(|world, mut rng: Mut<SimRng>| {
                    crises.check_for_crises(
                        world.resource::<WorldState>(),
                        world.resource::<SimulationConfig>(),
                        &mut rng,
                        subject,
                        kind,
                        object,
                        old_value,
                        new_value,
                    )
                })
            })?;

        let mut state = self.world.resource_mut::<WorldState>();
        state.globals.tallies.crises += 1;
        let event = WorldEvent {
            year: state.globals.year,
            kind: WorldEventKind::CrisisErupted {
                crisis_id: crisis.id,
                subject: EventCountry::of(state.country(subject)),
                object: EventCountry::of(state.country(object)),
                policy: kind,
            },
        };
        self.world.resource_mut::<WorldEventLog>().push(event);
        self.refresh_observer_snapshot();
        Some(crisis)
    }

    pub fn check_change(&mut self, change: &PolicyChange) -> Option<Crisis> {
        self.check_for_crises(
            change.subject,
            change.kind,
            change.object,
            change.old_level,
            change.new_level,
        )
    }

    pub fn handle_crisis_response(
        &mut self,
        id: u64,
        response: CrisisResponse,
    ) -> Result<CrisisResult, CrisisError> {
        let result = self
            .world
            .resource_scope(|world, mut crises: Mut<CrisisManager>| {
                world.resource_scope(|world, mut state: Mut<WorldState>| {
                    let config = world.resource::<SimulationConfig>();
                    crises.handle_crisis_response(&mut state, config, id, response)
                })
            })?;

        let year = self.state().globals.year;
        let kind = if result.nuclear_war {
            Some(WorldEventKind::NuclearWar {
                cause: format!("crisis #{} escalates past the brink", id),
            })
        } else if result.crisis_resolved {
            Some(WorldEventKind::CrisisResolved {
                crisis_id: id,
                response,
            })
        } else {
            None
        };
        if let Some(kind) = kind {
            self.world
                .resource_mut::<WorldEventLog>()
                .push(WorldEvent { year, kind });
        }
        if result.nuclear_war {
            let mut clock = self.world.resource_mut::<TurnClock>();
            clock.phase = TurnPhase::Terminal;
            clock.outcome = TurnOutcome::NuclearWar;
        }
        info!(crisis = id, ?response, level = result.crisis_level, "crisis response");
        self.refresh_observer_snapshot();
        Ok(result)
    }

    pub fn state(&self) -> &WorldState {
        self.world.resource::<WorldState>()
    }

    pub fn config(&self) -> &SimulationConfig {
        self.world.resource::<SimulationConfig>()
    }

    pub fn crises(&self) -> &CrisisManager {
        self.world.resource::<CrisisManager>()
    }

    pub fn clock(&self) -> &TurnClock {
        self.world.resource::<TurnClock>()
    }

    pub fn events(&self) -> Vec<WorldEvent> {
        self.world.resource::<WorldEventLog>().snapshot()
    }

    pub fn observer(&self) -> Arc<RwLock<ObserverSnapshot>> {
        Arc::clone(&self.observer)
    }

    pub fn game_status(&self) -> GameStatus {
        game_status(self.state(), self.crises())
    }

    pub fn country_report(&self, country: CountryId) -> CountryReport {
        country_report(self.state(), country)
    }

    pub fn game_statistics(&self) -> GameStatistics {
        game_statistics(self.state(), self.clock())
    }

    pub fn get_policy_value(&self, superpower: Superpower, country: CountryId, kind: PolicyKind) -> u8 {
        get_policy_value(self.state(), superpower, country, kind)
    }

    pub fn get_country_policies(&self, country: CountryId) -> CountryPolicies {
        get_country_policies(self.state(), country)
    }

    pub fn calculate_total_influence(&self, superpower: Superpower, country: CountryId) -> i64 {
        calculate_total_influence(self.state(), superpower, country)
    }

    pub fn get_diplomatic_affinity(&self, a: CountryId, b: CountryId) -> i64 {
        self.state().diplomacy.get(a, b)
    }

    pub fn policy_recommendations(&self, superpower: Superpower, country: CountryId) -> Vec<PolicyDirective> {
        policy_recommendations(self.state(), superpower, country)
    }

    pub fn set_level(&mut self, level: u8) {
        self.world.resource_mut::<SimulationConfig>().level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    }

    /// Hands the controls to a different superpower; the computer takes
    /// the other side.
    pub fn set_human_player(&mut self, superpower: Superpower) {
        self.world.resource_mut::<SimulationConfig>().human_player = superpower;
        self.set_opponent(RandomOpponent::against(superpower));
    }

    pub fn set_two_player(&mut self, two_player: bool) {
        self.world.resource_mut::<SimulationConfig>().two_player = two_player;
    }

    pub fn set_opponent(&mut self, opponent: impl Opponent + 'static) {
        self.world.insert_resource(OpponentSlot(Box::new(opponent)));
    }

    pub fn snapshot(&self) -> SaveGame {
        SaveGame::new(
            self.config().clone(),
            self.state().clone(),
            self.crises().clone(),
            self.clock().clone(),
            self.world.resource::<SimRng>().clone(),
        )
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        self.snapshot().save_to_path(path)
    }

    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        Ok(Self::from_save(SaveGame::load_from_path(path)?))
    }

    fn refresh_observer_snapshot(&mut self) {
        let state = self.world.resource::<WorldState>();
        let clock = self.world.resource::<TurnClock>();
        let events = self.world.resource::<WorldEventLog>().snapshot();
        let active_crises = self
            .world
            .resource::<CrisisManager>()
            .active_crises()
            .cloned()
            .collect();

        if let Ok(mut snapshot) = self.observer.write() {
            snapshot.update(state, clock.turns_played, clock.phase, events, active_crises);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_turn_advances_the_year() {
        let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
        let outcome = simulation.process_turn();

        assert_eq!(outcome, TurnOutcome::Continuing);
        assert_eq!(simulation.state().globals.year, 1990);
        assert_eq!(simulation.state().history.len(), 1);
        assert_eq!(simulation.clock().turns_played, 1);
        assert_eq!(simulation.clock().phase, TurnPhase::Planning);
        let observed = simulation.observer();
        assert_eq!(observed.read().unwrap().year, 1990);
    }

    #[test]
    fn finished_game_is_not_replayed() {
        let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
        simulation.world.resource_mut::<WorldState>().declare_nuclear_war();
        let before = simulation.state().clone();

        assert_eq!(simulation.process_turn(), TurnOutcome::NuclearWar);
        assert_eq!(simulation.state(), &before);
        assert_eq!(simulation.clock().turns_played, 0);
    }

    #[test]
    fn resumed_game_plays_the_same_next_year() {
        let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
        simulation.process_turn();
        simulation.process_turn();

        let raw = simulation.snapshot().to_json().unwrap();
        let mut resumed = ColdWarSimulation::from_save(SaveGame::from_json(&raw).unwrap());
        assert_eq!(resumed.state(), simulation.state());
        assert_eq!(resumed.clock(), simulation.clock());

        simulation.process_turn();
        resumed.process_turn();

        assert_eq!(resumed.state(), simulation.state());
        assert_eq!(resumed.clock().turns_played, 3);
        assert_eq!(resumed.state().globals.year, 1992);
    }

    #[test]
    fn setters_clamp_and_swap_sides() {
        let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
        simulation.set_level(9);
        assert_eq!(simulation.config().level, MAX_LEVEL);
        simulation.set_level(0);
        assert_eq!(simulation.config().level, MIN_LEVEL);

        simulation.set_human_player(Superpower::Ussr);
        simulation.set_two_player(true);
        assert_eq!(simulation.config().human_player, Superpower::Ussr);
        assert!(simulation.config().two_player);
    }

    #[test]
    fn two_player_games_have_no_computer_moves() {
        let mut config = SimulationConfig::default();
        config.two_player = true;
        let mut simulation = ColdWarSimulation::new(config);
        let before = simulation.state().policies.clone();

        simulation.process_turn();

        // Only the yearly lapse of pressure and destabilization may differ.
        for country in CountryId::minors() {
            for kind in [PolicyKind::EconomicAid, PolicyKind::Treaty, PolicyKind::RebelIntervention] {
                assert_eq!(
                    simulation.state().policies.level(kind, CountryId::USSR, country),
                    before.level(kind, CountryId::USSR, country)
                );
            }
        }
    }
}
