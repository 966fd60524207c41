//! Whole-game scenarios driven through the public simulation API.

use balance_of_power::simulation::{
    ColdWarSimulation, CountryId, CrisisResponse, NASTINESS_MAX, PolicyError, PolicyKind,
    RandomOpponent, SaveGame, SimulationConfig, Superpower, TurnOutcome, TurnPhase,
};

fn id(raw: u8) -> CountryId {
    CountryId::new(raw).unwrap()
}

fn two_player() -> SimulationConfig {
    SimulationConfig {
        two_player: true,
        ..SimulationConfig::default()
    }
}

#[test]
fn economic_aid_to_cuba_warms_relations_and_provokes_a_crisis() {
    let mut simulation = ColdWarSimulation::new(two_player());
    let cuba = id(7);
    let before = simulation.get_diplomatic_affinity(cuba, CountryId::USA);

    let change = simulation
        .apply_policy(1, 7, PolicyKind::EconomicAid, 5)
        .unwrap();

    assert_eq!(change.new_level, 5);
    assert_eq!(simulation.get_diplomatic_affinity(cuba, CountryId::USA), before + 10);
    assert_eq!(
        simulation.get_policy_value(Superpower::Usa, cuba, PolicyKind::EconomicAid),
        5
    );

    let crisis = simulation.check_change(&change).unwrap();
    assert_eq!(crisis.crisis_level, 9);
    assert_eq!(simulation.game_status().crisis_count, 1);

    // Re-sending token aid to a friendly state never clears the threshold,
    // whatever the draw.
    assert!(simulation
        .check_for_crises(CountryId::USA, PolicyKind::EconomicAid, id(40), 1, 1)
        .is_none());
    assert_eq!(simulation.game_status().crisis_count, 1);

    let after_policy = simulation.get_diplomatic_affinity(cuba, CountryId::USA);
    assert_eq!(simulation.process_turn(), TurnOutcome::Continuing);
    assert!(simulation.get_diplomatic_affinity(cuba, CountryId::USA) > after_policy);
    assert_eq!(simulation.state().globals.scores, simulation.state().expected_scores());
    assert!(simulation.state().diplomacy.is_consistent());
    assert!(simulation.state().pending_news.is_empty());
}

#[test]
fn superpowers_on_opposite_sides_of_a_civil_war_end_the_world() {
    let mut simulation = ColdWarSimulation::new(two_player());
    simulation
        .apply_policy(1, 12, PolicyKind::GovernmentIntervention, 1)
        .unwrap();
    simulation
        .apply_policy(2, 12, PolicyKind::RebelIntervention, 1)
        .unwrap();

    assert_eq!(simulation.process_turn(), TurnOutcome::NuclearWar);

    let state = simulation.state();
    assert_eq!(state.diplomacy.get(CountryId::USA, CountryId::USSR), -127);
    assert_eq!(state.globals.nastiness, NASTINESS_MAX);
    assert_eq!(simulation.clock().phase, TurnPhase::Terminal);
    assert!(simulation.game_status().is_game_over);
}

#[test]
fn last_year_produces_a_verdict_that_sticks() {
    let config = SimulationConfig {
        start_year: 1996,
        end_year: 1997,
        ..SimulationConfig::default()
    };
    let mut simulation = ColdWarSimulation::new(config);

    let outcome = simulation.process_turn();
    assert!(matches!(outcome, TurnOutcome::Win(_) | TurnOutcome::Tie | TurnOutcome::NuclearWar));
    assert_eq!(simulation.state().globals.year, 1997);

    let frozen = simulation.state().clone();
    assert_eq!(simulation.process_turn(), outcome);
    assert_eq!(simulation.process_turn(), outcome);
    assert_eq!(simulation.state(), &frozen);
    assert_eq!(simulation.clock().turns_played, 1);
}

#[test]
fn rejected_directives_leave_the_world_alone() {
    let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
    let pristine = simulation.state().clone();

    assert_eq!(
        simulation.apply_policy(3, 7, PolicyKind::Treaty, 2),
        Err(PolicyError::InvalidSuperpower(3))
    );
    assert_eq!(
        simulation.apply_policy(1, 81, PolicyKind::Treaty, 2),
        Err(PolicyError::CountryOutOfRange(81))
    );
    assert_eq!(
        simulation.apply_policy(1, 7, PolicyKind::Treaty, 8),
        Err(PolicyError::LevelOutOfRange(8))
    );
    assert!(simulation
        .apply_minor_policy(12, 1, PolicyKind::InsurgencyAid, 2)
        .is_err());

    assert_eq!(simulation.state(), &pristine);
}

#[test]
fn an_unattended_game_ends_by_the_final_year() {
    let mut simulation = ColdWarSimulation::new(SimulationConfig {
        level: 4,
        seed: 42,
        ..SimulationConfig::default()
    });
    simulation.set_opponent(RandomOpponent::both_sides());

    let mut outcome = TurnOutcome::Continuing;
    for _ in 0..8 {
        outcome = simulation.process_turn();
        let nastiness = simulation.state().globals.nastiness;
        assert!((0..=NASTINESS_MAX).contains(&nastiness));
        assert!(simulation.state().diplomacy.is_consistent());
        if outcome.is_terminal() {
            break;
        }
    }

    assert!(outcome.is_terminal());
    let stats = simulation.game_statistics();
    assert!(stats.turns_played <= 8);
    assert!(stats.years_recorded as u32 <= stats.turns_played);
}

#[test]
fn saved_games_resume_where_they_left_off() {
    let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
    simulation
        .apply_policy(2, 7, PolicyKind::Treaty, 3)
        .unwrap();
    simulation.process_turn();

    let raw = simulation.snapshot().to_json().unwrap();
    let mut restored = ColdWarSimulation::from_save(SaveGame::from_json(&raw).unwrap());

    assert_eq!(restored.state(), simulation.state());
    assert_eq!(restored.config(), simulation.config());
    assert_eq!(
        restored.get_policy_value(Superpower::Ussr, id(7), PolicyKind::Treaty),
        3
    );
    assert_eq!(restored.clock().turns_played, 1);

    assert_eq!(restored.process_turn(), TurnOutcome::Continuing);
    assert_eq!(simulation.process_turn(), TurnOutcome::Continuing);
    assert_eq!(restored.state(), simulation.state());
    assert_eq!(restored.clock().turns_played, 2);
}

#[test]
fn crisis_outcomes_outlive_the_year_and_a_reload() {
    let mut simulation = ColdWarSimulation::new(two_player());
    let crisis = simulation
        .check_for_crises(CountryId::USA, PolicyKind::RebelIntervention, id(5), 0, 5)
        .unwrap();
    let result = simulation
        .handle_crisis_response(crisis.id, CrisisResponse::BackDown)
        .unwrap();
    assert!(result.prestige_change < 0);

    let raw = simulation.snapshot().to_json().unwrap();
    let restored = ColdWarSimulation::from_save(SaveGame::from_json(&raw).unwrap());
    assert_eq!(restored.state().globals.scores, simulation.state().globals.scores);
    assert_eq!(restored.state().globals.crisis_prestige.usa, result.prestige_change);

    simulation.process_turn();
    let state = simulation.state();
    assert_eq!(state.globals.crisis_prestige.usa, result.prestige_change);
    assert_eq!(state.globals.scores, state.expected_scores());
}

#[test]
fn threatening_war_to_the_brink_ends_the_game() {
    let mut simulation = ColdWarSimulation::new(two_player());
    let crisis = simulation
        .check_for_crises(CountryId::USA, PolicyKind::RebelIntervention, id(5), 0, 5)
        .unwrap();

    let mut last = None;
    for _ in 0..8 {
        let result = simulation
            .handle_crisis_response(crisis.id, CrisisResponse::ThreatenWar)
            .unwrap();
        last = Some(result);
        if result.nuclear_war {
            break;
        }
    }

    assert!(last.unwrap().nuclear_war);
    assert_eq!(simulation.game_status().outcome, TurnOutcome::NuclearWar);
    assert_eq!(simulation.clock().phase, TurnPhase::Terminal);
    assert_eq!(simulation.process_turn(), TurnOutcome::NuclearWar);
    assert!(simulation.handle_crisis_response(crisis.id, CrisisResponse::BackDown).is_err());
}
