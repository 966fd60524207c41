//! Property tests over arbitrary directives and whole unattended games.

use proptest::prelude::*;

use balance_of_power::simulation::{
    ColdWarSimulation, NASTINESS_MAX, PolicyKind, RandomOpponent, SimulationConfig,
};

fn directive() -> impl Strategy<Value = (i64, i64, usize, i64)> {
    (0i64..=3, -1i64..=82, 0usize..PolicyKind::ALL.len(), -2i64..=9)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every accepted directive keeps the affinity matrix symmetric and in
    /// range; every rejected one changes nothing.
    #[test]
    fn directives_keep_the_matrix_consistent(
        directives in prop::collection::vec(directive(), 1..24)
    ) {
        let mut simulation = ColdWarSimulation::new(SimulationConfig::default());
        for (superpower, country, kind, level) in directives {
            let kind = PolicyKind::ALL[kind];
            let before = simulation.state().clone();
            match simulation.apply_policy(superpower, country, kind, level) {
                Ok(change) => {
                    prop_assert_eq!(i64::from(change.new_level), level);
                    prop_assert_eq!(
                        simulation.state().policies.level(kind, change.subject, change.object),
                        change.new_level
                    );
                }
                Err(_) => {
                    prop_assert_eq!(simulation.state(), &before);
                }
            }
            prop_assert!(simulation.state().diplomacy.is_consistent());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Tension never leaves 0..=127 and the game always finishes.
    #[test]
    fn unattended_games_stay_in_bounds(seed in any::<u64>(), level in 1u8..=4) {
        let mut simulation = ColdWarSimulation::new(SimulationConfig {
            seed,
            level,
            ..SimulationConfig::default()
        });
        simulation.set_opponent(RandomOpponent::both_sides());

        let mut finished = false;
        for _ in 0..8 {
            let outcome = simulation.process_turn();
            let state = simulation.state();
            prop_assert!((0..=NASTINESS_MAX).contains(&state.globals.nastiness));
            prop_assert!(state.diplomacy.is_consistent());
            if outcome.is_terminal() {
                finished = true;
                break;
            }
            prop_assert_eq!(state.globals.scores, state.expected_scores());
        }
        prop_assert!(finished);
    }
}
