//! International crises: whether a policy change provokes one, and how a
//! crisis escalates or winds down under each response.

use std::collections::BTreeMap;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::simulation::{
    CountryId, PolicyChange, PolicyKind, SimRng, SimulationConfig, Superpower, WorldState,
};

pub const ERUPTION_LEVEL: u8 = 9;
pub const RESOLUTION_LEVEL: u8 = 3;
pub const CRISIS_THRESHOLD: f64 = 0.3;
pub const MIN_PRESTIGE_AT_RISK: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisResponse {
    BackDown,
    Negotiate,
    RefuseNegotiate,
    ThreatenWar,
}

impl CrisisResponse {
    pub fn label(self) -> &'static str {
        match self {
            CrisisResponse::BackDown => "backing down",
            CrisisResponse::Negotiate => "negotiation",
            CrisisResponse::RefuseNegotiate => "a refusal to negotiate",
            CrisisResponse::ThreatenWar => "threats of war",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crisis {
    pub id: u64,
    pub subject: CountryId,
    pub object: CountryId,
    pub kind: PolicyKind,
    pub old_value: u8,
    pub new_value: u8,
    /// 9 on eruption, 1 one step from nuclear exchange.
    pub crisis_level: u8,
    pub prestige_at_risk: i64,
    pub interest: [u8; 2],
    pub is_active: bool,
}

impl Crisis {
    pub fn interest(&self, superpower: Superpower) -> u8 {
        self.interest[superpower.slot()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResult {
    pub crisis_id: u64,
    pub response: CrisisResponse,
    pub prestige_change: i64,
    pub diplomatic_change: i64,
    pub level_delta: i64,
    pub crisis_level: u8,
    pub crisis_resolved: bool,
    pub nuclear_war: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrisisError {
    #[error("no active crisis with id {0}")]
    UnknownCrisis(u64),
}

/// How much each instrument inflames the target.
pub fn kind_weight(kind: PolicyKind) -> f64 {
    match kind {
        PolicyKind::EconomicAid | PolicyKind::Trade => 0.05,
        PolicyKind::Treaty => 0.1,
        PolicyKind::Pressure => 0.15,
        PolicyKind::MilitaryAid | PolicyKind::Destabilization => 0.2,
        PolicyKind::InsurgencyAid => 0.25,
        PolicyKind::GovernmentIntervention => 0.3,
        PolicyKind::RebelIntervention => 0.4,
    }
}

#[derive(Debug, Clone, Default, Resource, Serialize, Deserialize)]
pub struct CrisisManager {
    crises: BTreeMap<u64, Crisis>,
    next_id: u64,
}

impl CrisisManager {
    /// Escalation probability of one policy change, jitter included.
    fn crisis_probability(
        world: &WorldState,
        rng: &mut SimRng,
        subject: CountryId,
        kind: PolicyKind,
        object: CountryId,
        old_value: u8,
        new_value: u8,
    ) -> f64 {
        let mut probability = 0.1 + kind_weight(kind);
        probability += 0.05 * (f64::from(new_value) - f64::from(old_value)).abs();
        if world.diplomacy.get(object, subject) < -50 {
            probability += 0.2;
        }
        probability += 0.1 * (world.globals.nastiness as f64 / 100.0);
        probability += rng.uniform(-0.1, 0.1);
        probability.clamp(0.0, 1.0)
    }

    fn prestige_at_risk(world: &WorldState, config: &SimulationConfig, subject: CountryId, object: CountryId) -> i64 {
        let pooled = (world.country(subject).prestige_value + world.country(object).prestige_value) / 2;
        let scaled = (pooled as f64 * (1.0 + 0.2 * f64::from(config.level))).floor() as i64;
        scaled.max(MIN_PRESTIGE_AT_RISK)
    }

    fn interest(world: &WorldState, superpower: Superpower, subject: CountryId, object: CountryId) -> u8 {
        let pooled = world.country(subject).prestige_value + world.country(object).prestige_value;
        let mut interest = pooled / 200;
        let toward = |country| world.diplomacy.get(country, superpower.country());
        let (subject_standing, object_standing) = (toward(subject), toward(object));
        if subject_standing > 50 || object_standing > 50 {
            interest += 2;
        }
        if subject_standing < -50 || object_standing < -50 {
            interest -= 1;
        }
        interest.clamp(0, 7) as u8
    }

    /// Opens a crisis when a policy change is provocative enough.
    #[allow(clippy::too_many_arguments)]
    pub fn check_for_crises(
        &mut self,
        world: &WorldState,
        config: &SimulationConfig,
        rng: &mut SimRng,
        subject: CountryId,
        kind: PolicyKind,
        object: CountryId,
        old_value: u8,
        new_value: u8,
    ) -> Option<Crisis> {
        if subject == object {
            return None;
        }
        let probability =
            Self::crisis_probability(world, rng, subject, kind, object, old_value, new_value);
        if probability <= CRISIS_THRESHOLD {
            return None;
        }

        self.next_id += 1;
        let crisis = Crisis {
            id: self.next_id,
            subject,
            object,
            kind,
            old_value,
            new_value,
            crisis_level: ERUPTION_LEVEL,
            prestige_at_risk: Self::prestige_at_risk(world, config, subject, object),
            interest: [
                Self::interest(world, Superpower::Usa, subject, object),
                Self::interest(world, Superpower::Ussr, subject, object),
            ],
            is_active: true,
        };
        info!(
            crisis = crisis.id,
            subject = subject.get(),
            object = object.get(),
            ?kind,
            probability,
            "crisis erupted"
        );
        self.crises.insert(crisis.id, crisis.clone());
        Some(crisis)
    }

    pub fn check_change(
        &mut self,
        world: &WorldState,
        config: &SimulationConfig,
        rng: &mut SimRng,
        change: &PolicyChange,
    ) -> Option<Crisis> {
        self.check_for_crises(
            world,
            config,
            rng,
            change.subject,
            change.kind,
            change.object,
            change.old_level,
            change.new_level,
        )
    }

    /// Applies one response to an active crisis.
    ///
    /// Prestige goes to the human player's crisis ledger, which every score
    /// refresh adds back in; affinity moves between the two parties.
    /// ThreatenWar keeps the crisis alive until the level hits 1, at which
    /// point the world goes to nuclear war.
    pub fn handle_crisis_response(
        &mut self,
        world: &mut WorldState,
        config: &SimulationConfig,
        id: u64,
        response: CrisisResponse,
    ) -> Result<CrisisResult, CrisisError> {
        let crisis = self.crises.get_mut(&id).ok_or(CrisisError::UnknownCrisis(id))?;
        let risk = crisis.prestige_at_risk;
        let before = crisis.crisis_level;

        let (prestige_change, diplomatic_change, step) = match response {
            CrisisResponse::BackDown => (-(risk / 2), -32, 0),
            CrisisResponse::Negotiate => (-(risk / 4), -16, 2),
            CrisisResponse::RefuseNegotiate => (risk / 10, 8, 1),
            CrisisResponse::ThreatenWar => (risk / 5, 16, 1),
        };
        crisis.crisis_level = before.saturating_sub(step).max(1);

        let nuclear_war = response == CrisisResponse::ThreatenWar && crisis.crisis_level == 1;
        let crisis_resolved = match response {
            CrisisResponse::BackDown => true,
            CrisisResponse::ThreatenWar => nuclear_war,
            CrisisResponse::Negotiate | CrisisResponse::RefuseNegotiate => {
                crisis.crisis_level <= RESOLUTION_LEVEL
            }
        };

        let result = CrisisResult {
            crisis_id: id,
            response,
            prestige_change,
            diplomatic_change,
            level_delta: i64::from(crisis.crisis_level) - i64::from(before),
            crisis_level: crisis.crisis_level,
            crisis_resolved,
            nuclear_war,
        };

        *world.globals.crisis_prestige.get_mut(config.human_player) += prestige_change;
        world
            .diplomacy
            .adjust(crisis.subject, crisis.object, diplomatic_change);
        world.refresh_scores();

        if nuclear_war {
            warn!(crisis = id, "crisis escalated to nuclear war");
            world.declare_nuclear_war();
        }
        if crisis_resolved {
            self.crises.remove(&id);
        }
        Ok(result)
    }

    pub fn active_crises(&self) -> impl Iterator<Item = &Crisis> {
        self.crises.values().filter(|crisis| crisis.is_active)
    }

    pub fn get(&self, id: u64) -> Option<&Crisis> {
        self.crises.get(&id)
    }

    pub fn len(&self) -> usize {
        self.crises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{TurnOutcome, initial_world};

    fn id(raw: u8) -> CountryId {
        CountryId::new(raw).unwrap()
    }

    fn open_crisis(manager: &mut CrisisManager, world: &WorldState, config: &SimulationConfig) -> Crisis {
        let mut rng = SimRng::seeded(7);
        // Rebel intervention against a hostile state always clears the threshold.
        manager
            .check_for_crises(world, config, &mut rng, CountryId::USA, PolicyKind::RebelIntervention, id(5), 0, 5)
            .unwrap()
    }

    #[test]
    fn self_targeted_changes_never_provoke() {
        let config = SimulationConfig::default();
        let world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let mut rng = SimRng::seeded(1);
        let crisis = manager.check_for_crises(
            &world,
            &config,
            &mut rng,
            id(12),
            PolicyKind::RebelIntervention,
            id(12),
            0,
            7,
        );
        assert!(crisis.is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn token_economic_aid_stays_below_threshold() {
        let config = SimulationConfig::default();
        let world = initial_world(&config);
        let mut manager = CrisisManager::default();
        // 0.1 + 0.05 + 0.008 + at most 0.1 of jitter.
        for seed in 0..32 {
            let mut rng = SimRng::seeded(seed);
            let crisis = manager.check_for_crises(
                &world,
                &config,
                &mut rng,
                CountryId::USA,
                PolicyKind::EconomicAid,
                id(40),
                1,
                1,
            );
            assert!(crisis.is_none());
        }
    }

    #[test]
    fn eruption_sets_level_risk_and_interest() {
        let config = SimulationConfig::default();
        let world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let crisis = open_crisis(&mut manager, &world, &config);

        assert_eq!(crisis.crisis_level, ERUPTION_LEVEL);
        assert!(crisis.prestige_at_risk >= MIN_PRESTIGE_AT_RISK);
        assert!(crisis.interest.iter().all(|interest| *interest <= 7));
        assert_eq!(manager.active_crises().count(), 1);
    }

    #[test]
    fn backing_down_resolves_at_once_and_costs_prestige() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let crisis = open_crisis(&mut manager, &world, &config);

        let result = manager
            .handle_crisis_response(&mut world, &config, crisis.id, CrisisResponse::BackDown)
            .unwrap();

        assert!(result.crisis_resolved);
        assert_eq!(result.prestige_change, -(crisis.prestige_at_risk / 2));
        assert_eq!(world.globals.crisis_prestige.usa, result.prestige_change);
        assert_eq!(world.globals.scores, world.expected_scores());
        assert!(manager.get(crisis.id).is_none());
    }

    #[test]
    fn negotiation_winds_down_in_steps_of_two() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let crisis = open_crisis(&mut manager, &world, &config);

        let levels: Vec<(u8, bool)> = (0..3)
            .map(|_| {
                let result = manager
                    .handle_crisis_response(&mut world, &config, crisis.id, CrisisResponse::Negotiate)
                    .unwrap();
                (result.crisis_level, result.crisis_resolved)
            })
            .collect();

        assert_eq!(levels, vec![(7, false), (5, false), (3, true)]);
        assert!(world.diplomacy.is_consistent());
    }

    #[test]
    fn threatening_war_until_level_one_ends_in_nuclear_war() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let crisis = open_crisis(&mut manager, &world, &config);

        let mut results = Vec::new();
        loop {
            let result = manager
                .handle_crisis_response(&mut world, &config, crisis.id, CrisisResponse::ThreatenWar)
                .unwrap();
            results.push(result);
            if result.crisis_level == 1 {
                break;
            }
        }

        let (last, earlier) = results.split_last().unwrap();
        assert_eq!(results.len(), 8);
        assert!(last.nuclear_war);
        assert!(earlier.iter().all(|result| !result.nuclear_war));
        assert_eq!(world.globals.outcome(), TurnOutcome::NuclearWar);
        assert!(world.globals.quit_flag);
        assert!(!world.globals.win_flag);
        assert_eq!(
            manager.handle_crisis_response(&mut world, &config, crisis.id, CrisisResponse::ThreatenWar),
            Err(CrisisError::UnknownCrisis(crisis.id))
        );
    }

    #[test]
    fn threatening_war_keeps_the_crisis_open_below_level_three() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let mut manager = CrisisManager::default();
        let crisis = open_crisis(&mut manager, &world, &config);

        let mut last = None;
        for _ in 0..6 {
            last = Some(
                manager
                    .handle_crisis_response(&mut world, &config, crisis.id, CrisisResponse::ThreatenWar)
                    .unwrap(),
            );
        }

        // Negotiation would settle here; threats only end at the brink.
        let at_three = last.unwrap();
        assert_eq!(at_three.crisis_level, RESOLUTION_LEVEL);
        assert!(!at_three.crisis_resolved);
        assert!(!at_three.nuclear_war);
        assert_eq!(manager.active_crises().count(), 1);
        assert_eq!(world.globals.outcome(), TurnOutcome::Continuing);
    }

    #[test]
    fn unknown_crisis_is_an_error() {
        let config = SimulationConfig::default();
        let mut world = initial_world(&config);
        let mut manager = CrisisManager::default();
        assert_eq!(
            manager.handle_crisis_response(&mut world, &config, 99, CrisisResponse::Negotiate),
            Err(CrisisError::UnknownCrisis(99))
        );
    }
}
