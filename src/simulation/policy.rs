//! Policy instruments, their level matrices, and the validated entry point
//! through which superpowers change them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::simulation::{CountryId, SimulationConfig, Superpower, TABLE_WIDTH, WorldState};

pub const MAX_POLICY_LEVEL: i64 = 7;
pub const TRADE_BASELINE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    EconomicAid,
    MilitaryAid,
    InsurgencyAid,
    GovernmentIntervention,
    RebelIntervention,
    Pressure,
    Treaty,
    Destabilization,
    Trade,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 9] = [
        PolicyKind::EconomicAid,
        PolicyKind::MilitaryAid,
        PolicyKind::InsurgencyAid,
        PolicyKind::GovernmentIntervention,
        PolicyKind::RebelIntervention,
        PolicyKind::Pressure,
        PolicyKind::Treaty,
        PolicyKind::Destabilization,
        PolicyKind::Trade,
    ];

    /// Instruments a minor country may wield against a neighbour.
    pub const MINOR: [PolicyKind; 4] = [
        PolicyKind::MilitaryAid,
        PolicyKind::InsurgencyAid,
        PolicyKind::GovernmentIntervention,
        PolicyKind::RebelIntervention,
    ];

    pub fn slot(self) -> usize {
        match self {
            PolicyKind::EconomicAid => 0,
            PolicyKind::MilitaryAid => 1,
            PolicyKind::InsurgencyAid => 2,
            PolicyKind::GovernmentIntervention => 3,
            PolicyKind::RebelIntervention => 4,
            PolicyKind::Pressure => 5,
            PolicyKind::Treaty => 6,
            PolicyKind::Destabilization => 7,
            PolicyKind::Trade => 8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyKind::EconomicAid => "economic aid",
            PolicyKind::MilitaryAid => "military aid",
            PolicyKind::InsurgencyAid => "aid to insurgents",
            PolicyKind::GovernmentIntervention => "intervention for the government",
            PolicyKind::RebelIntervention => "intervention for the rebels",
            PolicyKind::Pressure => "diplomatic pressure",
            PolicyKind::Treaty => "treaty",
            PolicyKind::Destabilization => "destabilization",
            PolicyKind::Trade => "trade",
        }
    }

    /// Resource cost per level.
    pub fn cost(self) -> i64 {
        match self {
            PolicyKind::EconomicAid => 1,
            PolicyKind::MilitaryAid => 2,
            PolicyKind::InsurgencyAid => 3,
            PolicyKind::GovernmentIntervention => 4,
            PolicyKind::RebelIntervention => 4,
            PolicyKind::Pressure => 1,
            PolicyKind::Treaty => 2,
            PolicyKind::Destabilization => 2,
            PolicyKind::Trade => 1,
        }
    }

    /// Affinity multipliers per level: (toward the target, toward the rival superpower).
    pub fn side_effect(self) -> (i64, i64) {
        match self {
            PolicyKind::EconomicAid => (2, -1),
            PolicyKind::MilitaryAid => (3, -2),
            PolicyKind::InsurgencyAid => (-2, -1),
            PolicyKind::GovernmentIntervention => (-4, -3),
            PolicyKind::RebelIntervention => (-5, -4),
            PolicyKind::Pressure => (-2, -1),
            PolicyKind::Treaty => (4, -2),
            PolicyKind::Destabilization => (-3, -2),
            PolicyKind::Trade => (0, 0),
        }
    }

    pub fn news_weight(self) -> i64 {
        match self {
            PolicyKind::EconomicAid | PolicyKind::Trade => 1,
            PolicyKind::MilitaryAid | PolicyKind::Pressure => 2,
            PolicyKind::InsurgencyAid | PolicyKind::Treaty => 3,
            PolicyKind::GovernmentIntervention | PolicyKind::Destabilization => 4,
            PolicyKind::RebelIntervention => 5,
        }
    }

    /// Moves that raise global tension when a superpower escalates them.
    pub fn is_provocative(self) -> bool {
        matches!(
            self,
            PolicyKind::InsurgencyAid
                | PolicyKind::RebelIntervention
                | PolicyKind::Pressure
                | PolicyKind::Destabilization
        )
    }

    /// Single-year instruments that lapse unless renewed.
    pub fn lapses_yearly(self) -> bool {
        matches!(self, PolicyKind::Pressure | PolicyKind::Destabilization)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMatrix {
    cells: Vec<u8>,
}

impl PolicyMatrix {
    pub fn filled(value: u8) -> Self {
        Self {
            cells: vec![value; TABLE_WIDTH * TABLE_WIDTH],
        }
    }

    pub fn get(&self, actor: CountryId, target: CountryId) -> u8 {
        self.cells[actor.index() * TABLE_WIDTH + target.index()]
    }

    pub fn set(&mut self, actor: CountryId, target: CountryId, level: u8) {
        self.cells[actor.index() * TABLE_WIDTH + target.index()] = level;
    }

    pub fn has_valid_shape(&self) -> bool {
        self.cells.len() == TABLE_WIDTH * TABLE_WIDTH
    }

    /// Clamps every cell into the legal level range, returning how many moved.
    pub fn clamp_levels(&mut self) -> usize {
        let mut changed = 0;
        for cell in self.cells.iter_mut() {
            if i64::from(*cell) > MAX_POLICY_LEVEL {
                *cell = MAX_POLICY_LEVEL as u8;
                changed += 1;
            }
        }
        changed
    }
}

impl Default for PolicyMatrix {
    fn default() -> Self {
        Self::filled(0)
    }
}

/// Current levels of every instrument plus the start-of-year copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyBook {
    current: [PolicyMatrix; 9],
    previous: [PolicyMatrix; 9],
}

impl Default for PolicyBook {
    fn default() -> Self {
        let mut current: [PolicyMatrix; 9] = std::array::from_fn(|_| PolicyMatrix::default());
        let trade = &mut current[PolicyKind::Trade.slot()];
        for superpower in Superpower::ALL {
            for target in CountryId::all() {
                trade.set(superpower.country(), target, TRADE_BASELINE);
            }
        }
        Self {
            previous: current.clone(),
            current,
        }
    }
}

impl PolicyBook {
    pub fn level(&self, kind: PolicyKind, actor: CountryId, target: CountryId) -> u8 {
        self.current[kind.slot()].get(actor, target)
    }

    pub fn previous_level(&self, kind: PolicyKind, actor: CountryId, target: CountryId) -> u8 {
        self.previous[kind.slot()].get(actor, target)
    }

    /// Level read as a wide integer for formula work.
    pub fn value(&self, kind: PolicyKind, actor: CountryId, target: CountryId) -> i64 {
        i64::from(self.level(kind, actor, target))
    }

    pub(crate) fn set_level(
        &mut self,
        kind: PolicyKind,
        actor: CountryId,
        target: CountryId,
        level: u8,
    ) {
        self.current[kind.slot()].set(actor, target, level);
    }

    pub fn snapshot_previous(&mut self) {
        self.previous = self.current.clone();
    }

    pub(crate) fn matrices_mut(&mut self) -> impl Iterator<Item = &mut PolicyMatrix> {
        self.current.iter_mut().chain(self.previous.iter_mut())
    }

    pub fn has_valid_shape(&self) -> bool {
        self.current
            .iter()
            .chain(self.previous.iter())
            .all(PolicyMatrix::has_valid_shape)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{0} is not a superpower")]
    InvalidSuperpower(i64),
    #[error("country {0} is outside 1..=80")]
    CountryOutOfRange(i64),
    #[error("policy level {0} is outside 0..=7")]
    LevelOutOfRange(i64),
    #[error("{kind:?} at level {level} costs {cost}, only {available} available")]
    InsufficientResources {
        kind: PolicyKind,
        level: i64,
        cost: i64,
        available: i64,
    },
    #[error("{0} is not a minor country")]
    NotAMinorCountry(i64),
    #[error("{0:?} is not available to minor countries")]
    KindNotAvailable(PolicyKind),
}

/// A recorded level change, queued as news for the reaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyChange {
    pub subject: CountryId,
    pub object: CountryId,
    pub kind: PolicyKind,
    pub old_level: u8,
    pub new_level: u8,
}

impl PolicyChange {
    pub fn news_worth(&self) -> i64 {
        self.kind.news_weight() * i64::from(self.new_level)
    }

    pub fn delta(&self) -> i64 {
        i64::from(self.new_level) - i64::from(self.old_level)
    }
}

/// A directive as issued by a player or an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDirective {
    pub superpower: Superpower,
    pub country: CountryId,
    pub kind: PolicyKind,
    pub level: u8,
}

/// All nine instruments of both superpowers toward one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPolicies {
    pub country: CountryId,
    pub levels: [[u8; 9]; 2],
}

impl CountryPolicies {
    pub fn level(&self, superpower: Superpower, kind: PolicyKind) -> u8 {
        self.levels[superpower.slot()][kind.slot()]
    }
}

/// Budget a superpower can spend on a single directive.
pub fn available_resources(world: &WorldState, config: &SimulationConfig, superpower: Superpower) -> i64 {
    let standing = world
        .diplomacy
        .get(superpower.country(), superpower.rival().country());
    config.policy_budget + (standing + 127).max(0) / 2
}

/// Validates and applies a superpower directive.
///
/// Rejected directives leave the world untouched. On success the level is
/// written, the kind's side effects are applied to the target and to the
/// rival superpower, and the change is queued as news.
pub fn apply_policy(
    world: &mut WorldState,
    config: &SimulationConfig,
    superpower: i64,
    country: i64,
    kind: PolicyKind,
    level: i64,
) -> Result<PolicyChange, PolicyError> {
    let superpower = Superpower::from_id(superpower).ok_or(PolicyError::InvalidSuperpower(superpower))?;
    let target = CountryId::from_raw(country).ok_or(PolicyError::CountryOutOfRange(country))?;
    if !(0..=MAX_POLICY_LEVEL).contains(&level) {
        return Err(PolicyError::LevelOutOfRange(level));
    }

    let cost = kind.cost() * level;
    let available = available_resources(world, config, superpower);
    if cost > available {
        return Err(PolicyError::InsufficientResources {
            kind,
            level,
            cost,
            available,
        });
    }

    let actor = superpower.country();
    let old_level = world.policies.level(kind, actor, target);
    let new_level = level as u8;
    world.policies.set_level(kind, actor, target, new_level);

    let (toward_target, toward_rival) = kind.side_effect();
    world.diplomacy.adjust(actor, target, toward_target * level);
    world
        .diplomacy
        .adjust(actor, superpower.rival().country(), toward_rival * level);

    let change = PolicyChange {
        subject: actor,
        object: target,
        kind,
        old_level,
        new_level,
    };
    world.pending_news.push(change);
    debug!(
        superpower = superpower.name(),
        country = target.get(),
        ?kind,
        old_level,
        new_level,
        "policy applied"
    );
    Ok(change)
}

/// Minor-country counterpart of [`apply_policy`], limited to the proxy
/// instruments. Minor moves carry no direct affinity side effect; their
/// diplomatic weight is felt in the reaction phase.
pub fn apply_minor_policy(
    world: &mut WorldState,
    actor: i64,
    target: i64,
    kind: PolicyKind,
    level: i64,
) -> Result<PolicyChange, PolicyError> {
    let actor_id = CountryId::from_raw(actor).ok_or(PolicyError::CountryOutOfRange(actor))?;
    if actor_id.is_superpower() {
        return Err(PolicyError::NotAMinorCountry(actor));
    }
    let target_id = CountryId::from_raw(target).ok_or(PolicyError::CountryOutOfRange(target))?;
    if target_id.is_superpower() || target_id == actor_id {
        return Err(PolicyError::NotAMinorCountry(target));
    }
    if !PolicyKind::MINOR.contains(&kind) {
        return Err(PolicyError::KindNotAvailable(kind));
    }
    if !(0..=MAX_POLICY_LEVEL).contains(&level) {
        return Err(PolicyError::LevelOutOfRange(level));
    }

    let old_level = world.policies.level(kind, actor_id, target_id);
    world.policies.set_level(kind, actor_id, target_id, level as u8);
    let change = PolicyChange {
        subject: actor_id,
        object: target_id,
        kind,
        old_level,
        new_level: level as u8,
    };
    world.pending_news.push(change);
    Ok(change)
}

pub fn get_policy_value(
    world: &WorldState,
    superpower: Superpower,
    country: CountryId,
    kind: PolicyKind,
) -> u8 {
    world.policies.level(kind, superpower.country(), country)
}

pub fn get_country_policies(world: &WorldState, country: CountryId) -> CountryPolicies {
    let mut levels = [[0u8; 9]; 2];
    for superpower in Superpower::ALL {
        for kind in PolicyKind::ALL {
            levels[superpower.slot()][kind.slot()] =
                world.policies.level(kind, superpower.country(), country);
        }
    }
    CountryPolicies { country, levels }
}

/// Simple rule-of-thumb suggestions for a superpower toward one country.
pub fn policy_recommendations(
    world: &WorldState,
    superpower: Superpower,
    country: CountryId,
) -> Vec<PolicyDirective> {
    let actor = superpower.country();
    let affinity = world.diplomacy.get(actor, country);
    let target = world.country(country);
    let level = |kind| world.policies.level(kind, actor, country);
    let mut suggestions = Vec::new();

    if affinity < 30 && level(PolicyKind::EconomicAid) < 3 {
        suggestions.push((PolicyKind::EconomicAid, 3));
    }
    if target.insurgency_strength >= target.government_strength / 2
        && level(PolicyKind::MilitaryAid) < 3
    {
        suggestions.push((PolicyKind::MilitaryAid, 3));
    }
    if affinity > 50 && level(PolicyKind::Treaty) < 3 {
        suggestions.push((PolicyKind::Treaty, 3));
    }
    if affinity < -50 && level(PolicyKind::Destabilization) == 0 {
        suggestions.push((PolicyKind::Destabilization, 2));
    }

    suggestions
        .into_iter()
        .take(3)
        .map(|(kind, level)| PolicyDirective {
            superpower,
            country,
            kind,
            level,
        })
        .collect()
}
