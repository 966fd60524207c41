//! Country identifiers, the two superpowers, and the per-country record.

use colored::Color as ColoredColor;
use serde::{Deserialize, Serialize};

/// Number of countries in the world, superpowers included.
pub const COUNTRY_COUNT: u8 = 80;
/// Width of every dense per-country table. Index 0 is unused.
pub const TABLE_WIDTH: usize = COUNTRY_COUNT as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CountryId(u8);

impl CountryId {
    pub const USA: CountryId = CountryId(1);
    pub const USSR: CountryId = CountryId(2);

    pub fn new(raw: u8) -> Option<CountryId> {
        (1..=COUNTRY_COUNT).contains(&raw).then_some(CountryId(raw))
    }

    /// Like [`CountryId::new`] but accepts the wide integers callers pass in.
    pub fn from_raw(raw: i64) -> Option<CountryId> {
        u8::try_from(raw).ok().and_then(CountryId::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_superpower(self) -> bool {
        self.0 <= 2
    }

    pub fn superpower(self) -> Option<Superpower> {
        Superpower::from_country(self)
    }

    /// Every country, superpowers first.
    pub fn all() -> impl Iterator<Item = CountryId> {
        (1..=COUNTRY_COUNT).map(CountryId)
    }

    /// Minor countries only (ids 3 and up).
    pub fn minors() -> impl Iterator<Item = CountryId> {
        (3..=COUNTRY_COUNT).map(CountryId)
    }
}

impl TryFrom<u8> for CountryId {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        CountryId::new(raw).ok_or_else(|| format!("country id {raw} outside 1..={COUNTRY_COUNT}"))
    }
}

impl From<CountryId> for u8 {
    fn from(id: CountryId) -> u8 {
        id.0
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Superpower {
    Usa,
    Ussr,
}

impl Superpower {
    pub const ALL: [Superpower; 2] = [Superpower::Usa, Superpower::Ussr];

    pub fn from_id(raw: i64) -> Option<Superpower> {
        match raw {
            1 => Some(Superpower::Usa),
            2 => Some(Superpower::Ussr),
            _ => None,
        }
    }

    pub fn from_country(id: CountryId) -> Option<Superpower> {
        Superpower::from_id(i64::from(id.get()))
    }

    pub fn country(self) -> CountryId {
        match self {
            Superpower::Usa => CountryId::USA,
            Superpower::Ussr => CountryId::USSR,
        }
    }

    /// Slot in the two-element per-superpower arrays.
    pub fn slot(self) -> usize {
        match self {
            Superpower::Usa => 0,
            Superpower::Ussr => 1,
        }
    }

    pub fn rival(self) -> Superpower {
        match self {
            Superpower::Usa => Superpower::Ussr,
            Superpower::Ussr => Superpower::Usa,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Superpower::Usa => "USA",
            Superpower::Ussr => "USSR",
        }
    }

    pub fn logging_color(&self) -> ColoredColor {
        match self {
            Superpower::Usa => ColoredColor::BrightBlue,
            Superpower::Ussr => ColoredColor::BrightRed,
        }
    }
}

/// Per-year markers cleared at the start of each country's development step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryFlags {
    pub coup: bool,
    pub revolution: bool,
    pub finlandized: [bool; 2],
}

/// Start-of-year values kept for delta formulas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthSnapshot {
    pub government_strength: i64,
    pub insurgency_strength: i64,
    pub government_popularity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,

    // founding attributes
    pub gnp: i64,
    pub population: i64,
    pub military_spending: i64,
    pub military_men: i64,
    pub government_wing: i64,
    pub insurgency_wing: i64,
    pub draft_fraction: i64,
    pub deaths: i64,
    pub left_power: bool,
    pub dont_mess: i64,

    // simulation state
    pub government_strength: i64,
    pub insurgency_strength: i64,
    pub government_popularity: i64,
    pub government_stability: i64,
    pub military_power: i64,
    pub insurgency_power: i64,
    pub prestige_value: i64,
    pub strength_ratio: i64,
    pub consumption_fraction: i64,
    pub investment_fraction: i64,
    pub military_fraction: i64,
    pub consumption_spending: i64,
    pub investment_spending: i64,
    pub maturity: i64,
    pub government_aid: i64,
    pub military_pressure: i64,
    pub finlandization_probability: [i64; 2],
    pub flags: CountryFlags,
    pub previous: StrengthSnapshot,
}

impl Country {
    pub fn is_superpower(&self) -> bool {
        self.id.is_superpower()
    }

    /// A successful coup halves the sitting government's strength.
    pub fn apply_coup(&mut self) {
        self.flags.coup = true;
        self.government_strength = (self.government_strength / 2).max(1);
    }

    /// A revolution breaks the government and emboldens the rebels.
    pub fn apply_revolution(&mut self) {
        self.flags.revolution = true;
        self.government_strength = (self.government_strength / 3).max(1);
        self.insurgency_strength = self.insurgency_strength.saturating_mul(2);
    }

    pub fn snapshot_strength(&mut self) {
        self.previous = StrengthSnapshot {
            government_strength: self.government_strength,
            insurgency_strength: self.insurgency_strength,
            government_popularity: self.government_popularity,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_id_rejects_out_of_range_values() {
        assert!(CountryId::new(0).is_none());
        assert!(CountryId::new(81).is_none());
        assert!(CountryId::from_raw(-3).is_none());
        assert_eq!(CountryId::new(80).map(CountryId::get), Some(80));
    }

    #[test]
    fn minors_skip_the_superpowers() {
        let minors: Vec<_> = CountryId::minors().collect();
        assert_eq!(minors.len(), 78);
        assert!(minors.iter().all(|id| !id.is_superpower()));
        assert_eq!(CountryId::all().count(), 80);
    }

    #[test]
    fn superpowers_map_to_their_rows() {
        assert_eq!(Superpower::Usa.country(), CountryId::USA);
        assert_eq!(Superpower::Ussr.rival(), Superpower::Usa);
        assert_eq!(CountryId::USSR.superpower(), Some(Superpower::Ussr));
        assert_eq!(Superpower::from_id(3), None);
    }

    #[test]
    fn country_id_deserialization_is_checked() {
        assert!(serde_json::from_str::<CountryId>("7").is_ok());
        assert!(serde_json::from_str::<CountryId>("99").is_err());
    }
}
