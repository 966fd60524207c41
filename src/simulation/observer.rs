//! Read-only snapshot shared with the driver after every turn.

use serde::Serialize;

use crate::simulation::{
    CountryId, Crisis, Leaning, Scores, Superpower, TurnOutcome, TurnPhase, WorldEvent, WorldState,
    leaning,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeaningTally {
    pub usa: u32,
    pub ussr: u32,
    pub contested: u32,
    pub neutral: u32,
    pub unrest: u32,
    pub finlandized: u32,
}

impl LeaningTally {
    pub fn of(world: &WorldState) -> Self {
        let mut tally = Self::default();
        for country in CountryId::minors() {
            match leaning(world, country) {
                Leaning::Aligned(Superpower::Usa) => tally.usa += 1,
                Leaning::Aligned(Superpower::Ussr) => tally.ussr += 1,
                Leaning::Contested => tally.contested += 1,
                Leaning::Neutral => tally.neutral += 1,
                Leaning::Unrest => tally.unrest += 1,
                Leaning::Finlandized(_) => tally.finlandized += 1,
            }
        }
        tally
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ObserverSnapshot {
    pub year: i64,
    pub turns_played: u32,
    pub phase: TurnPhase,
    pub outcome: TurnOutcome,
    pub scores: Scores,
    pub nastiness: i64,
    pub leanings: LeaningTally,
    pub events: Vec<WorldEvent>,
    pub active_crises: Vec<Crisis>,
}

impl ObserverSnapshot {
    pub fn new() -> Self {
        Self {
            year: 0,
            turns_played: 0,
            phase: TurnPhase::Planning,
            outcome: TurnOutcome::Continuing,
            scores: Scores::default(),
            nastiness: 0,
            leanings: LeaningTally::default(),
            events: Vec::new(),
            active_crises: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        world: &WorldState,
        turns_played: u32,
        phase: TurnPhase,
        events: Vec<WorldEvent>,
        active_crises: Vec<Crisis>,
    ) {
        self.year = world.globals.year;
        self.turns_played = turns_played;
        self.phase = phase;
        self.outcome = world.globals.outcome();
        self.scores = world.globals.scores;
        self.nastiness = world.globals.nastiness;
        self.leanings = LeaningTally::of(world);
        self.events = events;
        self.active_crises = active_crises;
    }
}

impl Default for ObserverSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
