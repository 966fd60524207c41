//! Structured world events and the bounded log the observer reads.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::simulation::{Country, CountryId, CrisisResponse, PolicyKind, Superpower};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCountry {
    pub id: CountryId,
    pub name: String,
}

impl EventCountry {
    pub fn of(country: &Country) -> Self {
        Self {
            id: country.id,
            name: country.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEventKind {
    PolicyShift {
        subject: EventCountry,
        object: EventCountry,
        policy: PolicyKind,
        old_level: u8,
        new_level: u8,
        news_worth: i64,
    },
    Coup {
        country: EventCountry,
    },
    Revolution {
        country: EventCountry,
    },
    Finlandization {
        country: EventCountry,
        superpower: Superpower,
    },
    CrisisErupted {
        crisis_id: u64,
        subject: EventCountry,
        object: EventCountry,
        policy: PolicyKind,
    },
    CrisisResolved {
        crisis_id: u64,
        response: CrisisResponse,
    },
    NuclearWar {
        cause: String,
    },
    Victory {
        winner: Superpower,
        usa_score: i64,
        ussr_score: i64,
    },
    Stalemate {
        score: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub year: i64,
    pub kind: WorldEventKind,
}

impl WorldEvent {
    pub fn category(&self) -> &'static str {
        match &self.kind {
            WorldEventKind::PolicyShift { .. } => "Policy",
            WorldEventKind::Coup { .. } | WorldEventKind::Revolution { .. } => "Upheaval",
            WorldEventKind::Finlandization { .. } => "Influence",
            WorldEventKind::CrisisErupted { .. } | WorldEventKind::CrisisResolved { .. } => {
                "Crisis"
            }
            WorldEventKind::NuclearWar { .. } => "War",
            WorldEventKind::Victory { .. } | WorldEventKind::Stalemate { .. } => "Verdict",
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match &self.kind {
            WorldEventKind::PolicyShift {
                old_level,
                new_level,
                policy,
                ..
            } => {
                if policy.is_provocative() && new_level > old_level {
                    Sentiment::Negative
                } else {
                    Sentiment::Neutral
                }
            }
            WorldEventKind::Coup { .. }
            | WorldEventKind::Revolution { .. }
            | WorldEventKind::CrisisErupted { .. }
            | WorldEventKind::NuclearWar { .. } => Sentiment::Negative,
            WorldEventKind::Finlandization { .. } | WorldEventKind::Stalemate { .. } => {
                Sentiment::Neutral
            }
            WorldEventKind::CrisisResolved { .. } | WorldEventKind::Victory { .. } => {
                Sentiment::Positive
            }
        }
    }

    pub fn headline(&self) -> String {
        match &self.kind {
            WorldEventKind::PolicyShift {
                subject,
                object,
                policy,
                old_level,
                new_level,
                ..
            } => format!(
                "{} moves {} for {} from {} to {}",
                subject.name,
                policy.label(),
                object.name,
                old_level,
                new_level
            ),
            WorldEventKind::Coup { country } => {
                format!("Coup d'etat in {}: the army seizes power", country.name)
            }
            WorldEventKind::Revolution { country } => {
                format!("Revolution in {}: insurgents topple the government", country.name)
            }
            WorldEventKind::Finlandization {
                country,
                superpower,
            } => format!("{} bends to the will of the {}", country.name, superpower.name()),
            WorldEventKind::CrisisErupted {
                crisis_id,
                subject,
                object,
                policy,
            } => format!(
                "Crisis #{}: {} objects to {} over {}",
                crisis_id,
                object.name,
                subject.name,
                policy.label()
            ),
            WorldEventKind::CrisisResolved {
                crisis_id,
                response,
            } => format!("Crisis #{} resolved after {}", crisis_id, response.label()),
            WorldEventKind::NuclearWar { cause } => format!("Nuclear war: {}", cause),
            WorldEventKind::Victory {
                winner,
                usa_score,
                ussr_score,
            } => format!(
                "{} prevails, {} to {}",
                winner.name(),
                usa_score.max(ussr_score),
                usa_score.min(ussr_score)
            ),
            WorldEventKind::Stalemate { score } => {
                format!("Stalemate: both superpowers end level at {}", score)
            }
        }
    }
}

#[derive(Debug, Clone, Resource)]
pub struct WorldEventLog {
    events: VecDeque<WorldEvent>,
    capacity: usize,
}

impl WorldEventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: WorldEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> Vec<WorldEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn of_year(&self, year: i64) -> impl Iterator<Item = &WorldEvent> {
        self.events.iter().filter(move |event| event.year == year)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for WorldEventLog {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stalemate(year: i64) -> WorldEvent {
        WorldEvent {
            year,
            kind: WorldEventKind::Stalemate { score: 0 },
        }
    }

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = WorldEventLog::new(3);
        for year in 1990..1995 {
            log.push(stalemate(year));
        }
        let years: Vec<i64> = log.snapshot().iter().map(|e| e.year).collect();
        assert_eq!(years, vec![1992, 1993, 1994]);
        assert_eq!(log.of_year(1993).count(), 1);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&stalemate(1997)).unwrap();
        assert!(json.contains("\"type\":\"stalemate\""));
    }
}
