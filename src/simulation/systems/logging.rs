//! Colorized year summary for quick CLI scanning.

use bevy_ecs::prelude::*;
use colored::{Color, Colorize};
use tracing::info;

use crate::simulation::{
    Sentiment, Superpower, TurnClock, TurnOutcome, WorldEvent, WorldEventLog, WorldState,
};

fn badge(label: &str, color: Color) -> String {
    format!("[{}]", label).color(color).to_string()
}

fn category_color(category: &str) -> Color {
    match category {
        "Policy" => Color::BrightCyan,
        "Upheaval" => Color::BrightMagenta,
        "Influence" => Color::BrightBlue,
        "Crisis" => Color::Yellow,
        "War" => Color::BrightRed,
        "Verdict" => Color::BrightGreen,
        _ => Color::White,
    }
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::BrightGreen,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::BrightRed,
    }
}

fn tension_color(nastiness: i64) -> Color {
    match nastiness {
        i64::MIN..=31 => Color::Green,
        32..=63 => Color::Yellow,
        64..=99 => Color::BrightYellow,
        _ => Color::BrightRed,
    }
}

fn outcome_badge(outcome: TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Continuing => badge("Cold War", Color::BrightBlack),
        TurnOutcome::Win(winner) => badge(&format!("{} wins", winner.name()), winner.logging_color()),
        TurnOutcome::Tie => badge("Stalemate", Color::Yellow),
        TurnOutcome::NuclearWar => badge("NUCLEAR WAR", Color::BrightRed),
    }
}

fn format_event_line(event: &WorldEvent) -> String {
    let category = event.category();
    format!(
        "{} {} {} {}",
        badge(category, category_color(category)),
        badge(&format!("{:?}", event.sentiment()), sentiment_color(event.sentiment())),
        badge(&event.year.to_string(), Color::BrightBlack),
        event.headline()
    )
}

pub fn turn_report_system(
    world: Res<WorldState>,
    clock: Res<TurnClock>,
    events: Res<WorldEventLog>,
) {
    let globals = &world.globals;
    let score_badge = |superpower: Superpower| {
        badge(
            &format!("{} {}", superpower.name(), globals.scores.get(superpower)),
            superpower.logging_color(),
        )
    };
    let header_line = format!(
        "{} {} {} {} {}",
        badge(&globals.year.to_string(), Color::BrightWhite),
        score_badge(Superpower::Usa),
        score_badge(Superpower::Ussr),
        badge(
            &format!("Tension {}", globals.nastiness),
            tension_color(globals.nastiness)
        ),
        outcome_badge(globals.outcome()),
    );

    let mut lines = vec![header_line];
    let mut this_year: Vec<&WorldEvent> = events.of_year(globals.year).collect();
    // Headline news first: verdicts and upheavals before routine policy moves.
    this_year.sort_by_key(|event| event.category() == "Policy");
    lines.extend(this_year.into_iter().take(4).map(format_event_line));

    if lines.len() == 1 {
        lines.push(
            "[Event] Nothing newsworthy this year"
                .color(Color::BrightBlack)
                .to_string(),
        );
    }

    info!(turn = clock.turns_played, "\n{}", lines.join("\n"));
}
