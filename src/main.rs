use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, anyhow};
use tokio::sync::{Notify, watch};
use tracing::info;

use balance_of_power::simulation::{
    ColdWarSimulation, ObserverSnapshot, RandomOpponent, SimulationConfig, TurnOutcome,
};

/// Usage: `balance_of_power [config.toml] [save.json]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().map(PathBuf::from) {
        Some(path) => SimulationConfig::from_path(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let save_path = args.next().map(PathBuf::from);
    let pace = config.turn_interval();

    let observer = Arc::new(RwLock::new(ObserverSnapshot::default()));
    let shutdown_notify = Arc::new(Notify::new());
    let (outcome_tx, mut outcome_rx) = watch::channel(TurnOutcome::Continuing);

    // Nobody sits at the controls: the computer plays both superpowers.
    let mut simulation = ColdWarSimulation::with_observer(config, observer.clone());
    simulation.set_opponent(RandomOpponent::both_sides());

    let notify_for_simulation = shutdown_notify.clone();
    let simulation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(pace);
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let outcome = simulation.process_turn();
                    if outcome_tx.send(outcome).is_err() || outcome.is_terminal() {
                        break;
                    }
                },
                _ = notify_for_simulation.notified() => break,
            }
        }
        simulation
    });
    let ctrlc_notify = shutdown_notify.clone();
    let ctrl_c_task = tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        ctrlc_notify.notify_waiters();
    });

    while outcome_rx.changed().await.is_ok() {
        let outcome = *outcome_rx.borrow_and_update();
        let snapshot = observer
            .read()
            .map_err(|_| anyhow!("observer lock is poisoned"))?
            .clone();
        info!(
            year = snapshot.year,
            usa = snapshot.scores.usa,
            ussr = snapshot.scores.ussr,
            nastiness = snapshot.nastiness,
            usa_bloc = snapshot.leanings.usa,
            ussr_bloc = snapshot.leanings.ussr,
            crises = snapshot.active_crises.len(),
            "year closed"
        );
        if outcome.is_terminal() {
            break;
        }
    }

    let simulation = simulation_task.await.context("simulation task failed")?;
    ctrl_c_task.abort();

    let status = simulation.game_status();
    let stats = simulation.game_statistics();
    info!(
        outcome = ?status.outcome,
        year = status.year,
        turns = stats.turns_played,
        coups = stats.coups,
        revolutions = stats.revolutions,
        finlandizations = stats.finlandizations,
        peak_nastiness = stats.peak_nastiness,
        "simulation finished"
    );

    if let Some(path) = save_path {
        simulation
            .save(&path)
            .with_context(|| format!("saving game to {}", path.display()))?;
        info!(path = %path.display(), "game saved");
    }
    Ok(())
}
