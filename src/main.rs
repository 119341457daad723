//! Zero Waste Kitchen
//!
//! Runs one game session with the scripted player, either headless on
//! synthetic time or against real timers, then replays the recorded intent
//! log and checks that the state hash matches.
//!
//! Usage: `zero-waste-kitchen [--realtime] [--manual] [--intent-log <path>]`
//!
//! `--manual` reads text commands from stdin instead of using the
//! autopilot (`start`, `buy rice`, `cook fried_rice`, `jump`, `shop`,
//! `kitchen`, `end`).

use anyhow::{bail, Context};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zero_waste::{
    driver::{run_headless, Autopilot, DriverConfig, RealtimeDriver},
    game::observer::{LoggingAudio, TracingObserver},
    replay_session, GameConfig, Intent, Simulation, VERSION,
};

#[derive(Debug, Default)]
struct Options {
    realtime: bool,
    manual: bool,
    intent_log: Option<PathBuf>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Options::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--realtime" => options.realtime = true,
                "--manual" => {
                    options.realtime = true;
                    options.manual = true;
                }
                "--intent-log" => {
                    let path = args.next().context("--intent-log needs a path")?;
                    options.intent_log = Some(PathBuf::from(path));
                }
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Options::parse(std::env::args().skip(1))?;
    let config = GameConfig::from_env().context("failed to load config")?;

    info!("Zero Waste Kitchen v{}", VERSION);
    info!(
        seed = config.seed,
        days = config.max_days,
        day_ms = config.day_duration_ms,
        "Session config"
    );

    let mut sim = Simulation::new(config.clone())?.with_observer(TracingObserver);
    sim.set_audio_sink(Box::new(LoggingAudio));
    sim.record_intents();

    let pilot = Autopilot::default();

    if options.realtime {
        run_realtime(&mut sim, &pilot, options.manual).await;
    } else {
        // Twice the nominal game length is plenty for the autopilot
        let max_ms = u64::from(config.day_duration_ms) * u64::from(config.max_days) * 2;
        run_headless(&mut sim, &pilot, max_ms);
    }

    // Print final results
    let hash = sim.state_hash();
    info!("=== Session Results ===");
    match sim.final_results() {
        Some(results) => info!(
            days = results.days_played,
            money = results.final_money,
            waste_score = results.waste_score,
            final_score = results.final_score,
            "Final results"
        ),
        None => warn!(day = sim.state().day, "Session stopped before the last day closed"),
    }
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let intents = sim.recorded_intents();
    let (replayed, events) = replay_session(&config, intents)?;
    let replay_hash = replayed.compute_hash();
    info!(intents = intents.len(), events = events.len(), "Replayed intent log");
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if let Some(path) = &options.intent_log {
        let json = serde_json::to_string_pretty(intents)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write intent log to {}", path.display()))?;
        info!(path = %path.display(), "Intent log written");
    }

    if hash != replay_hash {
        bail!("replay diverged from the live session");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}

async fn run_realtime(sim: &mut Simulation, pilot: &Autopilot, manual: bool) {
    let driver = RealtimeDriver::new(DriverConfig::from_game(sim.config()));
    let (tx, mut rx) = mpsc::channel(64);

    if manual {
        info!("Reading commands from stdin (Ctrl-D to stop)");
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match Intent::parse_command(line) {
                    Some(intent) => {
                        if tx.send(intent).await.is_err() {
                            break;
                        }
                    }
                    None => warn!(%line, "Unknown command"),
                }
            }
        });
    } else {
        drop(tx);
    }

    let handle = driver.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            handle.trigger();
        }
    });

    let autopilot = (!manual).then_some(pilot);
    let exit = driver.run(sim, &mut rx, autopilot).await;
    info!(?exit, "Real-time session ended");
}
