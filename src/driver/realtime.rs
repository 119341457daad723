//! Real-Time Driver
//!
//! Runs a simulation against wall-clock timers. The day clock and the
//! frame timer are independent tokio intervals; external commands arrive
//! over an mpsc channel. Everything is funnelled into the simulation's
//! intent queue from a single task, so no locking is needed.

use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::config::GameConfig;
use crate::driver::autopilot::Autopilot;
use crate::game::intent::Intent;
use crate::simulation::Simulation;

/// Timer periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub clock_tick: Duration,
    pub frame_interval: Duration,
}

impl DriverConfig {
    pub fn from_game(config: &GameConfig) -> Self {
        Self {
            clock_tick: Duration::from_millis(u64::from(config.clock_tick_ms)),
            frame_interval: Duration::from_millis(u64::from(config.frame_interval_ms)),
        }
    }
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverExit {
    /// The final day closed
    Finished,
    /// The command channel closed with nobody else driving the game
    CommandsClosed,
    /// Shutdown was requested
    Shutdown,
}

/// Cloneable trigger for stopping a running driver from another task.
#[derive(Clone, Debug)]
pub struct ShutdownHandle(broadcast::Sender<()>);

impl ShutdownHandle {
    pub fn trigger(&self) {
        let _ = self.0.send(());
    }
}

/// The real-time driver.
pub struct RealtimeDriver {
    config: DriverConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl RealtimeDriver {
    pub fn new(config: DriverConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { config, shutdown_tx }
    }

    /// Stop a running `run`.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown_tx.clone())
    }

    /// Drive `sim` until the game finishes, shutdown is requested, or the
    /// command channel closes without an autopilot.
    ///
    /// With an autopilot the game keeps running after the channel closes.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        sim: &mut Simulation,
        commands: &mut mpsc::Receiver<Intent>,
        autopilot: Option<&Autopilot>,
    ) -> DriverExit {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let start = Instant::now();
        let mut clock = interval_at(start + self.config.clock_tick, self.config.clock_tick);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames = interval_at(start + self.config.frame_interval, self.config.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut commands_open = true;

        info!(
            clock_tick_ms = self.config.clock_tick.as_millis() as u64,
            frame_ms = self.config.frame_interval.as_millis() as u64,
            autopilot = autopilot.is_some(),
            "Driver started"
        );

        let exit = loop {
            if sim.is_finished() {
                break DriverExit::Finished;
            }

            if let Some(pilot) = autopilot {
                if let Some(intent) = pilot.decide(sim.state(), sim.config()) {
                    sim.submit(intent);
                    sim.pump();
                }
            }

            tokio::select! {
                biased;

                _ = shutdown_rx.recv() => break DriverExit::Shutdown,

                _ = clock.tick() => sim.submit(Intent::ClockTick),

                command = commands.recv(), if commands_open => match command {
                    Some(intent) => {
                        debug!(%intent, "Command received");
                        sim.submit(intent);
                    }
                    None if autopilot.is_none() => break DriverExit::CommandsClosed,
                    None => {
                        debug!("Command channel closed, autopilot continues");
                        commands_open = false;
                    }
                },

                now = frames.tick() => {
                    let now_ms = now.duration_since(start).as_secs_f64() * 1000.0;
                    sim.submit(Intent::Frame { now_ms });
                }
            }

            sim.pump();
        };

        info!(?exit, day = sim.state().day, "Driver stopped");
        exit
    }
}
