//! Drivers
//!
//! Everything that feeds intents into a [`Simulation`](crate::simulation::Simulation)
//! from outside: timers, a scripted player and external commands. Nothing
//! here is deterministic on its own; determinism comes from the recorded
//! intent log.
//!
//! - `headless`: synthetic time, runs as fast as possible
//! - `realtime`: tokio timers, external commands, shutdown signal
//! - `autopilot`: scripted player used by both

pub mod autopilot;
pub mod headless;
pub mod realtime;

pub use autopilot::Autopilot;
pub use headless::{run_headless, HeadlessRun};
pub use realtime::{DriverConfig, DriverExit, RealtimeDriver, ShutdownHandle};
