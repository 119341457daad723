//! Headless Driver
//!
//! Steps synthetic time instead of waiting on timers. Clock ticks and
//! frames are interleaved exactly as the real-time driver would see them,
//! so a headless session and a real-time one produce the same kind of
//! intent log.

use tracing::{debug, info};

use crate::driver::autopilot::Autopilot;
use crate::game::intent::Intent;
use crate::simulation::Simulation;

/// Counters from a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessRun {
    pub frames: u64,
    pub clock_ticks: u64,
    /// Synthetic time at which the run stopped
    pub elapsed_ms: u64,
}

/// Drive `sim` with the autopilot until the game finishes or `max_ms` of
/// synthetic time has passed.
///
/// When a clock tick and a frame fall on the same instant the clock tick
/// is queued first.
pub fn run_headless(sim: &mut Simulation, pilot: &Autopilot, max_ms: u64) -> HeadlessRun {
    let clock_ms = u64::from(sim.config().clock_tick_ms);
    let frame_ms = u64::from(sim.config().frame_interval_ms);

    let mut run = HeadlessRun::default();
    let mut next_clock = clock_ms;
    let mut next_frame = frame_ms;

    decide(sim, pilot);

    while !sim.is_finished() {
        let now = next_clock.min(next_frame);
        if now > max_ms {
            debug!(max_ms, "Headless run hit its time limit");
            break;
        }
        run.elapsed_ms = now;

        if now == next_clock {
            sim.submit(Intent::ClockTick);
            next_clock += clock_ms;
            run.clock_ticks += 1;
        }
        if now == next_frame {
            sim.submit(Intent::Frame { now_ms: now as f64 });
            next_frame += frame_ms;
            run.frames += 1;
        }
        sim.pump();

        decide(sim, pilot);
    }

    info!(
        frames = run.frames,
        clock_ticks = run.clock_ticks,
        elapsed_ms = run.elapsed_ms,
        finished = sim.is_finished(),
        "Headless run complete"
    );
    run
}

fn decide(sim: &mut Simulation, pilot: &Autopilot) {
    if let Some(intent) = pilot.decide(sim.state(), sim.config()) {
        sim.submit(intent);
        sim.pump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::state::GamePhase;

    fn short_config() -> GameConfig {
        GameConfig {
            max_days: 2,
            day_duration_ms: 20_000,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_runs_game_to_completion() {
        let mut sim = Simulation::new(short_config()).unwrap();
        let run = run_headless(&mut sim, &Autopilot::default(), 120_000);

        assert_eq!(sim.state().phase, GamePhase::Finished);
        assert_eq!(sim.final_results().unwrap().days_played, 2);
        // Two days of at most 200 ticks; obstacle hits only shorten them
        assert!(run.clock_ticks <= 400);
        assert!(run.frames > 0);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let mut sim = Simulation::new(GameConfig::default()).unwrap();
        let run = run_headless(&mut sim, &Autopilot::default(), 1_000);

        assert!(!sim.is_finished());
        assert_eq!(run.clock_ticks, 10);
        assert!(run.elapsed_ms <= 1_000);
    }

    #[test]
    fn test_headless_runs_are_reproducible() {
        let mut first = Simulation::new(short_config()).unwrap();
        let mut second = Simulation::new(short_config()).unwrap();

        run_headless(&mut first, &Autopilot::default(), 120_000);
        run_headless(&mut second, &Autopilot::default(), 120_000);

        assert_eq!(first.state_hash(), second.state_hash());
    }
}
