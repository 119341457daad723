//! Runner Physics Loop
//!
//! The supermarket side-game: one actor under gravity, two streams of
//! scrolling entities (collectibles and obstacles). Stepped once per
//! rendered frame with a capped, variable timestep.
//!
//! All randomness comes from the game's `DeterministicRng`, so a recorded
//! sequence of frame timestamps replays identically.

use serde::{Serialize, Deserialize};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::geom::{lerp, Aabb, Vec2};
use crate::core::rng::DeterministicRng;
use crate::game::catalog::{ItemKind, ShopItem};
use crate::game::collision::{check_all_entity_collisions, is_off_screen};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Runner tuning. Distances in pixels, times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub width: f32,
    pub height: f32,
    /// Ground line sits this far above the bottom edge
    pub ground_offset: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub base_speed: f32,
    /// Display smoothing rate (per second)
    pub smoothing: f32,
    /// Frame delta cap
    pub max_frame_dt: f32,
    pub collectible_interval: f32,
    pub obstacle_interval: f32,
    pub actor_x: f32,
    pub actor_size: Vec2,
    pub collectible_size: f32,
    /// Collectibles spawn centred this far above the ground...
    pub collectible_lift: f32,
    /// ...give or take this much
    pub collectible_jitter: f32,
    /// Speed factor range `[min, max)` for collectibles
    pub collectible_speed_factor: [f32; 2],
    pub obstacle_size: Vec2,
    pub obstacle_lift: f32,
    pub obstacle_speed_factor: [f32; 2],
    /// Entities spawn this far past the right edge
    pub spawn_margin: f32,
    /// Entities are dropped this far past the left edge
    pub despawn_margin: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 350.0,
            ground_offset: 50.0,
            gravity: 3000.0,
            jump_speed: 900.0,
            base_speed: 300.0,
            smoothing: 30.0,
            max_frame_dt: 0.05,
            collectible_interval: 1.6,
            obstacle_interval: 3.0,
            actor_x: 50.0,
            actor_size: Vec2::new(40.0, 40.0),
            collectible_size: 30.0,
            collectible_lift: 100.0,
            collectible_jitter: 30.0,
            collectible_speed_factor: [0.9, 1.2],
            obstacle_size: Vec2::new(30.0, 40.0),
            obstacle_lift: 10.0,
            obstacle_speed_factor: [0.95, 1.15],
            spawn_margin: 20.0,
            despawn_margin: 50.0,
        }
    }
}

impl RunnerConfig {
    /// Resting height of the actor's top edge.
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_offset
    }
}

// =============================================================================
// STATE TYPES
// =============================================================================

/// Runner loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunnerPhase {
    #[default]
    Stopped,
    Running,
}

/// The controllable actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    /// Physics height (top edge)
    pub y: f32,
    pub vy: f32,
    /// Smoothed height used for drawing and collision
    pub display_y: f32,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Actor {
    fn grounded(config: &RunnerConfig) -> Self {
        let ground = config.ground_y();
        Self {
            x: config.actor_x,
            y: ground,
            vy: 0.0,
            display_y: ground,
            size: config.actor_size,
            on_ground: true,
        }
    }

    /// Collision box at the display height.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.display_y, self.size.x, self.size.y)
    }
}

/// Entity stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Collectible,
    Obstacle,
}

/// A scrolling entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunnerEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub position: Vec2,
    pub velocity_x: f32,
    pub size: Vec2,
    /// Item granted on pickup (collectibles only)
    pub item: Option<ItemKind>,
}

impl RunnerEntity {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }
}

/// Why an entity left the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Collectible touched the actor
    Collected,
    /// Obstacle touched the actor
    Hit,
    /// Scrolled off the left edge
    OffScreen,
}

/// Something that happened during a runner step.
#[derive(Clone, Debug, PartialEq)]
pub enum RunnerOutcome {
    Spawned(RunnerEntity),
    Removed {
        entity: RunnerEntity,
        reason: RemovalReason,
    },
}

// =============================================================================
// RUNNER
// =============================================================================

/// Runner side-game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub phase: RunnerPhase,
    pub actor: Actor,
    pub collectibles: Vec<RunnerEntity>,
    pub obstacles: Vec<RunnerEntity>,
    /// Seconds since the last collectible spawn
    pub collectible_timer: f32,
    /// Seconds since the last obstacle spawn
    pub obstacle_timer: f32,
    /// Timestamp of the previous frame; `None` until the first frame
    pub last_frame_ms: Option<f64>,
    next_entity_id: u32,
}

impl Runner {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            phase: RunnerPhase::Stopped,
            actor: Actor::grounded(config),
            collectibles: Vec::new(),
            obstacles: Vec::new(),
            collectible_timer: 0.0,
            obstacle_timer: 0.0,
            last_frame_ms: None,
            next_entity_id: 0,
        }
    }

    /// Put the actor back on the ground and clear the field.
    ///
    /// Entity ids keep counting so they stay unique across visits.
    pub fn reset(&mut self, config: &RunnerConfig) {
        self.actor = Actor::grounded(config);
        self.collectibles.clear();
        self.obstacles.clear();
        self.collectible_timer = 0.0;
        self.obstacle_timer = 0.0;
        self.last_frame_ms = None;
    }

    /// Start the loop. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.phase == RunnerPhase::Running {
            return false;
        }
        self.phase = RunnerPhase::Running;
        self.last_frame_ms = None;
        true
    }

    /// Stop the loop. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.phase == RunnerPhase::Stopped {
            return false;
        }
        self.phase = RunnerPhase::Stopped;
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunnerPhase::Running
    }

    /// Jump if running and grounded. Returns whether the jump happened.
    pub fn jump(&mut self, config: &RunnerConfig) -> bool {
        if !self.is_running() || !self.actor.on_ground {
            return false;
        }
        self.actor.vy = -config.jump_speed;
        self.actor.on_ground = false;
        true
    }

    /// Seconds since the previous frame, capped. The first frame is 0.
    pub fn frame_delta(&mut self, now_ms: f64, config: &RunnerConfig) -> f32 {
        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        dt.min(config.max_frame_dt)
    }

    /// Live entity count.
    pub fn entity_count(&self) -> usize {
        self.collectibles.len() + self.obstacles.len()
    }

    /// Advance one frame.
    ///
    /// Order: actor physics, spawning, then collectibles and obstacles move
    /// and resolve. Does nothing while stopped.
    pub fn step(
        &mut self,
        dt: f32,
        config: &RunnerConfig,
        rng: &mut DeterministicRng,
        items: &[ShopItem],
    ) -> Vec<RunnerOutcome> {
        let mut outcomes = Vec::new();
        if !self.is_running() {
            return outcomes;
        }

        self.update_actor(dt, config);
        self.spawn_entities(dt, config, rng, items, &mut outcomes);

        let actor = self.actor.bounds();
        advance_entities(
            &mut self.collectibles,
            &actor,
            dt,
            config.despawn_margin,
            RemovalReason::Collected,
            &mut outcomes,
        );
        advance_entities(
            &mut self.obstacles,
            &actor,
            dt,
            config.despawn_margin,
            RemovalReason::Hit,
            &mut outcomes,
        );

        #[cfg(feature = "debug-tracing")]
        trace!(
            dt,
            y = self.actor.y,
            display_y = self.actor.display_y,
            entities = self.entity_count(),
            "Runner frame"
        );

        outcomes
    }

    fn update_actor(&mut self, dt: f32, config: &RunnerConfig) {
        let actor = &mut self.actor;
        let ground = config.ground_y();

        actor.vy += config.gravity * dt;
        actor.y += actor.vy * dt;

        if actor.y > ground {
            actor.y = ground;
            actor.vy = 0.0;
            actor.on_ground = true;
        }

        actor.display_y = lerp(actor.display_y, actor.y, (config.smoothing * dt).min(1.0));
    }

    fn spawn_entities(
        &mut self,
        dt: f32,
        config: &RunnerConfig,
        rng: &mut DeterministicRng,
        items: &[ShopItem],
        outcomes: &mut Vec<RunnerOutcome>,
    ) {
        let ground = config.ground_y();
        let spawn_x = config.width + config.spawn_margin;

        self.collectible_timer += dt;
        self.obstacle_timer += dt;

        if self.collectible_timer >= config.collectible_interval {
            self.collectible_timer = 0.0;

            let item = rng.choose(items).map(|item| item.kind);
            let jitter = rng.next_f32_range(-config.collectible_jitter, config.collectible_jitter);
            let [min, max] = config.collectible_speed_factor;
            let factor = rng.next_f32_range(min, max);

            let entity = RunnerEntity {
                id: self.allocate_id(),
                kind: EntityKind::Collectible,
                position: Vec2::new(spawn_x, ground - config.collectible_lift + jitter),
                velocity_x: -config.base_speed * factor,
                size: Vec2::new(config.collectible_size, config.collectible_size),
                item,
            };
            outcomes.push(RunnerOutcome::Spawned(entity.clone()));
            self.collectibles.push(entity);
        }

        if self.obstacle_timer >= config.obstacle_interval {
            self.obstacle_timer = 0.0;

            let [min, max] = config.obstacle_speed_factor;
            let factor = rng.next_f32_range(min, max);

            let entity = RunnerEntity {
                id: self.allocate_id(),
                kind: EntityKind::Obstacle,
                position: Vec2::new(spawn_x, ground - config.obstacle_lift),
                velocity_x: -config.base_speed * factor,
                size: config.obstacle_size,
                item: None,
            };
            outcomes.push(RunnerOutcome::Spawned(entity.clone()));
            self.obstacles.push(entity);
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }
}

/// Move a stream, then drop entities that touched the actor or left the field.
fn advance_entities(
    entities: &mut Vec<RunnerEntity>,
    actor: &Aabb,
    dt: f32,
    despawn_margin: f32,
    contact: RemovalReason,
    outcomes: &mut Vec<RunnerOutcome>,
) {
    for entity in entities.iter_mut() {
        entity.position.x += entity.velocity_x * dt;
    }

    let touched = check_all_entity_collisions(actor, entities);

    let mut kept = Vec::with_capacity(entities.len());
    for entity in entities.drain(..) {
        if touched.contains(&entity.id) {
            outcomes.push(RunnerOutcome::Removed { entity, reason: contact });
        } else if is_off_screen(&entity, despawn_margin) {
            outcomes.push(RunnerOutcome::Removed { entity, reason: RemovalReason::OffScreen });
        } else {
            kept.push(entity);
        }
    }
    *entities = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::Catalog;

    fn running(config: &RunnerConfig) -> Runner {
        let mut runner = Runner::new(config);
        runner.start();
        runner
    }

    #[test]
    fn test_start_stop_idempotent() {
        let config = RunnerConfig::default();
        let mut runner = Runner::new(&config);
        assert!(runner.start());
        assert!(!runner.start());
        assert!(runner.stop());
        assert!(!runner.stop());
    }

    #[test]
    fn test_frame_delta_first_frame_and_cap() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);

        assert_eq!(runner.frame_delta(1_000.0, &config), 0.0);
        assert!((runner.frame_delta(1_016.0, &config) - 0.016).abs() < 1e-6);
        // Long stall is capped
        assert_eq!(runner.frame_delta(3_000.0, &config), 0.05);
        // Clock going backwards is treated as no time
        assert_eq!(runner.frame_delta(2_000.0, &config), 0.0);
    }

    #[test]
    fn test_jump_requires_running_and_ground() {
        let config = RunnerConfig::default();
        let mut runner = Runner::new(&config);
        assert!(!runner.jump(&config));

        runner.start();
        assert!(runner.jump(&config));
        assert!(!runner.actor.on_ground);
        assert_eq!(runner.actor.vy, -900.0);

        // No double jump
        assert!(!runner.jump(&config));
    }

    #[test]
    fn test_jump_arc_lands_on_ground() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);
        let mut rng = DeterministicRng::new(1);
        let items = Catalog::default().items;

        runner.jump(&config);
        let mut peak = config.ground_y();
        for _ in 0..60 {
            runner.step(0.016, &config, &mut rng, &items);
            assert!(runner.actor.y <= config.ground_y());
            peak = peak.min(runner.actor.y);
        }

        assert!(runner.actor.on_ground);
        assert_eq!(runner.actor.y, config.ground_y());
        assert!(config.ground_y() - peak > 100.0, "peak too low: {peak}");
    }

    #[test]
    fn test_spawn_intervals() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);
        let mut rng = DeterministicRng::new(7);
        let items = Catalog::default().items;

        let mut collectibles = 0;
        let mut obstacles = 0;
        // 3.5 seconds in 50ms steps
        for _ in 0..70 {
            for outcome in runner.step(0.05, &config, &mut rng, &items) {
                if let RunnerOutcome::Spawned(entity) = outcome {
                    match entity.kind {
                        EntityKind::Collectible => {
                            collectibles += 1;
                            assert!(entity.item.is_some());
                            let ground = config.ground_y();
                            assert!(entity.position.y >= ground - 130.0);
                            assert!(entity.position.y <= ground - 70.0);
                        }
                        EntityKind::Obstacle => {
                            obstacles += 1;
                            assert_eq!(entity.position.y, config.ground_y() - 10.0);
                        }
                    }
                    assert_eq!(entity.position.x, 820.0);
                    assert!(entity.velocity_x < 0.0);
                }
            }
        }

        assert_eq!(collectibles, 2);
        assert_eq!(obstacles, 1);
    }

    #[test]
    fn test_grounded_actor_hits_obstacle() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);
        let mut rng = DeterministicRng::new(3);

        runner.obstacles.push(RunnerEntity {
            id: 99,
            kind: EntityKind::Obstacle,
            position: Vec2::new(95.0, config.ground_y() - 10.0),
            velocity_x: -300.0,
            size: config.obstacle_size,
            item: None,
        });

        let outcomes = runner.step(0.05, &config, &mut rng, &[]);
        assert!(outcomes.iter().any(|outcome| matches!(
            outcome,
            RunnerOutcome::Removed { entity, reason: RemovalReason::Hit } if entity.id == 99
        )));
        assert!(runner.obstacles.is_empty());
    }

    #[test]
    fn test_off_screen_removed_same_frame() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);
        let mut rng = DeterministicRng::new(3);

        runner.collectibles.push(RunnerEntity {
            id: 5,
            kind: EntityKind::Collectible,
            position: Vec2::new(-75.0, 100.0),
            velocity_x: -300.0,
            size: Vec2::new(30.0, 30.0),
            item: Some(ItemKind::Egg),
        });

        let outcomes = runner.step(0.05, &config, &mut rng, &[]);
        assert!(matches!(
            outcomes.as_slice(),
            [RunnerOutcome::Removed { reason: RemovalReason::OffScreen, .. }]
        ));
        assert_eq!(runner.entity_count(), 0);
    }

    #[test]
    fn test_stopped_runner_does_not_step() {
        let config = RunnerConfig::default();
        let mut runner = Runner::new(&config);
        let mut rng = DeterministicRng::new(3);
        let before = runner.clone();

        assert!(runner.step(0.05, &config, &mut rng, &[]).is_empty());
        assert_eq!(runner, before);
    }

    #[test]
    fn test_reset_keeps_id_counter() {
        let config = RunnerConfig::default();
        let mut runner = running(&config);
        let mut rng = DeterministicRng::new(3);
        let items = Catalog::default().items;

        for _ in 0..40 {
            runner.step(0.05, &config, &mut rng, &items);
        }
        let spawned = runner.next_entity_id;
        assert!(spawned > 0);

        runner.reset(&config);
        assert_eq!(runner.entity_count(), 0);
        assert_eq!(runner.actor.y, config.ground_y());
        assert_eq!(runner.next_entity_id, spawned);
    }
}
