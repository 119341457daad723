//! Runner Scene
//!
//! Turns runner state into draw commands. Pure: reads state, never
//! mutates it, so rendering can run at any rate independently of the
//! simulation.

use serde::Serialize;

use crate::core::geom::{Aabb, Vec2};
use crate::game::catalog::Catalog;
use crate::game::runner::{EntityKind, Runner, RunnerConfig};

/// Actor fill colour.
pub const ACTOR_COLOR: &str = "#4f46e5";

/// Glyph drawn for obstacles.
pub const OBSTACLE_GLYPH: &str = "⚠️";

/// Glyph drawn for a collectible whose item is unknown.
pub const FALLBACK_GLYPH: &str = "❓";

/// One drawing operation, in painter's order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Rect { bounds: Aabb, color: &'static str },
    Glyph { glyph: String, position: Vec2, size_px: f32 },
}

/// Build the frame for the current runner state.
pub fn build_scene(runner: &Runner, config: &RunnerConfig, catalog: &Catalog) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + runner.entity_count());

    commands.push(DrawCommand::Clear {
        width: config.width,
        height: config.height,
    });
    commands.push(DrawCommand::Rect {
        bounds: runner.actor.bounds(),
        color: ACTOR_COLOR,
    });

    for entity in runner.collectibles.iter().chain(&runner.obstacles) {
        let glyph = match entity.kind {
            EntityKind::Collectible => entity
                .item
                .and_then(|kind| catalog.item(kind))
                .map_or(FALLBACK_GLYPH, |item| item.emoji.as_str()),
            EntityKind::Obstacle => OBSTACLE_GLYPH,
        };

        commands.push(DrawCommand::Glyph {
            glyph: glyph.to_string(),
            position: entity.position,
            size_px: entity.size.y,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::ItemKind;
    use crate::game::runner::RunnerEntity;

    #[test]
    fn test_empty_field_draws_actor() {
        let config = RunnerConfig::default();
        let runner = Runner::new(&config);
        let scene = build_scene(&runner, &config, &Catalog::default());

        assert_eq!(scene.len(), 2);
        assert_eq!(
            scene[1],
            DrawCommand::Rect {
                bounds: Aabb::new(50.0, 300.0, 40.0, 40.0),
                color: ACTOR_COLOR,
            }
        );
    }

    #[test]
    fn test_actor_drawn_at_display_height() {
        let config = RunnerConfig::default();
        let mut runner = Runner::new(&config);
        runner.actor.y = 200.0;
        runner.actor.display_y = 250.0;

        let scene = build_scene(&runner, &config, &Catalog::default());
        match &scene[1] {
            DrawCommand::Rect { bounds, .. } => assert_eq!(bounds.origin.y, 250.0),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_entities_use_item_emoji() {
        let config = RunnerConfig::default();
        let mut runner = Runner::new(&config);
        runner.collectibles.push(RunnerEntity {
            id: 0,
            kind: EntityKind::Collectible,
            position: Vec2::new(400.0, 200.0),
            velocity_x: -300.0,
            size: Vec2::new(30.0, 30.0),
            item: Some(ItemKind::Carrot),
        });
        runner.obstacles.push(RunnerEntity {
            id: 1,
            kind: EntityKind::Obstacle,
            position: Vec2::new(600.0, 290.0),
            velocity_x: -300.0,
            size: Vec2::new(30.0, 40.0),
            item: None,
        });

        let scene = build_scene(&runner, &config, &Catalog::default());
        let glyphs: Vec<&str> = scene
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Glyph { glyph, .. } => Some(glyph.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(glyphs, vec!["🥕", OBSTACLE_GLYPH]);
    }
}
