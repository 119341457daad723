//! Collision Detection
//!
//! Box tests between the runner actor and entities. The actor box sits at
//! its smoothed display height, so what is drawn is what collides.

use crate::core::geom::Aabb;
use crate::game::runner::RunnerEntity;

/// Does the entity touch the actor? Strict overlap; touching edges miss.
#[inline]
pub fn check_entity_collision(actor: &Aabb, entity: &RunnerEntity) -> bool {
    actor.overlaps(&entity.bounds())
}

/// Has the entity scrolled fully past the left edge plus margin?
#[inline]
pub fn is_off_screen(entity: &RunnerEntity, despawn_margin: f32) -> bool {
    entity.position.x + entity.size.x < -despawn_margin
}

/// Ids of all entities overlapping the actor, in list order.
pub fn check_all_entity_collisions(actor: &Aabb, entities: &[RunnerEntity]) -> Vec<u32> {
    entities
        .iter()
        .filter(|entity| check_entity_collision(actor, entity))
        .map(|entity| entity.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geom::Vec2;
    use crate::game::runner::EntityKind;

    fn obstacle(id: u32, x: f32, y: f32) -> RunnerEntity {
        RunnerEntity {
            id,
            kind: EntityKind::Obstacle,
            position: Vec2::new(x, y),
            velocity_x: -300.0,
            size: Vec2::new(30.0, 40.0),
            item: None,
        }
    }

    #[test]
    fn test_grounded_actor_hits_obstacle() {
        // Actor on the ground of a 350px field; obstacle sits 10px above ground
        let actor = Aabb::new(50.0, 300.0, 40.0, 40.0);
        assert!(check_entity_collision(&actor, &obstacle(0, 70.0, 290.0)));
    }

    #[test]
    fn test_jumping_actor_clears_obstacle() {
        let actor = Aabb::new(50.0, 240.0, 40.0, 40.0);
        assert!(!check_entity_collision(&actor, &obstacle(0, 70.0, 290.0)));
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        let actor = Aabb::new(50.0, 300.0, 40.0, 40.0);
        // Obstacle starts exactly at the actor's right edge
        assert!(!check_entity_collision(&actor, &obstacle(0, 90.0, 290.0)));
    }

    #[test]
    fn test_off_screen_boundary() {
        // x + width == -50 is still on screen
        assert!(!is_off_screen(&obstacle(0, -80.0, 290.0), 50.0));
        assert!(is_off_screen(&obstacle(0, -80.5, 290.0), 50.0));
    }

    #[test]
    fn test_all_collisions_in_list_order() {
        let actor = Aabb::new(50.0, 300.0, 40.0, 40.0);
        let entities = vec![
            obstacle(4, 60.0, 290.0),
            obstacle(5, 500.0, 290.0),
            obstacle(6, 40.0, 290.0),
        ];
        assert_eq!(check_all_entity_collisions(&actor, &entities), vec![4, 6]);
    }
}
