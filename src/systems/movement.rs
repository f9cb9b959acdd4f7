use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res};
use glam::Vec2;

use crate::constants::turn_tolerance;
use crate::map::builder::Maze;
use crate::map::direction::Direction;
use crate::systems::components::{BufferedDirection, Collider, PlayerControlled, Position, Velocity};

/// Returns true if `position` is close enough to the center of its tile, on both axes, to change direction.
pub fn can_turn(position: Vec2, tile_size: f32) -> bool {
    let tolerance = turn_tolerance(tile_size);
    let offset = position.rem_euclid(Vec2::splat(tile_size)) - Vec2::splat(tile_size / 2.0);
    offset.x.abs() < tolerance && offset.y.abs() < tolerance
}

/// Wraps a horizontal coordinate that left the board onto the opposite edge.
///
/// Leaving past the left edge lands `radius` inside the right edge, and the other way around.
pub fn wrap_horizontal(x: f32, radius: f32, width: f32) -> f32 {
    if x < 0.0 {
        width - radius
    } else if x > width {
        radius
    } else {
        x
    }
}

/// Advances the player by one tick and returns its new center.
///
/// The buffered direction is taken only near a tile center and only if one step that way is free.
/// The step itself is discarded whole when it would end inside a wall.
pub fn step_player(
    maze: &Maze,
    position: Vec2,
    velocity: &mut Velocity,
    buffered: Option<Direction>,
    collider: &Collider,
) -> Vec2 {
    if let Some(next) = buffered {
        if can_turn(position, maze.tile_size) {
            let trial = position + next.as_vec2() * velocity.speed;
            if !maze.collides(&collider.rect(trial)) {
                velocity.direction = Some(next);
            }
        }
    }

    let Some(direction) = velocity.direction else {
        return position;
    };

    let mut candidate = position + direction.as_vec2() * velocity.speed;
    candidate.x = wrap_horizontal(candidate.x, collider.radius, maze.width_px());
    candidate.y = candidate.y.min(maze.height_px() - collider.radius).max(collider.radius);

    if maze.collides(&collider.rect(candidate)) {
        position
    } else {
        candidate
    }
}

pub fn player_movement_system(
    maze: Res<Maze>,
    mut players: Query<(&mut Position, &mut Velocity, &BufferedDirection, &Collider), With<PlayerControlled>>,
) {
    for (mut position, mut velocity, buffered, collider) in players.iter_mut() {
        let next = step_player(&maze, position.0, &mut velocity, buffered.0, collider);
        if next != position.0 {
            position.0 = next;
        }
    }
}
