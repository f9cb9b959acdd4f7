use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::GHOST_TURN_CHANCE;
use crate::map::builder::Maze;
use crate::map::direction::Direction;
use crate::systems::components::{Collider, GameRng, Ghost, Position, Velocity};
use crate::systems::movement::wrap_horizontal;

/// Directions a ghost could head in from `position`.
///
/// A direction counts as open when the ghost's box, pushed two steps that way, stays clear of every wall.
pub fn open_directions(maze: &Maze, position: Vec2, speed: f32, collider: &Collider) -> SmallVec<[Direction; 4]> {
    Direction::DIRECTIONS
        .iter()
        .copied()
        .filter(|direction| {
            let probe = position + direction.as_vec2() * speed * 2.0;
            !maze.collides(&collider.rect(probe))
        })
        .collect()
}

/// Picks a new random heading among the open directions, keeping the current one if none is open.
pub fn choose_direction<R: Rng + ?Sized>(
    maze: &Maze,
    position: Vec2,
    velocity: &mut Velocity,
    collider: &Collider,
    rng: &mut R,
) {
    let options = open_directions(maze, position, velocity.speed, collider);
    if let Some(direction) = options.as_slice().choose(rng) {
        velocity.direction = Some(*direction);
    }
}

/// Advances a ghost by one tick and returns its new center.
///
/// A blocked ghost stays put and picks a new heading. Independently of that, a ghost
/// re-rolls its heading with a small chance every tick.
pub fn step_ghost<R: Rng + ?Sized>(
    maze: &Maze,
    position: Vec2,
    velocity: &mut Velocity,
    collider: &Collider,
    rng: &mut R,
) -> Vec2 {
    let mut position = position;
    let direction = velocity.direction.unwrap_or_default();
    let candidate = position + direction.as_vec2() * velocity.speed;

    if maze.collides(&collider.rect(candidate)) {
        choose_direction(maze, position, velocity, collider, rng);
    } else {
        position = candidate;
        position.x = wrap_horizontal(position.x, collider.radius, maze.width_px());
    }

    if rng.random_bool(GHOST_TURN_CHANCE) {
        choose_direction(maze, position, velocity, collider, rng);
    }

    position
}

/// Wandering movement for every ghost.
pub fn ghost_movement_system(
    maze: Res<Maze>,
    mut rng: ResMut<GameRng>,
    mut ghosts: Query<(&Ghost, &mut Position, &mut Velocity, &Collider), With<Ghost>>,
) {
    for (ghost, mut position, mut velocity, collider) in ghosts.iter_mut() {
        let before = velocity.direction;
        position.0 = step_ghost(&maze, position.0, &mut velocity, collider, &mut rng.0);
        if velocity.direction != before {
            trace!(ghost = ghost.index, direction = ?velocity.direction, "Ghost changed direction");
        }
    }
}
