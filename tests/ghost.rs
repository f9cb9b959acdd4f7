use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use minipac::constants::{GHOST_RADIUS, GHOST_SPEED, TILE};
use minipac::map::builder::Maze;
use minipac::map::direction::Direction;
use minipac::systems::components::{Collider, Position, Velocity};
use minipac::systems::ghost::{choose_direction, ghost_movement_system, open_directions, step_ghost};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use speculoos::prelude::*;

mod common;

const GHOST: Collider = Collider { radius: GHOST_RADIUS };

/// Yields zero forever: every chance roll succeeds and every random pick takes the first option.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

fn ghost_velocity(direction: Direction) -> Velocity {
    Velocity {
        direction: Some(direction),
        speed: GHOST_SPEED,
    }
}

#[test]
fn test_open_directions_in_corner() {
    let maze = common::corridor_maze();

    let open = open_directions(&maze, Vec2::new(40.0, 40.0), GHOST_SPEED, &GHOST);

    assert_eq!(open.as_slice(), &[Direction::Down, Direction::Right]);
}

#[test]
fn test_choose_direction_keeps_heading_when_enclosed() {
    let maze = Maze::from_board(&["###", "#.#", "###"], TILE).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut velocity = Velocity {
        direction: Some(Direction::Left),
        speed: 5.0,
    };

    choose_direction(&maze, common::tile(1, 1), &mut velocity, &GHOST, &mut rng);

    assert_eq!(velocity.direction, Some(Direction::Left));
}

#[test]
fn test_choose_direction_picks_open_direction() {
    let maze = common::corridor_maze();

    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut velocity = ghost_velocity(Direction::Up);
        choose_direction(&maze, Vec2::new(40.0, 40.0), &mut velocity, &GHOST, &mut rng);
        assert_that(&[Some(Direction::Down), Some(Direction::Right)].contains(&velocity.direction)).is_true();
    }
}

#[test]
fn test_step_ghost_moves_forward() {
    let maze = common::corridor_maze();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut velocity = ghost_velocity(Direction::Right);

    let next = step_ghost(&maze, common::tile(2, 1), &mut velocity, &GHOST, &mut rng);

    assert_eq!(next, common::tile(2, 1) + Vec2::new(GHOST_SPEED, 0.0));
}

#[test]
fn test_step_ghost_rerolls_while_moving_freely() {
    let maze = common::corridor_maze();
    let mut velocity = ghost_velocity(Direction::Right);

    let next = step_ghost(&maze, common::tile(4, 1), &mut velocity, &GHOST, &mut ZeroRng);

    // The step itself is taken, then the heading is re-rolled from the new spot
    assert_eq!(next, common::tile(4, 1) + Vec2::new(GHOST_SPEED, 0.0));
    let open = open_directions(&maze, next, GHOST_SPEED, &GHOST);
    assert_eq!(velocity.direction, open.first().copied());
    assert_that(&velocity.direction).is_not_equal_to(Some(Direction::Right));
}

#[test]
fn test_step_ghost_blocked_turns_in_place() {
    let maze = common::corridor_maze();

    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut velocity = ghost_velocity(Direction::Up);
        let start = Vec2::new(40.0, 39.0);

        let next = step_ghost(&maze, start, &mut velocity, &GHOST, &mut rng);

        assert_eq!(next, start);
        assert_that(&[Some(Direction::Down), Some(Direction::Right)].contains(&velocity.direction)).is_true();
    }
}

#[test]
fn test_step_ghost_wraps_through_tunnel() {
    let maze = common::corridor_maze();
    let mut rng = SmallRng::seed_from_u64(5);
    let row = common::tile(0, 3).y;
    let mut velocity = ghost_velocity(Direction::Left);

    let next = step_ghost(&maze, Vec2::new(1.0, row), &mut velocity, &GHOST, &mut rng);

    assert_eq!(next, Vec2::new(269.0, row));
}

#[test]
fn test_ghost_movement_system_never_enters_walls() {
    let mut world = common::create_test_world();
    let ghost = common::spawn_test_ghost(&mut world, 0, common::tile(1, 1), Direction::Right);

    for _ in 0..200 {
        world
            .run_system_once(ghost_movement_system)
            .expect("System should run successfully");
        let position = world.entity(ghost).get::<Position>().unwrap().0;
        let maze = world.resource::<Maze>();
        assert_that(&maze.collides(&GHOST.rect(position))).is_false();
    }
}
