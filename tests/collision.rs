use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use minipac::events::GameEvent;
use minipac::map::direction::Direction;
use minipac::systems::collision::{collision_system, pellet_rect};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_pellet_rect() {
    let rect = pellet_rect(Vec2::new(70.0, 42.0));
    assert_eq!(rect.min, Vec2::new(66.0, 38.0));
    assert_eq!(rect.size, Vec2::splat(8.0));
}

#[test]
fn test_collision_system_eats_overlapping_pellet() {
    let mut world = common::create_test_world();
    let start = common::tile(1, 1);
    common::spawn_test_player(&mut world, start);
    let pellet = common::spawn_test_pellet(&mut world, start + Vec2::new(14.9, 0.0));

    world.run_system_once(collision_system).expect("System should run successfully");

    assert_that(&world.get_entity(pellet).is_err()).is_true();
    assert_eq!(common::read_game_events(&mut world), vec![GameEvent::PelletEaten(pellet)]);
}

#[test]
fn test_collision_system_ignores_touching_pellet() {
    let mut world = common::create_test_world();
    let start = common::tile(1, 1);
    common::spawn_test_player(&mut world, start);
    let pellet = common::spawn_test_pellet(&mut world, start + Vec2::new(15.0, 0.0));

    world.run_system_once(collision_system).expect("System should run successfully");

    assert_that(&world.get_entity(pellet).is_ok()).is_true();
    assert_that(&common::read_game_events(&mut world)).is_empty();
}

#[test]
fn test_collision_system_reports_ghost_contact() {
    let mut world = common::create_test_world();
    let start = common::tile(1, 1);
    common::spawn_test_player(&mut world, start);
    let near = common::spawn_test_ghost(&mut world, 0, start + Vec2::new(20.0, 0.0), Direction::Left);
    common::spawn_test_ghost(&mut world, 1, start + Vec2::new(0.0, 21.0), Direction::Up);

    world.run_system_once(collision_system).expect("System should run successfully");

    // Ghosts are never despawned by a contact
    assert_that(&world.get_entity(near).is_ok()).is_true();
    assert_eq!(common::read_game_events(&mut world), vec![GameEvent::GhostContact(near)]);
}

#[test]
fn test_collision_system_reports_every_ghost() {
    let mut world = common::create_test_world();
    let start = common::tile(4, 1);
    common::spawn_test_player(&mut world, start);
    common::spawn_test_ghost(&mut world, 0, start + Vec2::new(10.0, 0.0), Direction::Left);
    common::spawn_test_ghost(&mut world, 1, start - Vec2::new(10.0, 0.0), Direction::Right);

    world.run_system_once(collision_system).expect("System should run successfully");

    let events = common::read_game_events(&mut world);
    assert_eq!(events.len(), 2);
    assert_that(&events.iter().all(|e| matches!(e, GameEvent::GhostContact(_)))).is_true();
}

#[test]
fn test_collision_system_without_player() {
    let mut world = common::create_test_world();
    let pellet = common::spawn_test_pellet(&mut world, common::tile(1, 1));

    world.run_system_once(collision_system).expect("System should run successfully");

    assert_that(&world.get_entity(pellet).is_ok()).is_true();
    assert_that(&common::read_game_events(&mut world)).is_empty();
}
