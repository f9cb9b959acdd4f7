use bevy_ecs::system::RunSystemOnce;
use minipac::map::builder::Maze;
use minipac::map::direction::Direction;
use minipac::scene::{Banner, Glyph, Scene};
use minipac::systems::components::{PauseState, ScoreResource};
use minipac::systems::render::{scene_for, scene_system};
use minipac::systems::state::{GameStage, WinAnimation};
use pretty_assertions::assert_eq;

mod common;

#[test]
fn test_scene_for_matches_maze_size() {
    let maze = Maze::new().unwrap();
    let scene = scene_for(&maze);

    assert_eq!(scene.width(), 28);
    assert_eq!(scene.height(), 29);
}

#[test]
fn test_scene_system_layers() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::tile(1, 1));
    common::spawn_test_ghost(&mut world, 0, common::tile(1, 1), Direction::Up);
    common::spawn_test_ghost(&mut world, 1, common::tile(4, 1), Direction::Up);
    common::spawn_test_pellet(&mut world, common::tile(4, 1));
    common::spawn_test_pellet(&mut world, common::tile(2, 1));
    world.insert_resource(ScoreResource(120));

    world.run_system_once(scene_system).expect("System should run successfully");

    let scene = world.resource::<Scene>();
    assert_eq!(scene.get(1, 1), Some(Glyph::Player));
    assert_eq!(scene.get(4, 1), Some(Glyph::Ghost(1)));
    assert_eq!(scene.get(2, 1), Some(Glyph::Pellet));
    assert_eq!(scene.get(0, 0), Some(Glyph::Wall));
    // Pellets are drawn from entities, not from the layout
    assert_eq!(scene.get(3, 1), Some(Glyph::Empty));
    assert_eq!(scene.count(Glyph::Wall), 29);
    assert_eq!(scene.score, 120);
    assert_eq!(scene.banner, None);
}

#[test]
fn test_scene_system_banners() {
    let mut world = common::create_test_world();

    world.insert_resource(PauseState(true));
    world.run_system_once(scene_system).expect("System should run successfully");
    assert_eq!(world.resource::<Scene>().banner, Some(Banner::Paused));

    world.insert_resource(GameStage::GameOver);
    world.run_system_once(scene_system).expect("System should run successfully");
    assert_eq!(world.resource::<Scene>().banner, Some(Banner::GameOver));
}

#[test]
fn test_celebration_hides_actors_in_second_half() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, common::tile(1, 1));
    let mut animation = WinAnimation::default();
    animation.advance(minipac::constants::WIN_FRAME_TIME * 40);
    world.insert_resource(GameStage::Won(animation));

    world.run_system_once(scene_system).expect("System should run successfully");

    let scene = world.resource::<Scene>();
    assert_eq!(scene.count(Glyph::Player), 0);
    assert_eq!(scene.banner, Some(Banner::Celebration(animation)));
}
