#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, Events},
    system::RunSystemOnce,
    world::World,
};
use glam::{UVec2, Vec2};
use minipac::{
    audio::{Audio, RecordingSink},
    constants::TILE,
    error::GameError,
    events::GameEvent,
    map::{
        builder::{tile_center, Maze},
        direction::Direction,
    },
    scene::Scene,
    systems::{
        audio::{AudioEvent, AudioResource, AudioState},
        components::{
            GameRng, GhostBundle, GlobalState, PauseState, PelletBundle, PelletCount, PlayerBundle, PlayerLives,
            ScoreResource,
        },
        state::GameStage,
    },
};

/// A small open board with a wrap-around tunnel on row 3.
pub const CORRIDOR_BOARD: [&str; 5] = [
    "##########",
    "#........#",
    "#.##.###.#",
    "          ",
    "##########",
];

/// A board the player clears by walking right; the ghost is boxed in below.
pub const WIN_BOARD: [&str; 4] = ["#######", "#P...##", "#####G#", "#######"];

pub fn corridor_maze() -> Maze {
    Maze::from_board(&CORRIDOR_BOARD, TILE).expect("Failed to build corridor maze")
}

/// Pixel center of a tile on a board with the default tile size.
pub fn tile(x: u32, y: u32) -> Vec2 {
    tile_center(UVec2::new(x, y), TILE)
}

/// Creates a test world with every resource the gameplay systems need.
pub fn create_test_world() -> World {
    create_test_world_with_sink(RecordingSink::new())
}

pub fn create_test_world_with_sink(sink: RecordingSink) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());

    let maze = corridor_maze();
    world.insert_resource(Scene::new(maze.size.x as usize, maze.size.y as usize));
    world.insert_resource(maze);
    world.insert_resource(GameRng::seeded(7));
    world.insert_resource(AudioResource(Audio::new(Box::new(sink))));
    world.insert_resource(AudioState::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(PlayerLives::default());
    world.insert_resource(ScoreResource(0));
    world.insert_resource(PelletCount(0));

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    world.spawn(PlayerBundle::new(position)).id()
}

pub fn spawn_test_ghost(world: &mut World, index: usize, position: Vec2, direction: Direction) -> Entity {
    world.spawn(GhostBundle::new(index, position, direction)).id()
}

pub fn spawn_test_pellet(world: &mut World, position: Vec2) -> Entity {
    world.spawn(PelletBundle::new(position)).id()
}

/// Sends a game event to the world
pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

/// Every game event currently readable.
pub fn read_game_events(world: &mut World) -> Vec<GameEvent> {
    world
        .run_system_once(|mut reader: EventReader<GameEvent>| reader.read().copied().collect::<Vec<_>>())
        .expect("System should run successfully")
}

/// Every audio event currently readable.
pub fn read_audio_events(world: &mut World) -> Vec<AudioEvent> {
    world
        .run_system_once(|mut reader: EventReader<AudioEvent>| reader.read().copied().collect::<Vec<_>>())
        .expect("System should run successfully")
}

pub fn count_errors(world: &mut World) -> usize {
    world
        .run_system_once(|mut reader: EventReader<GameError>| reader.read().count())
        .expect("System should run successfully")
}
