//! The pixel-movement variant, built on bevy_ecs.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::audio::{Audio, AudioSink};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::map::builder::Maze;
use crate::map::direction::Direction;
use crate::scene::Scene;
use crate::systems::audio::{audio_system, AudioEvent, AudioResource, AudioState};
use crate::systems::collision::collision_system;
use crate::systems::components::{
    GameRng, GhostBundle, GlobalState, PauseState, PelletBundle, PelletCount, PlayerBundle, PlayerLives, ScoreResource,
};
use crate::systems::ghost::ghost_movement_system;
use crate::systems::movement::player_movement_system;
use crate::systems::player::player_control_system;
use crate::systems::render::{scene_for, scene_system};
use crate::systems::state::{stage_system, win_animation_system, GameStage};
use crate::systems::error_reporting_system;

/// System set for all gameplay systems to ensure proper ordering
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// System set for everything that runs after the game state settled
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Animation,
    Draw,
    Present,
}

/// Core game state of the pixel variant.
///
/// Owns the ECS world and the schedule that runs one tick: input, movement, collisions,
/// stage bookkeeping, then the scene and sound output. A restart is reported to the owner,
/// which builds a new `Game`.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the default maze and spawns a fresh game.
    pub fn new(rng: SmallRng, sink: Box<dyn AudioSink>, muted: bool) -> GameResult<Game> {
        Self::with_maze(Maze::new()?, rng, sink, muted)
    }

    pub fn with_maze(maze: Maze, rng: SmallRng, sink: Box<dyn AudioSink>, muted: bool) -> GameResult<Game> {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        world.insert_resource(scene_for(&maze));
        world.insert_resource(maze);
        world.insert_resource(GameRng(rng));
        world.insert_resource(AudioResource(Audio::new(sink)));
        world.insert_resource(AudioState { muted });
        Self::spawn_entities(&mut world)?;

        Self::configure_schedule(&mut schedule);

        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    /// Spawns the actors and pellets and sets every per-game resource to its starting value.
    fn spawn_entities(world: &mut World) -> GameResult<()> {
        world.insert_resource(GlobalState::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(PlayerLives::default());
        world.insert_resource(ScoreResource(0));

        let maze = world
            .get_resource::<Maze>()
            .cloned()
            .ok_or_else(|| GameError::InvalidState("Maze resource missing".to_string()))?;

        world.spawn(PlayerBundle::new(maze.player_start));
        for (index, start) in maze.ghost_starts.iter().enumerate() {
            let direction = {
                let mut rng = world.resource_mut::<GameRng>();
                Direction::DIRECTIONS.choose(&mut rng.0).copied().unwrap_or_default()
            };
            world.spawn(GhostBundle::new(index, *start, direction));
        }
        world.spawn_batch(maze.pellets.iter().map(|center| PelletBundle::new(*center)));
        world.insert_resource(PelletCount(maze.pellets.len()));

        debug!(ghosts = maze.ghost_starts.len(), pellets = maze.pellets.len(), "Entities spawned");
        Ok(())
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let is_running = |paused: Res<PauseState>, stage: Res<GameStage>| !paused.0 && stage.is_playing();

        schedule
            .add_systems((
                player_control_system.in_set(GameplaySet::Input),
                (player_movement_system, ghost_movement_system, collision_system)
                    .chain()
                    .in_set(GameplaySet::Update),
                stage_system.in_set(GameplaySet::Respond),
                win_animation_system.in_set(RenderSet::Animation),
                scene_system.in_set(RenderSet::Draw),
                (audio_system, error_reporting_system).in_set(RenderSet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(is_running),
                    GameplaySet::Respond.run_if(is_running),
                    RenderSet::Animation,
                    RenderSet::Draw,
                    RenderSet::Present,
                )
                    .chain(),
            );
    }

    /// Queues a command for the next tick.
    pub fn post(&mut self, command: GameCommand) {
        self.world.resource_mut::<Events<GameEvent>>().send(GameEvent::Command(command));
    }

    /// Executes one tick of game logic by running all scheduled ECS systems.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self) -> bool {
        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.world.resource::<GlobalState>().exit
    }

    /// True once Enter was pressed on a won or lost game. The owner decides what comes next.
    pub fn restart_requested(&self) -> bool {
        self.world.resource::<GlobalState>().restart
    }

    pub fn scene(&self) -> &Scene {
        self.world.resource::<Scene>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn pellets_left(&self) -> usize {
        self.world.resource::<PelletCount>().0
    }
}
