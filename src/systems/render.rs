use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::constants::MapTile;
use crate::map::builder::Maze;
use crate::scene::{Banner, Glyph, Scene};
use crate::systems::audio::AudioState;
use crate::systems::components::{Ghost, PauseState, Pellet, PlayerControlled, PlayerLives, Position, ScoreResource};
use crate::systems::state::GameStage;

/// Builds an empty scene sized for the maze.
pub fn scene_for(maze: &Maze) -> Scene {
    Scene::new(maze.size.x as usize, maze.size.y as usize)
}

/// Redraws the scene resource from the world.
///
/// Actors are placed on the tile holding their center. Ghosts are drawn over pellets and the player over ghosts.
#[allow(clippy::too_many_arguments)]
pub fn scene_system(
    maze: Res<Maze>,
    stage: Res<GameStage>,
    score: Res<ScoreResource>,
    lives: Res<PlayerLives>,
    pause: Res<PauseState>,
    audio_state: Res<AudioState>,
    players: Query<&Position, With<PlayerControlled>>,
    ghosts: Query<(&Ghost, &Position)>,
    pellets: Query<&Position, With<Pellet>>,
    mut scene: ResMut<Scene>,
) {
    scene.clear();

    for (y, row) in maze.tiles.iter().enumerate() {
        for (x, tile) in row.iter().enumerate() {
            if *tile == MapTile::Wall {
                scene.set(x, y, Glyph::Wall);
            }
        }
    }

    for position in pellets.iter() {
        if let Some(tile) = maze.tile_at(position.0) {
            scene.set(tile.x as usize, tile.y as usize, Glyph::Pellet);
        }
    }

    let actors_visible = match *stage {
        GameStage::Won(animation) => animation.actors_visible(),
        _ => true,
    };

    if actors_visible {
        for (ghost, position) in ghosts.iter() {
            if let Some(tile) = maze.tile_at(position.0) {
                scene.set(tile.x as usize, tile.y as usize, Glyph::Ghost(ghost.index));
            }
        }
        for position in players.iter() {
            if let Some(tile) = maze.tile_at(position.0) {
                scene.set(tile.x as usize, tile.y as usize, Glyph::Player);
            }
        }
    }

    scene.score = score.0;
    scene.lives = lives.0;
    scene.muted = audio_state.muted;
    scene.banner = match *stage {
        GameStage::GameOver => Some(Banner::GameOver),
        GameStage::Won(animation) => Some(Banner::Celebration(animation)),
        GameStage::Playing if pause.0 => Some(Banner::Paused),
        GameStage::Playing => None,
    };
}
