use std::time::Duration;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::Has,
    resource::Resource,
    system::{Query, ResMut},
};
use rand::seq::IndexedRandom;
use tracing::info;

use crate::audio::Sound;
use crate::constants::{LOOP_TIME, PELLET_SCORE, WIN_ANIMATION_FRAMES, WIN_FRAME_TIME};
use crate::events::GameEvent;
use crate::map::direction::Direction;
use crate::systems::audio::AudioEvent;
use crate::systems::components::{
    BufferedDirection, GameRng, Ghost, PelletCount, PlayerLives, Position, ScoreResource, SpawnPoint, Velocity,
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Every pellet is gone; the celebration keeps playing until the game is restarted or closed.
    Won(WinAnimation),
    /// The player has run out of lives.
    GameOver,
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

/// The looping celebration shown after a win.
///
/// One cycle is [`WIN_ANIMATION_FRAMES`] frames of [`WIN_FRAME_TIME`] each.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct WinAnimation {
    elapsed: Duration,
}

impl WinAnimation {
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    /// The frame within the current cycle, from 0 to `WIN_ANIMATION_FRAMES - 1`.
    pub fn frame(&self) -> u32 {
        let frames = self.elapsed.as_millis() / WIN_FRAME_TIME.as_millis();
        (frames % WIN_ANIMATION_FRAMES as u128) as u32
    }

    /// Banner scale, growing from 1 toward 3 over a cycle.
    pub fn scale(&self) -> f32 {
        1.0 + (self.frame() as f32 / WIN_ANIMATION_FRAMES as f32) * 2.0
    }

    /// Actors are only drawn during the first half of each cycle.
    pub fn actors_visible(&self) -> bool {
        self.frame() < WIN_ANIMATION_FRAMES / 2
    }

    /// Index into a palette of `palette_len` colors for the current frame.
    pub fn color_index(&self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        self.frame() as usize % palette_len
    }
}

/// Applies the outcome of the tick's collisions to the score, lives and stage.
///
/// Pellets score and shrink the pellet count. A ghost contact costs exactly one life no matter how many
/// ghosts were touched; with lives left, the player and ghosts go back to their spawn points while pellets
/// and score stay as they are. Clearing the board wins even if the last life went in the same tick.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<PlayerLives>,
    mut pellets: ResMut<PelletCount>,
    mut rng: ResMut<GameRng>,
    mut audio_events: EventWriter<AudioEvent>,
    mut actors: Query<(&mut Position, &SpawnPoint, &mut Velocity, Option<&mut BufferedDirection>, Has<Ghost>)>,
) {
    let mut contact = false;
    for event in events.read() {
        match event {
            GameEvent::PelletEaten(_) => {
                score.0 += PELLET_SCORE;
                pellets.0 = pellets.0.saturating_sub(1);
                audio_events.write(AudioEvent::PlaySound(Sound::Pellet));
            }
            GameEvent::GhostContact(_) => contact = true,
            GameEvent::Command(_) => {}
        }
    }

    if !stage.is_playing() {
        return;
    }

    if contact {
        lives.0 = lives.0.saturating_sub(1);
        audio_events.write(AudioEvent::PlaySound(Sound::Death));

        if lives.0 == 0 {
            info!(score = score.0, "Game over");
            *stage = GameStage::GameOver;
        } else {
            info!(lives = lives.0, "Player caught, respawning");
            for (mut position, spawn, mut velocity, buffered, is_ghost) in actors.iter_mut() {
                position.0 = spawn.0;
                if is_ghost {
                    velocity.direction = Direction::DIRECTIONS.choose(&mut rng.0).copied();
                } else {
                    velocity.direction = None;
                }
                if let Some(mut buffered) = buffered {
                    buffered.0 = None;
                }
            }
        }
    }

    if pellets.0 == 0 {
        info!(score = score.0, "All pellets eaten");
        *stage = GameStage::Won(WinAnimation::default());
        audio_events.write(AudioEvent::PlaySound(Sound::Win));
    }
}

/// Advances the celebration by one tick while the game is won.
pub fn win_animation_system(mut stage: ResMut<GameStage>) {
    if let GameStage::Won(animation) = stage.as_mut() {
        animation.advance(LOOP_TIME);
    }
}
