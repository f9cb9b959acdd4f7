use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};

use crate::{
    error::GameError,
    events::{GameCommand, GameEvent},
    systems::{
        audio::AudioState,
        components::{BufferedDirection, GlobalState, PauseState, PlayerControlled},
        state::GameStage,
    },
};

/// Processes player input commands and updates game state accordingly.
///
/// Movement commands are buffered on the player until the next tile center where the turn fits.
/// Restart requests are only honored once the game has been won or lost.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut audio_state: ResMut<AudioState>,
    mut pause: ResMut<PauseState>,
    stage: Res<GameStage>,
    mut players: Query<&mut BufferedDirection, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match command {
            GameCommand::MovePlayer(direction) => match players.single_mut() {
                Ok(mut buffered) => buffered.0 = Some(*direction),
                Err(e) => {
                    errors.write(GameError::InvalidState(format!(
                        "No/multiple entities queried for player system: {}",
                        e
                    )));
                }
            },
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::MuteAudio => {
                audio_state.muted = !audio_state.muted;
                tracing::info!("Audio {}", if audio_state.muted { "muted" } else { "unmuted" });
            }
            GameCommand::TogglePause => {
                if stage.is_playing() {
                    pause.0 = !pause.0;
                    tracing::info!("Game {}", if pause.0 { "paused" } else { "resumed" });
                }
            }
            GameCommand::Restart => {
                if !stage.is_playing() {
                    state.restart = true;
                }
            }
        }
    }
}
