//! ECS glue for sound playback.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::debug;

use crate::audio::{Audio, Sound};

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    PlaySound(Sound),
}

#[derive(Resource)]
pub struct AudioResource(pub Audio);

/// System that processes audio events and plays sounds
pub fn audio_system(mut audio: ResMut<AudioResource>, state: Res<AudioState>, mut events: EventReader<AudioEvent>) {
    if audio.0.is_muted() != state.muted {
        debug!(muted = state.muted, "Audio mute state changed");
        audio.0.set_mute(state.muted);
    }

    for event in events.read() {
        match event {
            AudioEvent::PlaySound(sound) => {
                if !audio.0.is_disabled() && !state.muted {
                    audio.0.play(*sound);
                } else {
                    debug!(
                        disabled = audio.0.is_disabled(),
                        muted = state.muted,
                        ?sound,
                        "Skipping sound due to audio state"
                    );
                }
            }
        }
    }
}
