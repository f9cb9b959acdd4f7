//! This module handles the sound effects of the game.
//!
//! Every effect is a short sine tone synthesized at startup into a stereo chunk of 16-bit samples.
//! Playback goes through an [`AudioSink`], so the same chunks can drive the terminal bell or be recorded in tests.
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Sample rate of every synthesized chunk, in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Chunks shorter than this are not worth ringing the terminal bell for.
const BELL_MIN_DURATION: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Sound {
    Pellet,
    Death,
    Win,
}

impl Sound {
    /// The tone this sound is synthesized from.
    pub fn tone(self) -> Tone {
        match self {
            Sound::Pellet => Tone::new(800.0, 0.05, 0.3),
            Sound::Death => Tone::new(200.0, 0.5, 0.6),
            Sound::Win => Tone::new(1000.0, 0.3, 0.5),
        }
    }
}

/// A pure sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Length in seconds.
    pub duration: f32,
    /// Scale applied to the full 16-bit amplitude, from 0 to 1.
    pub volume: f32,
}

impl Tone {
    pub const fn new(frequency: f32, duration: f32, volume: f32) -> Self {
        Self {
            frequency,
            duration,
            volume,
        }
    }

    /// Renders the tone into a stereo chunk, with the same sample on both channels.
    pub fn synthesize(&self) -> Result<Chunk> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(anyhow!("Volume {} is outside of 0..=1", self.volume));
        }
        if self.duration <= 0.0 || self.frequency <= 0.0 {
            return Err(anyhow!("Tone {:?} has no length or pitch", self));
        }

        let count = (SAMPLE_RATE as f32 * self.duration) as usize;
        let samples = (0..count)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let value = ((TAU * self.frequency * t).sin() * 32767.0 * self.volume) as i16;
                [value, value]
            })
            .collect();

        Ok(Chunk {
            samples,
            sample_rate: SAMPLE_RATE,
        })
    }
}

/// A block of interleaved stereo samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub samples: Vec<[i16; 2]>,
    pub sample_rate: u32,
}

impl Chunk {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> i16 {
        self.samples
            .iter()
            .flat_map(|frame| frame.iter())
            .map(|sample| sample.saturating_abs())
            .max()
            .unwrap_or(0)
    }
}

/// Where synthesized chunks end up.
pub trait AudioSink: Send + Sync {
    fn play(&mut self, sound: Sound, chunk: &Chunk);
}

/// Rings the terminal bell for the longer effects.
///
/// Terminals cannot play arbitrary waveforms, so short chunks such as the pellet blip are dropped.
#[derive(Debug, Default)]
pub struct BellSink;

impl AudioSink for BellSink {
    fn play(&mut self, sound: Sound, chunk: &Chunk) {
        if chunk.duration() < BELL_MIN_DURATION {
            return;
        }
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::warn!(?sound, "Could not ring the terminal bell: {}", e);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: Sound, _chunk: &Chunk) {}
}

/// Keeps a shared log of every sound that reached it.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<Sound>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Sound> {
        self.played.lock().clone()
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: Sound, _chunk: &Chunk) {
        self.played.lock().push(sound);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    Enabled,
    Muted,
    Disabled,
}

/// The audio system for the game.
///
/// If synthesis fails, the audio system is disabled and every function silently does nothing.
pub struct Audio {
    sink: Box<dyn AudioSink>,
    sounds: HashMap<Sound, Chunk>,
    state: AudioState,
}

impl Audio {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        match Self::synthesize_all() {
            Ok(sounds) => Self {
                sink,
                sounds,
                state: AudioState::Enabled,
            },
            Err(e) => {
                tracing::warn!("Failed to synthesize sounds: {}. Audio will be disabled.", e);
                Self {
                    sink,
                    sounds: HashMap::new(),
                    state: AudioState::Disabled,
                }
            }
        }
    }

    fn synthesize_all() -> Result<HashMap<Sound, Chunk>> {
        Sound::iter()
            .map(|sound| {
                sound
                    .tone()
                    .synthesize()
                    .map(|chunk| (sound, chunk))
                    .map_err(|e| anyhow!("Failed to synthesize {:?}: {}", sound, e))
            })
            .collect()
    }

    /// Plays the provided sound effect once.
    pub fn play(&mut self, sound: Sound) {
        if self.state != AudioState::Enabled {
            return;
        }

        if let Some(chunk) = self.sounds.get(&sound) {
            tracing::trace!(?sound, duration = ?chunk.duration(), "Playing sound");
            self.sink.play(sound, chunk);
        }
    }

    pub fn chunk(&self, sound: Sound) -> Option<&Chunk> {
        self.sounds.get(&sound)
    }

    /// Mutes or unmutes playback. Has no effect while disabled.
    pub fn set_mute(&mut self, mute: bool) {
        self.state = match (self.state, mute) {
            (AudioState::Disabled, _) => AudioState::Disabled,
            (_, true) => AudioState::Muted,
            (_, false) => AudioState::Enabled,
        };
    }

    pub fn is_muted(&self) -> bool {
        self.state == AudioState::Muted
    }

    pub fn is_disabled(&self) -> bool {
        self.state == AudioState::Disabled
    }
}
