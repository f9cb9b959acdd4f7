use bevy_ecs::event::Events;
use bevy_ecs::system::RunSystemOnce;
use minipac::audio::{Audio, RecordingSink, Sound, Tone, SAMPLE_RATE};
use minipac::systems::audio::{audio_system, AudioEvent, AudioResource, AudioState};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

fn send_sound(world: &mut bevy_ecs::world::World, sound: Sound) {
    world.resource_mut::<Events<AudioEvent>>().send(AudioEvent::PlaySound(sound));
}

#[test]
fn test_every_sound_synthesizes() {
    let audio = Audio::new(Box::new(RecordingSink::new()));
    assert_that(&audio.is_disabled()).is_false();

    for sound in Sound::iter() {
        let chunk = audio.chunk(sound).unwrap();
        assert_eq!(chunk.sample_rate, SAMPLE_RATE);
        assert_that(&(chunk.duration().as_secs_f32() - sound.tone().duration).abs()).is_less_than(0.001);
        assert_that(&chunk.peak()).is_greater_than(0);
    }
}

#[test]
fn test_tone_peak_follows_volume() {
    let chunk = Tone::new(440.0, 0.1, 0.5).synthesize().unwrap();
    assert_that(&chunk.peak()).is_less_than_or_equal_to(16_384);
    assert_that(&chunk.peak()).is_greater_than(16_000);
}

#[test]
fn test_invalid_tones() {
    assert_that(&Tone::new(440.0, 0.0, 0.5).synthesize().is_err()).is_true();
    assert_that(&Tone::new(0.0, 0.1, 0.5).synthesize().is_err()).is_true();
    assert_that(&Tone::new(440.0, 0.1, -0.1).synthesize().is_err()).is_true();
}

#[test]
fn test_mute_stops_playback() {
    let sink = RecordingSink::new();
    let mut audio = Audio::new(Box::new(sink.clone()));

    audio.play(Sound::Pellet);
    audio.set_mute(true);
    audio.play(Sound::Death);
    audio.set_mute(false);
    audio.play(Sound::Win);

    assert_eq!(sink.played(), vec![Sound::Pellet, Sound::Win]);
}

#[test]
fn test_audio_system_plays_events() {
    let sink = RecordingSink::new();
    let mut world = common::create_test_world_with_sink(sink.clone());
    send_sound(&mut world, Sound::Pellet);
    send_sound(&mut world, Sound::Death);

    world.run_system_once(audio_system).expect("System should run successfully");

    assert_eq!(sink.played(), vec![Sound::Pellet, Sound::Death]);
}

#[test]
fn test_audio_system_follows_mute_state() {
    let sink = RecordingSink::new();
    let mut world = common::create_test_world_with_sink(sink.clone());
    world.insert_resource(AudioState { muted: true });
    send_sound(&mut world, Sound::Win);

    world.run_system_once(audio_system).expect("System should run successfully");

    assert_that(&sink.played()).is_empty();
    assert_that(&world.resource::<AudioResource>().0.is_muted()).is_true();
}
