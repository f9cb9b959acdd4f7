use std::time::Duration;

use crossterm::style::Color;
use minipac::constants::WIN_FRAME_TIME;
use minipac::formatter::{get_tick_count, increment_tick, TickFormatter};
use minipac::platform::terminal::{banner_line, hud_line, spaced, CELEBRATION_PALETTE};
use minipac::platform::tracing_buffer::{SwitchableMakeWriter, SwitchableWriter};
use minipac::scene::{Banner, Scene};
use minipac::systems::state::WinAnimation;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_hud_line_groups_thousands() {
    let mut scene = Scene::new(4, 4);
    scene.score = 1_234_560;
    scene.lives = 2;

    assert_eq!(hud_line(&scene), "Score: 1,234,560  Lives: 2");

    scene.muted = true;
    assert_eq!(hud_line(&scene), "Score: 1,234,560  Lives: 2  [muted]");
}

#[test]
fn test_spaced() {
    assert_eq!(spaced("GRIALO", 0), "GRIALO");
    assert_eq!(spaced("GRIALO", 1), "G R I A L O");
    assert_eq!(spaced("", 3), "");
}

#[test]
fn test_static_banners() {
    assert_eq!(banner_line(Banner::Paused).0, "PAUSED");
    assert_eq!(
        banner_line(Banner::GameOver),
        ("GAME OVER Press Enter to Restart".to_string(), Color::Red)
    );
    assert_eq!(banner_line(Banner::YouWin).0, "You Win!");
}

#[test]
fn test_celebration_banner_grows_and_cycles_colors() {
    let mut animation = WinAnimation::default();
    assert_eq!(banner_line(Banner::Celebration(animation)), ("GRIALO".to_string(), CELEBRATION_PALETTE[0]));

    animation.advance(WIN_FRAME_TIME * 45);
    let (text, color) = banner_line(Banner::Celebration(animation));
    // Frame 45 scales the banner to 2.5, which rounds to two spaces between letters
    assert_eq!(text, "G  R  I  A  L  O");
    assert_eq!(color, CELEBRATION_PALETTE[45 % CELEBRATION_PALETTE.len()]);
}

#[test]
fn test_switchable_writer_buffers_until_released() {
    use std::io::Write;

    let mut writer = SwitchableWriter::new();
    writer.write_all(b"first line\n").unwrap();
    assert_that(&writer.is_direct()).is_false();
    assert_eq!(writer.buffered().buffer_size(), 11);

    let mut released = Vec::new();
    writer.release_to(&mut released).unwrap();

    assert_eq!(released, b"first line\n");
    assert_that(&writer.is_direct()).is_true();
    assert_eq!(writer.buffered().buffer_size(), 0);
}

#[test]
fn test_tick_formatter_writes_tick_and_level() {
    let writer = SwitchableWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .event_format(TickFormatter)
        .with_writer(SwitchableMakeWriter::new(writer.clone()))
        .finish();

    increment_tick();
    let tick = get_tick_count();
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(score = 10, "Pellet eaten");
    });

    let output = String::from_utf8(writer.buffered().contents()).unwrap();
    let line = output.lines().next().unwrap();
    assert_eq!(&line[2..3], ":");
    assert_that(&line.contains(" INFO ")).is_true();
    assert_that(&line.contains("Pellet eaten")).is_true();
    assert_that(&line.contains("score=10")).is_true();
    assert_that(&line.contains(&format!(" t{:06}", tick))).is_true();
    assert_that(&line.contains("\x1b[")).is_false();
}

#[test]
fn test_win_animation_hides_actors_in_second_half() {
    let mut animation = WinAnimation::default();
    animation.advance(Duration::from_millis(29 * 30));
    assert_that(&animation.actors_visible()).is_true();
    animation.advance(WIN_FRAME_TIME);
    assert_that(&animation.actors_visible()).is_false();
}
