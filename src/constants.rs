//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{IVec2, UVec2};

/// Tick length of the pixel-movement variant (60 ticks per second).
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);
/// Tick length of the grid variant (10 ticks per second).
pub const GRID_LOOP_TIME: Duration = Duration::from_millis(100);

/// The size of each tile, in pixels.
pub const TILE: f32 = 28.0;

/// Pixels moved by the player each tick.
pub const PLAYER_SPEED: f32 = 2.5;
/// Pixels moved by a ghost each tick.
pub const GHOST_SPEED: f32 = 2.0;
/// Lives the player starts with in the pixel variant.
pub const LIVES: u8 = 2;

/// Maximum distance from a tile center, on both axes, at which a buffered turn is accepted.
///
/// The effective value is never below a quarter tile, see [`turn_tolerance`].
pub const TURN_TOLERANCE: f32 = 6.0;

/// Radius of the player, in pixels.
pub const PLAYER_RADIUS: f32 = TILE / 2.0 - 2.0;
/// Radius of a ghost, in pixels.
pub const GHOST_RADIUS: f32 = TILE / 2.0 - 3.0;
/// Half-size of the square a pellet occupies for pickup tests.
pub const PELLET_RADIUS: f32 = 4.0;
/// Points awarded per pellet, shared by both variants.
pub const PELLET_SCORE: u32 = 10;
/// Per-tick chance that a ghost re-rolls its direction even when not blocked.
pub const GHOST_TURN_CHANCE: f64 = 0.02;

/// Tile used for the player when the board has no `P`.
pub const DEFAULT_PLAYER_TILE: UVec2 = UVec2::new(14, 23);
/// Tiles used for the ghosts when the board has no `G`.
pub const DEFAULT_GHOST_TILES: [UVec2; 3] = [UVec2::new(13, 14), UVec2::new(14, 14), UVec2::new(15, 14)];

/// Number of frames in the win animation.
pub const WIN_ANIMATION_FRAMES: u32 = 60;
/// Time each win animation frame stays on screen.
pub const WIN_FRAME_TIME: Duration = Duration::from_millis(30);
/// Text displayed by the win animation.
pub const WIN_BANNER: &str = "GRIALO";

/// Lives the player starts with in the grid variant.
pub const GRID_LIVES: u8 = 3;
/// Player start cell of the grid variant, as (column, row).
pub const GRID_PLAYER_START: IVec2 = IVec2::new(1, 1);
/// Ghost start cells of the grid variant, as (column, row).
pub const GRID_GHOST_STARTS: [IVec2; 1] = [IVec2::new(10, 5)];
/// How long the grid variant keeps the win message up before ending the run.
pub const GRID_WIN_HOLD: Duration = Duration::from_secs(3);

/// Codes accepted by the entry gate, compared case-insensitively.
pub const ACCEPTED_CODES: [&str; 2] = ["nagasai", "rialo"];
/// How long the gate shows its error message after a wrong code.
pub const GATE_ERROR_TIME: Duration = Duration::from_millis(2000);

/// Effective turn tolerance for a given tile size.
pub fn turn_tolerance(tile: f32) -> f32 {
    TURN_TOLERANCE.max(tile / 4.0)
}

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// The player's starting tile.
    PlayerStart,
    /// A ghost's starting tile.
    GhostStart,
}

/// The layout of the pixel-movement board.
///
/// `#` is a wall, `.` and `$` are pellets, `P` marks the player. Rows 12 and 14 run two tiles past the
/// nominal width and are kept as they are; the width of the board is taken from the first row.
pub const PIXEL_BOARD: [&str; 29] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.$..#.#   #.##.#   #.#..$.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.#####.##.#####.######",
    "     #.##          ##.#     ",
    "     #.##.###--###.##.#     ",
    "######.##.#$$$$$$#.#.##.######",
    "      .   #$$$$$$#   .      ",
    "######.##.#$$$$$$#.#.##.######",
    "     #.##.########.##.#     ",
    "     #.##..........##.#     ",
    "     #.##.########.##.#     ",
    "######.##.########.##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.$..##..............##..$.#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........P...............#",
    "############################",
];

/// The layout of the grid board: `1` is a wall, `2` a pellet, `0` an empty path.
pub const GRID_BOARD: [&str; 11] = [
    "11111111111111111111",
    "12221222122212222221",
    "12121212121212121211",
    "12122212221222121221",
    "12111111121111111121",
    "12221222122212221221",
    "11121212111212121211",
    "12222212221222122221",
    "12111111101111111121",
    "12221222222222122221",
    "11111111111111111111",
];
