//! Map construction for both game variants.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2, Vec2};
use tracing::debug;

use crate::constants::{MapTile, DEFAULT_GHOST_TILES, DEFAULT_PLAYER_TILE, GRID_BOARD, PIXEL_BOARD, TILE};
use crate::error::{GameResult, MapError};
use crate::map::parser::{MapTileParser, ParsedMap};
use crate::map::rect::Rect;

/// Returns the pixel center of a tile.
pub fn tile_center(tile: UVec2, tile_size: f32) -> Vec2 {
    tile.as_vec2() * tile_size + Vec2::splat(tile_size / 2.0)
}

/// The maze of the pixel-movement variant.
///
/// Walls are kept as one rectangle per wall tile; movement is resolved by testing an actor's box against them.
#[derive(Resource, Debug, Clone)]
pub struct Maze {
    /// The parsed tile layout, used for drawing.
    pub tiles: Vec<Vec<MapTile>>,
    /// One rectangle per wall tile.
    pub walls: Vec<Rect>,
    /// Centers of every pellet at the start of a game.
    pub pellets: Vec<Vec2>,
    /// Center of the player's starting tile.
    pub player_start: Vec2,
    /// Centers of the ghosts' starting tiles.
    pub ghost_starts: Vec<Vec2>,
    /// Board size in tiles, taken from the first row.
    pub size: UVec2,
    /// Tile size in pixels.
    pub tile_size: f32,
}

impl Maze {
    /// Builds the default pixel maze.
    pub fn new() -> GameResult<Maze> {
        Self::from_board(&PIXEL_BOARD, TILE)
    }

    /// Builds a maze from a raw pixel board.
    pub fn from_board(raw_board: &[&str], tile_size: f32) -> GameResult<Maze> {
        let parsed = MapTileParser::parse_pixel_board(raw_board)?;
        Ok(Self::from_parsed(parsed, tile_size))
    }

    fn from_parsed(parsed: ParsedMap, tile_size: f32) -> Maze {
        let mut walls = Vec::new();
        let mut pellets = Vec::new();

        for (tile, kind) in parsed.iter_tiles() {
            match kind {
                MapTile::Wall => walls.push(Rect::new(tile.as_vec2() * tile_size, Vec2::splat(tile_size))),
                MapTile::Pellet => pellets.push(tile_center(tile, tile_size)),
                _ => {}
            }
        }

        let player_start = tile_center(parsed.player_start.unwrap_or(DEFAULT_PLAYER_TILE), tile_size);
        let ghost_starts: Vec<Vec2> = if parsed.ghost_starts.is_empty() {
            DEFAULT_GHOST_TILES.iter().map(|t| tile_center(*t, tile_size)).collect()
        } else {
            parsed.ghost_starts.iter().map(|t| tile_center(*t, tile_size)).collect()
        };

        let size = UVec2::new(parsed.width as u32, parsed.height() as u32);
        debug!(
            walls = walls.len(),
            pellets = pellets.len(),
            ghosts = ghost_starts.len(),
            width = size.x,
            height = size.y,
            "Maze built"
        );

        Maze {
            tiles: parsed.tiles,
            walls,
            pellets,
            player_start,
            ghost_starts,
            size,
            tile_size,
        }
    }

    /// Board width in pixels.
    pub fn width_px(&self) -> f32 {
        self.size.x as f32 * self.tile_size
    }

    /// Board height in pixels.
    pub fn height_px(&self) -> f32 {
        self.size.y as f32 * self.tile_size
    }

    /// Returns true if the rectangle overlaps any wall.
    pub fn collides(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|wall| rect.intersects(wall))
    }

    /// Returns the tile at (column, row), if it exists.
    pub fn tile(&self, position: UVec2) -> Option<MapTile> {
        self.tiles
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    /// Returns the tile containing a pixel position, if it is on the board.
    pub fn tile_at(&self, pixel: Vec2) -> Option<UVec2> {
        if pixel.x < 0.0 || pixel.y < 0.0 {
            return None;
        }
        let tile = (pixel / self.tile_size).floor().as_uvec2();
        (tile.x < self.size.x && tile.y < self.size.y).then_some(tile)
    }
}

/// The maze of the grid variant, where actors step one cell at a time.
#[derive(Debug, Clone)]
pub struct GridMaze {
    cells: Vec<Vec<MapTile>>,
    size: UVec2,
}

impl GridMaze {
    /// Builds the default grid maze.
    pub fn new() -> GameResult<GridMaze> {
        Self::from_board(&GRID_BOARD)
    }

    /// Builds a grid maze from a raw board of digits.
    pub fn from_board(raw_board: &[&str]) -> GameResult<GridMaze> {
        let parsed = MapTileParser::parse_grid_board(raw_board)?;
        let size = UVec2::new(parsed.width as u32, parsed.height() as u32);
        Ok(GridMaze {
            cells: parsed.tiles,
            size,
        })
    }

    /// Board size in cells, (columns, rows).
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns the tile at (column, row), or `None` if out of bounds.
    pub fn cell(&self, position: IVec2) -> Option<MapTile> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.cells
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    /// Returns true if the cell is on the board and not a wall.
    pub fn is_open(&self, position: IVec2) -> bool {
        matches!(self.cell(position), Some(tile) if tile != MapTile::Wall)
    }

    /// Removes the pellet at `position`, returning whether there was one.
    pub fn take_pellet(&mut self, position: IVec2) -> bool {
        if self.cell(position) != Some(MapTile::Pellet) {
            return false;
        }
        self.cells[position.y as usize][position.x as usize] = MapTile::Empty;
        true
    }

    /// Number of pellets left on the board.
    pub fn pellet_count(&self) -> usize {
        self.cells.iter().flatten().filter(|tile| **tile == MapTile::Pellet).count()
    }

    /// Checks that a start position is usable.
    pub fn validate_start(&self, position: IVec2) -> Result<(), MapError> {
        match self.cell(position) {
            None => Err(MapError::StartOutOfBounds((position.x, position.y))),
            Some(MapTile::Wall) => Err(MapError::StartInWall((position.x, position.y))),
            Some(_) => Ok(()),
        }
    }
}
