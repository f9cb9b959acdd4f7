//! Map parsing functionality for converting raw board layouts into structured data.

use glam::UVec2;

use crate::constants::MapTile;
use crate::error::ParseError;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed as `tiles[row][column]`.
    ///
    /// Every row is exactly as wide as the first one: short rows are padded with empty tiles
    /// and anything past the first row's width is dropped.
    pub tiles: Vec<Vec<MapTile>>,
    /// Width of the board in tiles, taken from the first row.
    pub width: usize,
    /// The player's starting tile, if the layout marks one.
    pub player_start: Option<UVec2>,
    /// Ghost starting tiles, in reading order.
    pub ghost_starts: Vec<UVec2>,
}

impl ParsedMap {
    /// Height of the board in tiles.
    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Iterates over every tile with its (column, row) position.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (UVec2, MapTile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| (UVec2::new(x as u32, y as u32), *tile))
        })
    }
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character of the pixel board.
    ///
    /// Unrecognized characters (spaces, the `-` house door) are open floor.
    pub fn parse_pixel_character(c: char) -> Result<MapTile, ParseError> {
        Ok(match c {
            '#' => MapTile::Wall,
            '.' | '$' => MapTile::Pellet,
            'P' => MapTile::PlayerStart,
            'G' => MapTile::GhostStart,
            _ => MapTile::Empty,
        })
    }

    /// Parses a single digit of the grid board.
    pub fn parse_grid_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '1' => Ok(MapTile::Wall),
            '2' => Ok(MapTile::Pellet),
            '0' => Ok(MapTile::Empty),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no rows or if `parse` rejects a character.
    pub fn parse_board<F>(raw_board: &[&str], parse: F) -> Result<ParsedMap, ParseError>
    where
        F: Fn(char) -> Result<MapTile, ParseError>,
    {
        let width = raw_board.first().ok_or(ParseError::EmptyBoard)?.chars().count();
        let mut tiles = Vec::with_capacity(raw_board.len());
        let mut player_start = None;
        let mut ghost_starts = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            let mut row = Vec::with_capacity(width);
            for (x, character) in line.chars().take(width).enumerate() {
                let tile = parse(character)?;
                let position = UVec2::new(x as u32, y as u32);

                // Track special positions
                match tile {
                    MapTile::PlayerStart => player_start = Some(position),
                    MapTile::GhostStart => ghost_starts.push(position),
                    _ => {}
                }

                row.push(tile);
            }

            if row.len() < width {
                row.resize(width, MapTile::Empty);
            }
            tiles.push(row);
        }

        Ok(ParsedMap {
            tiles,
            width,
            player_start,
            ghost_starts,
        })
    }

    /// Parses the pixel board layout.
    pub fn parse_pixel_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        Self::parse_board(raw_board, Self::parse_pixel_character)
    }

    /// Parses the grid board layout.
    pub fn parse_grid_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        Self::parse_board(raw_board, Self::parse_grid_character)
    }
}
