//! A backend-independent picture of one frame.
//!
//! Both variants describe what should be on screen as a [`Scene`]; the terminal renderer
//! only ever draws scenes and the code-entry screen.

use bevy_ecs::resource::Resource;

use crate::systems::state::WinAnimation;

/// What occupies one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    #[default]
    Empty,
    Wall,
    Pellet,
    Player,
    /// A ghost, by spawn index.
    Ghost(usize),
}

/// Text shown over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Paused,
    GameOver,
    YouWin,
    /// The animated banner of the pixel variant's win.
    Celebration(WinAnimation),
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Scene {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
    pub score: u32,
    pub lives: u8,
    pub muted: bool,
    pub banner: Option<Banner>,
}

impl Scene {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Glyph::Empty; width * height],
            score: 0,
            lives: 0,
            muted: false,
            banner: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Empties every cell, keeping the HUD values.
    pub fn clear(&mut self) {
        self.cells.fill(Glyph::Empty);
    }

    /// Sets a cell; positions outside of the scene are ignored.
    pub fn set(&mut self, x: usize, y: usize, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Glyph> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Counts the cells holding `glyph`.
    pub fn count(&self, glyph: Glyph) -> usize {
        self.cells.iter().filter(|cell| **cell == glyph).count()
    }
}

/// The code-entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateView<'a> {
    pub input: &'a str,
    pub error: Option<&'a str>,
}

/// Everything the renderer knows how to draw.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Gate(GateView<'a>),
    Play(&'a Scene),
}
