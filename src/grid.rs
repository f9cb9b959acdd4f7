//! The grid variant: actors hop one cell per tick on a small digit board.

use std::time::Duration;

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, info};

use crate::constants::{MapTile, GRID_GHOST_STARTS, GRID_LIVES, GRID_LOOP_TIME, GRID_PLAYER_START, GRID_WIN_HOLD, PELLET_SCORE};
use crate::error::GameResult;
use crate::events::GameCommand;
use crate::map::builder::GridMaze;
use crate::map::direction::Direction;
use crate::scene::{Banner, Glyph, Scene};

/// How a grid game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOutcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlayer {
    /// (column, row)
    pub position: IVec2,
    /// Last requested step; zero until the first key press.
    pub direction: IVec2,
}

impl GridPlayer {
    /// Steps one cell in the current direction if that cell is open.
    pub fn step(&mut self, maze: &GridMaze) {
        let target = self.position + self.direction;
        if self.direction != IVec2::ZERO && maze.is_open(target) {
            self.position = target;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGhost {
    pub position: IVec2,
    pub direction: Direction,
}

impl GridGhost {
    /// Takes the first open direction of a random shuffle, then steps if that cell is open.
    ///
    /// With every neighbour walled off the ghost keeps its direction and stays where it is.
    pub fn step(&mut self, maze: &GridMaze, rng: &mut SmallRng) {
        let mut directions = Direction::DIRECTIONS;
        directions.shuffle(rng);
        if let Some(direction) = directions.iter().find(|d| maze.is_open(self.position + d.as_ivec2())) {
            self.direction = *direction;
        }

        let target = self.position + self.direction.as_ivec2();
        if maze.is_open(target) {
            self.position = target;
        }
    }
}

pub struct GridGame {
    maze: GridMaze,
    player: GridPlayer,
    player_start: IVec2,
    ghosts: Vec<GridGhost>,
    score: u32,
    lives: u8,
    pellets_left: usize,
    outcome: Option<GridOutcome>,
    /// Time spent showing the win message.
    win_elapsed: Duration,
    muted: bool,
    restart_requested: bool,
    rng: SmallRng,
}

impl GridGame {
    /// A fresh game on the default grid board.
    pub fn new(rng: SmallRng) -> GameResult<GridGame> {
        Self::with_maze(GridMaze::new()?, GRID_PLAYER_START, &GRID_GHOST_STARTS, rng)
    }

    pub fn with_maze(maze: GridMaze, player_start: IVec2, ghost_starts: &[IVec2], mut rng: SmallRng) -> GameResult<GridGame> {
        maze.validate_start(player_start)?;
        for start in ghost_starts {
            maze.validate_start(*start)?;
        }

        let ghosts = ghost_starts
            .iter()
            .map(|start| GridGhost {
                position: *start,
                direction: Direction::DIRECTIONS.choose(&mut rng).copied().unwrap_or_default(),
            })
            .collect();
        let pellets_left = maze.pellet_count();
        debug!(pellets = pellets_left, "Grid game created");

        Ok(GridGame {
            maze,
            player: GridPlayer {
                position: player_start,
                direction: IVec2::ZERO,
            },
            player_start,
            ghosts,
            score: 0,
            lives: GRID_LIVES,
            pellets_left,
            outcome: None,
            win_elapsed: Duration::ZERO,
            muted: false,
            restart_requested: false,
            rng,
        })
    }

    /// Applies a command. Returns true if the game should end.
    ///
    /// This variant plays no sound, so mute only flips the HUD marker. Pause is not supported and is ignored.
    /// Restart is recorded once the game is won or lost; see [`GridGame::restart_requested`].
    pub fn handle(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MovePlayer(direction) => {
                if self.outcome.is_none() {
                    self.player.direction = direction.as_ivec2();
                }
            }
            GameCommand::MuteAudio => self.muted = !self.muted,
            GameCommand::Exit => return true,
            GameCommand::Restart => {
                if self.outcome.is_some() {
                    self.restart_requested = true;
                }
            }
            GameCommand::TogglePause => {}
        }
        false
    }

    pub fn restart_requested(&self) -> bool {
        self.restart_requested
    }

    /// Runs one tick of the game.
    pub fn tick(&mut self) {
        match self.outcome {
            Some(GridOutcome::Won) => {
                self.win_elapsed += GRID_LOOP_TIME;
                return;
            }
            Some(GridOutcome::Lost) => return,
            None => {}
        }

        self.player.step(&self.maze);
        if self.maze.take_pellet(self.player.position) {
            self.score += PELLET_SCORE;
            self.pellets_left = self.pellets_left.saturating_sub(1);
        }

        for ghost in self.ghosts.iter_mut() {
            ghost.step(&self.maze, &mut self.rng);
            if ghost.position == self.player.position {
                self.lives = self.lives.saturating_sub(1);
                self.player.position = self.player_start;
                info!(lives = self.lives, "Caught by a ghost");
                if self.lives == 0 {
                    self.outcome = Some(GridOutcome::Lost);
                    info!(score = self.score, "Game over");
                    return;
                }
            }
        }

        if self.pellets_left == 0 {
            info!(score = self.score, "All pellets eaten");
            self.outcome = Some(GridOutcome::Won);
        }
    }

    /// True once a win has been on screen long enough.
    pub fn is_finished(&self) -> bool {
        self.outcome == Some(GridOutcome::Won) && self.win_elapsed >= GRID_WIN_HOLD
    }

    pub fn outcome(&self) -> Option<GridOutcome> {
        self.outcome
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    pub fn player(&self) -> &GridPlayer {
        &self.player
    }

    pub fn ghosts(&self) -> &[GridGhost] {
        &self.ghosts
    }

    pub fn maze(&self) -> &GridMaze {
        &self.maze
    }

    /// Fills `scene` with the current board, actors and HUD.
    pub fn draw(&self, scene: &mut Scene) {
        scene.clear();
        let size = self.maze.size();
        for y in 0..size.y as i32 {
            for x in 0..size.x as i32 {
                let glyph = match self.maze.cell(IVec2::new(x, y)) {
                    Some(MapTile::Wall) => Glyph::Wall,
                    Some(MapTile::Pellet) => Glyph::Pellet,
                    _ => Glyph::Empty,
                };
                scene.set(x as usize, y as usize, glyph);
            }
        }
        scene.set(self.player.position.x as usize, self.player.position.y as usize, Glyph::Player);
        for (index, ghost) in self.ghosts.iter().enumerate() {
            scene.set(ghost.position.x as usize, ghost.position.y as usize, Glyph::Ghost(index));
        }

        scene.score = self.score;
        scene.lives = self.lives;
        scene.muted = self.muted;
        scene.banner = match self.outcome {
            Some(GridOutcome::Won) => Some(Banner::YouWin),
            Some(GridOutcome::Lost) => Some(Banner::GameOver),
            None => None,
        };
    }

    pub fn scene(&self) -> Scene {
        let size = self.maze.size();
        let mut scene = Scene::new(size.x as usize, size.y as usize);
        self.draw(&mut scene);
        scene
    }
}
