use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tracing::{info, trace, warn};

use crate::audio::BellSink;
use crate::config::{Config, Variant};
use crate::constants::{GRID_LOOP_TIME, LOOP_TIME};
use crate::error::GameResult;
use crate::formatter;
use crate::game::Game;
use crate::gate::{CodeGate, GateOutcome};
use crate::grid::GridGame;
use crate::input::{gate_input, Bindings};
use crate::platform;
use crate::platform::terminal::{TerminalRenderer, TerminalSession};
use crate::scene::{Scene, Screen};

/// What currently owns the screen.
pub enum Mode {
    Gate(CodeGate),
    Pixel(Box<Game>),
    Grid { game: GridGame, scene: Scene },
}

/// The active mode and the moves between the code-entry screen and the games.
///
/// Knows nothing about the terminal: it takes key presses and hands out the next screen.
pub struct Flow {
    config: Config,
    mode: Mode,
    bindings: Bindings,
    final_score: Option<u32>,
}

impl Flow {
    /// Starts at the code-entry screen, or directly in a game when the gate is skipped.
    pub fn new(config: Config) -> GameResult<Flow> {
        let mode = if config.skip_gate {
            Self::start_game(&config)?
        } else {
            Mode::Gate(CodeGate::new())
        };
        Ok(Self::with_mode(config, mode))
    }

    pub fn with_mode(config: Config, mode: Mode) -> Flow {
        Flow {
            config,
            mode,
            bindings: Bindings::default(),
            final_score: None,
        }
    }

    fn start_game(config: &Config) -> GameResult<Mode> {
        let rng = platform::rng(config.seed);
        let mode = match config.variant {
            Variant::Pixel => Mode::Pixel(Box::new(Game::new(rng, Box::new(BellSink), config.muted)?)),
            Variant::Grid => {
                let game = GridGame::new(rng)?;
                let scene = game.scene();
                Mode::Grid { game, scene }
            }
        };
        info!(variant = %config.variant, "Game started");
        Ok(mode)
    }

    /// Leaves a finished game for the code-entry screen, or for a fresh game when the gate is skipped.
    pub fn restart(&mut self) -> GameResult<()> {
        info!(gate = !self.config.skip_gate, "Restarting");
        self.mode = if self.config.skip_gate {
            Self::start_game(&self.config)?
        } else {
            Mode::Gate(CodeGate::new())
        };
        Ok(())
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Score of the game that ended the run, if one did.
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn loop_time(&self) -> Duration {
        match self.mode {
            Mode::Grid { .. } => GRID_LOOP_TIME,
            _ => LOOP_TIME,
        }
    }

    /// Feeds one frame of key presses to the active mode and advances it by `loop_time`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` while the run continues, `Ok(false)` once it should exit.
    pub fn step(&mut self, keys: Vec<KeyEvent>, loop_time: Duration) -> GameResult<bool> {
        let mut start = false;
        let mut restart = false;

        let keep_running = match &mut self.mode {
            Mode::Gate(gate) => {
                gate.tick(loop_time);
                let mut outcome = GateOutcome::Pending;
                for input in keys.into_iter().filter_map(gate_input) {
                    outcome = gate.handle(input);
                    if outcome != GateOutcome::Pending {
                        break;
                    }
                }
                start = outcome == GateOutcome::Accepted;
                outcome != GateOutcome::Exit
            }
            Mode::Pixel(game) => {
                for command in keys.into_iter().filter_map(|key| self.bindings.command_for(key)) {
                    game.post(command);
                }
                let exit = game.tick();
                if exit {
                    self.final_score = Some(game.score());
                }
                restart = !exit && game.restart_requested();
                !exit
            }
            Mode::Grid { game, scene } => {
                let mut exit = false;
                for command in keys.into_iter().filter_map(|key| self.bindings.command_for(key)) {
                    exit |= game.handle(command);
                }
                game.tick();
                game.draw(scene);
                if exit || game.is_finished() {
                    self.final_score = Some(game.score());
                }
                restart = !exit && game.restart_requested();
                !exit && !game.is_finished()
            }
        };

        if start {
            self.mode = Self::start_game(&self.config)?;
        } else if restart {
            self.restart()?;
        }

        Ok(keep_running)
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.mode {
            Mode::Gate(gate) => Screen::Gate(gate.view()),
            Mode::Pixel(game) => Screen::Play(game.scene()),
            Mode::Grid { scene, .. } => Screen::Play(scene),
        }
    }
}

/// Main application wrapper that owns the terminal, the active mode and the loop timing.
pub struct App {
    flow: Flow,
    session: TerminalSession,
    renderer: TerminalRenderer,
}

impl App {
    pub fn new(config: Config) -> GameResult<Self> {
        info!(variant = %config.variant, skip_gate = config.skip_gate, seed = ?config.seed, "Initializing application");
        let session = TerminalSession::enter()?;

        Ok(App {
            flow: Flow::new(config)?,
            session,
            renderer: TerminalRenderer::new(),
        })
    }

    /// Final score, recorded when a game ends the run.
    pub fn final_score(&self) -> Option<u32> {
        self.flow.final_score()
    }

    /// Executes a single frame: reads keys, advances the active mode, draws, then sleeps out the rest of the frame.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the application should keep running, `Ok(false)` once it should exit.
    pub fn run(&mut self) -> GameResult<bool> {
        let start = Instant::now();
        let loop_time = self.flow.loop_time();
        formatter::increment_tick();

        let keys = self.session.read_keys()?;
        let keep_running = self.flow.step(keys, loop_time)?;

        if keep_running {
            self.draw();
        }

        if start.elapsed() < loop_time {
            let time = loop_time.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time);
            }
        } else {
            trace!(elapsed = ?start.elapsed(), budget = ?loop_time, "Frame overran its budget");
        }

        Ok(keep_running)
    }

    fn draw(&mut self) {
        if let Err(e) = self.renderer.draw(self.session.stdout(), self.flow.screen()) {
            warn!("Failed to draw frame: {}", e);
        }
    }
}
