//! Terminal backend: owns raw mode and the alternate screen, reads keys and draws screens.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use thousands::Separable;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::constants::WIN_BANNER;
use crate::error::PlatformError;
use crate::scene::{Banner, GateView, Glyph, Scene, Screen};
use crate::systems::state::WinAnimation;

/// Terminal columns per board cell, so cells come out roughly square.
const CELL_W: usize = 2;

/// Colors cycled through by the win banner.
pub const CELEBRATION_PALETTE: [Color; 7] = [
    Color::Red,
    Color::Rgb { r: 255, g: 165, b: 0 },
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Raw mode and the alternate screen, restored on drop.
pub struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    pub fn enter() -> Result<Self, PlatformError> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().map_err(|e| PlatformError::TerminalInit(format!("Failed to enable raw mode: {}", e)))?;
        stdout
            .execute(EnterAlternateScreen)
            .and_then(|s| s.execute(Hide))
            .map_err(|e| PlatformError::TerminalInit(format!("Failed to enter the alternate screen: {}", e)))?;
        debug!("Terminal session started");
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    /// Drains every pending key press without blocking.
    pub fn read_keys(&mut self) -> io::Result<Vec<KeyEvent>> {
        let mut keys = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    text: &'static str,
    color: Color,
}

fn glyph_cell(glyph: Glyph) -> Cell {
    match glyph {
        Glyph::Empty => Cell {
            text: "  ",
            color: Color::Reset,
        },
        Glyph::Wall => Cell {
            text: "██",
            color: Color::Blue,
        },
        Glyph::Pellet => Cell {
            text: "· ",
            color: Color::White,
        },
        Glyph::Player => Cell {
            text: "◖◗",
            color: Color::Yellow,
        },
        Glyph::Ghost(_) => Cell {
            text: "ᗣ ",
            color: Color::Red,
        },
    }
}

/// Spreads the letters of `text` apart by `gap` spaces.
pub fn spaced(text: &str, gap: usize) -> String {
    let separator = " ".repeat(gap);
    text.chars().map(String::from).collect::<Vec<_>>().join(&separator)
}

/// The text and color of a banner.
pub fn banner_line(banner: Banner) -> (String, Color) {
    match banner {
        Banner::Paused => ("PAUSED".to_string(), Color::White),
        Banner::GameOver => ("GAME OVER Press Enter to Restart".to_string(), Color::Red),
        Banner::YouWin => ("You Win!".to_string(), Color::Yellow),
        Banner::Celebration(animation) => celebration_line(animation),
    }
}

fn celebration_line(animation: WinAnimation) -> (String, Color) {
    let gap = (animation.scale() - 1.0).round() as usize;
    let color = CELEBRATION_PALETTE[animation.color_index(CELEBRATION_PALETTE.len())];
    (spaced(WIN_BANNER, gap), color)
}

/// The HUD line under the board.
pub fn hud_line(scene: &Scene) -> String {
    let mut hud = format!("Score: {}  Lives: {}", scene.score.separate_with_commas(), scene.lives);
    if scene.muted {
        hud.push_str("  [muted]");
    }
    hud
}

/// Draws screens, only touching the cells that changed since the previous frame.
#[derive(Default)]
pub struct TerminalRenderer {
    last: Vec<Option<Cell>>,
    last_width: usize,
    last_lines: Vec<String>,
    origin: (u16, u16),
    needs_full: bool,
    showing_gate: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            needs_full: true,
            ..Self::default()
        }
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, screen: Screen<'_>) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        match screen {
            Screen::Gate(view) => {
                if !self.showing_gate {
                    self.needs_full = true;
                    self.showing_gate = true;
                }
                self.draw_gate(out, view, (term_w, term_h))?;
            }
            Screen::Play(scene) => {
                if self.showing_gate {
                    self.needs_full = true;
                    self.showing_gate = false;
                }
                self.draw_scene(out, scene, (term_w, term_h))?;
            }
        }
        out.flush()
    }

    fn draw_gate<W: Write>(&mut self, out: &mut W, view: GateView<'_>, (term_w, term_h): (u16, u16)) -> io::Result<()> {
        let lines = vec![
            "Enter Code:".to_string(),
            format!("{}_", view.input),
            view.error.unwrap_or_default().to_string(),
        ];
        if !self.needs_full && lines == self.last_lines {
            return Ok(());
        }

        out.queue(Clear(ClearType::All))?;
        let top = term_h.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let x = term_w.saturating_sub(UnicodeWidthStr::width(line.as_str()) as u16) / 2;
            let color = if i == 2 { Color::Red } else { Color::Yellow };
            out.queue(MoveTo(x, top + i as u16))?
                .queue(SetForegroundColor(color))?
                .queue(Print(line))?
                .queue(ResetColor)?;
        }
        self.last_lines = lines;
        self.needs_full = false;
        Ok(())
    }

    fn draw_scene<W: Write>(&mut self, out: &mut W, scene: &Scene, (term_w, term_h): (u16, u16)) -> io::Result<()> {
        let needed_w = (scene.width() * CELL_W) as u16;
        let needed_h = scene.height() as u16 + 2;
        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?.queue(Clear(ClearType::All))?.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            self.needs_full = true;
            return Ok(());
        }

        let origin = ((term_w - needed_w) / 2, (term_h - needed_h) / 2);
        if self.needs_full || origin != self.origin || scene.width() != self.last_width {
            out.queue(Clear(ClearType::All))?;
            self.origin = origin;
            self.last_width = scene.width();
            self.last = vec![None; scene.width() * scene.height()];
            self.last_lines.clear();
        }
        self.last.resize(scene.width() * scene.height(), None);

        for (y, row) in scene.rows().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                let cell = glyph_cell(*glyph);
                let index = y * scene.width() + x;
                if self.last[index] != Some(cell) {
                    self.last[index] = Some(cell);
                    let at = (self.origin.0 + (x * CELL_W) as u16, self.origin.1 + y as u16);
                    draw_cell(out, at, cell)?;
                }
            }
        }

        let banner = scene.banner.map(banner_line);
        let lines = vec![
            hud_line(scene),
            banner.as_ref().map(|(text, _)| text.clone()).unwrap_or_default(),
        ];
        if lines != self.last_lines {
            let hud_y = self.origin.1 + scene.height() as u16;
            out.queue(MoveTo(self.origin.0, hud_y))?
                .queue(Clear(ClearType::CurrentLine))?
                .queue(SetForegroundColor(Color::White))?
                .queue(Print(&lines[0]))?
                .queue(MoveTo(0, hud_y + 1))?
                .queue(Clear(ClearType::CurrentLine))?;
            if let Some((text, color)) = &banner {
                let x = term_w.saturating_sub(UnicodeWidthStr::width(text.as_str()) as u16) / 2;
                out.queue(MoveTo(x, hud_y + 1))?
                    .queue(SetForegroundColor(*color))?
                    .queue(Print(text))?;
            }
            out.queue(ResetColor)?;
            self.last_lines = lines;
        }

        self.needs_full = false;
        Ok(())
    }
}

fn draw_cell<W: Write>(out: &mut W, (x, y): (u16, u16), cell: Cell) -> io::Result<()> {
    out.queue(MoveTo(x, y))?
        .queue(SetForegroundColor(cell.color))?
        .queue(Print(cell.text))?;
    let width = UnicodeWidthStr::width(cell.text);
    for _ in width..CELL_W {
        out.queue(Print(' '))?;
    }
    out.queue(ResetColor)?;
    Ok(())
}
