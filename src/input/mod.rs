//! Keyboard handling: maps terminal key presses to game commands and gate input.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{events::GameCommand, map::direction::Direction};

/// What a key press means on the code-entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateInput {
    Char(char),
    Backspace,
    Submit,
    Exit,
}

#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<KeyCode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(KeyCode::Up, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(KeyCode::Char('w'), GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(KeyCode::Down, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(KeyCode::Char('s'), GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(KeyCode::Left, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(KeyCode::Char('a'), GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(KeyCode::Right, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(KeyCode::Char('d'), GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert(KeyCode::Char('p'), GameCommand::TogglePause);
        key_bindings.insert(KeyCode::Char('m'), GameCommand::MuteAudio);
        key_bindings.insert(KeyCode::Enter, GameCommand::Restart);
        key_bindings.insert(KeyCode::Esc, GameCommand::Exit);
        key_bindings.insert(KeyCode::Char('q'), GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    /// The command bound to a key press, if any. Letter keys match regardless of case, and Ctrl+C always exits.
    pub fn command_for(&self, key: KeyEvent) -> Option<GameCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(GameCommand::Exit);
        }
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        let command = self.key_bindings.get(&code).copied();
        if let Some(command) = command {
            tracing::debug!("triggering command: {:?}", command);
        }
        command
    }
}

/// Translates a key press on the code-entry screen. Only printable characters are typed.
pub fn gate_input(key: KeyEvent) -> Option<GateInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GateInput::Exit);
    }
    match key.code {
        KeyCode::Enter => Some(GateInput::Submit),
        KeyCode::Backspace => Some(GateInput::Backspace),
        KeyCode::Esc => Some(GateInput::Exit),
        KeyCode::Char(c) if !c.is_control() => Some(GateInput::Char(c)),
        _ => None,
    }
}
