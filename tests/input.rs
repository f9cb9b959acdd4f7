use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minipac::events::GameCommand;
use minipac::input::{gate_input, Bindings, GateInput};
use minipac::map::direction::Direction;
use pretty_assertions::assert_eq;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_movement_bindings() {
    let bindings = Bindings::default();

    assert_eq!(bindings.command_for(key(KeyCode::Up)), Some(GameCommand::MovePlayer(Direction::Up)));
    assert_eq!(bindings.command_for(key(KeyCode::Char('a'))), Some(GameCommand::MovePlayer(Direction::Left)));
    assert_eq!(bindings.command_for(key(KeyCode::Char('S'))), Some(GameCommand::MovePlayer(Direction::Down)));
    assert_eq!(bindings.command_for(key(KeyCode::Right)), Some(GameCommand::MovePlayer(Direction::Right)));
}

#[test]
fn test_action_bindings() {
    let bindings = Bindings::default();

    assert_eq!(bindings.command_for(key(KeyCode::Char('p'))), Some(GameCommand::TogglePause));
    assert_eq!(bindings.command_for(key(KeyCode::Char('M'))), Some(GameCommand::MuteAudio));
    assert_eq!(bindings.command_for(key(KeyCode::Enter)), Some(GameCommand::Restart));
    assert_eq!(bindings.command_for(key(KeyCode::Esc)), Some(GameCommand::Exit));
    assert_eq!(bindings.command_for(key(KeyCode::Char('q'))), Some(GameCommand::Exit));
    assert_eq!(bindings.command_for(key(KeyCode::Char('z'))), None);
}

#[test]
fn test_ctrl_c_exits() {
    let bindings = Bindings::default();
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

    assert_eq!(bindings.command_for(ctrl_c), Some(GameCommand::Exit));
    assert_eq!(gate_input(ctrl_c), Some(GateInput::Exit));
}

#[test]
fn test_gate_input() {
    assert_eq!(gate_input(key(KeyCode::Char('R'))), Some(GateInput::Char('R')));
    assert_eq!(gate_input(key(KeyCode::Enter)), Some(GateInput::Submit));
    assert_eq!(gate_input(key(KeyCode::Backspace)), Some(GateInput::Backspace));
    assert_eq!(gate_input(key(KeyCode::Esc)), Some(GateInput::Exit));
    assert_eq!(gate_input(key(KeyCode::Up)), None);
}
