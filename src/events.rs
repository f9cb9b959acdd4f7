use bevy_ecs::{entity::Entity, event::Event};

use crate::map::direction::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    MuteAudio,
    TogglePause,
    /// Start over after the game has been won or lost.
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The player's box overlapped a pellet, which has been despawned.
    PelletEaten(Entity),
    /// The player's box overlapped a ghost.
    GhostContact(Entity),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
