//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic of the pixel variant, including components,
//! systems, and resources.

use bevy_ecs::event::EventReader;
use tracing::error;

use crate::error::GameError;

pub mod audio;
pub mod collision;
pub mod components;
pub mod ghost;
pub mod movement;
pub mod player;
pub mod render;
pub mod state;

/// Logs every error raised by a system during the tick.
pub fn error_reporting_system(mut errors: EventReader<GameError>) {
    for e in errors.read() {
        error!("System error: {}", e);
    }
}
