//! A tiny terminal Pac-Man with a grid-stepping variant and a pixel-movement variant.

pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod gate;
pub mod grid;
pub mod input;
pub mod map;
pub mod platform;
pub mod scene;
pub mod systems;
