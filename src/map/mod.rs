//! This module defines the game maps, their parsing, and wall geometry.

pub mod builder;
pub mod direction;
pub mod parser;
pub mod rect;
