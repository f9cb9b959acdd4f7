//! Platform abstraction layer: timing, randomness, logging setup and the terminal.

mod desktop;
pub use desktop::*;

pub mod terminal;
pub mod tracing_buffer;
