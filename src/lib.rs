pub mod border;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod paint;
pub mod scheduler;
pub mod snake;
pub mod term;

/// Render-surface (terminal cell) unit.
pub type TermInt = u16;

/// Field unit. Signed so a step off the edge can be represented before wrapping.
pub type FieldInt = i16;

pub use grid::{Coords, Direction, Field};
