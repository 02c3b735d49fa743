use thiserror::Error;

use crate::grid::{Cell, Coord, Heading};

/// Errors raised when a [`GameConfig`](crate::GameConfig) cannot describe a playable board.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("field width must be a positive finite number, got {0}")]
    InvalidFieldWidth(f32),
    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),
    #[error("grid side {side} is too small, need at least {min} cells")]
    FieldTooSmall { side: i64, min: Coord },
    #[error("grid side {side} exceeds the maximum of {max} cells")]
    FieldTooLarge { side: i64, max: Coord },
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
}

/// Errors raised when an explicit starting layout is not a legal game state.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("snake cell {0:?} lies outside the grid")]
    SnakeOutOfBounds(Cell),
    #[error("snake occupies {0:?} more than once")]
    DuplicateSegment(Cell),
    #[error("snake cell {0:?} is not next to the segment ahead of it")]
    Disconnected(Cell),
    #[error("heading {0:?} points straight back into the neck")]
    HeadingIntoNeck(Heading),
    #[error("food cell {0:?} lies outside the grid")]
    FoodOutOfBounds(Cell),
    #[error("food cell {0:?} is occupied by the snake")]
    FoodOnSnake(Cell),
}
