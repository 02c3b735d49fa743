use std::time::Duration;

use crate::error::ConfigError;
use crate::grid::{Grid, Heading};

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Width of the square playing field in world units.
    pub field_width: f32,
    /// Edge length of one cell in world units.
    pub cell_size: f32,
    /// Fixed period between ticks, in milliseconds.
    pub tick_millis: u64,
    /// Heading the snake starts with. `None` keeps it still until the first input.
    pub start_heading: Option<Heading>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 12.0,
            cell_size: 1.0,
            tick_millis: 250,
            start_heading: None,
        }
    }
}

impl GameConfig {
    /// Grid described by `field_width / cell_size`.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::from_field(self.field_width, self.cell_size)
    }

    pub fn tick_period(&self) -> Result<Duration, ConfigError> {
        if self.tick_millis == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(Duration::from_millis(self.tick_millis))
    }

    /// Check every field, returning the grid on success.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        self.tick_period()?;
        self.grid()
    }
}
