use std::collections::HashSet;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod render;
pub mod snake;

pub use config::GameConfig;
pub use error::{ConfigError, LayoutError};
pub use food::place_food;
pub use grid::{Cell, Coord, Grid, Heading};
pub use render::{Board, Tile, rasterize_game, render_text};
pub use snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfBounds,
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameOverReason),
    /// The snake covers the whole board; there is nowhere left for food.
    Won,
}

impl GameStatus {
    /// Terminal states accept no further ticks until a reset.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Final (or current) outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub status: GameStatus,
    /// Food eaten so far, which is also the number of body segments.
    pub score: u32,
}

/// UI-agnostic result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub ate_food: bool,
    pub status: GameStatus,
    pub score: u32,
}

/// Inbound events, processed strictly in the order they are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    Tick,
    Reset,
}

/// Side-effect hooks for a presentation layer (sound, score display, ...).
pub trait GameObserver {
    fn on_food_eaten(&mut self, _score: u32) {}
    fn on_game_over(&mut self, _reason: GameOverReason, _score: u32) {}
    fn on_board_full(&mut self, _score: u32) {}
}

impl GameObserver for () {}

#[derive(Debug)]
pub struct GameState {
    cfg: GameConfig,
    grid: Grid,
    snake: Snake,
    /// `None` only once the board is full.
    food: Option<Cell>,
    rng: ChaCha8Rng,
    status: GameStatus,
    score: u32,
}

impl GameState {
    pub fn with_seed(cfg: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a new game drawing every random choice from `rng`.
    pub fn with_rng(cfg: GameConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        let grid = cfg.validate()?;
        let origin = Cell::new(0, 0);
        let mut game = Self {
            snake: Snake::new(origin, cfg.start_heading),
            cfg,
            grid,
            food: None,
            rng,
            status: GameStatus::Running,
            score: 0,
        };
        game.reset();
        Ok(game)
    }

    /// Create a new game with non-deterministic seed
    pub fn new(cfg: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, ChaCha8Rng::from_os_rng())
    }

    /// Start from an explicit snake and food placement.
    ///
    /// The score starts at the snake's body length. Later food placements and
    /// resets draw from `seed`.
    pub fn from_layout(
        cfg: GameConfig,
        snake: Snake,
        food: Cell,
        seed: u64,
    ) -> Result<Self, LayoutError> {
        let grid = cfg.validate()?;
        let mut seen = HashSet::new();
        let mut ahead: Option<Cell> = None;
        for cell in snake.cells() {
            if !grid.is_valid(cell) {
                return Err(LayoutError::SnakeOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(LayoutError::DuplicateSegment(cell));
            }
            if ahead.is_some_and(|prev| !prev.is_adjacent(cell)) {
                return Err(LayoutError::Disconnected(cell));
            }
            ahead = Some(cell);
        }
        if let (Some(heading), Some(&neck)) = (snake.heading(), snake.body().next()) {
            if snake.head().step(heading) == neck {
                return Err(LayoutError::HeadingIntoNeck(heading));
            }
        }
        if !grid.is_valid(food) {
            return Err(LayoutError::FoodOutOfBounds(food));
        }
        if seen.contains(&food) {
            return Err(LayoutError::FoodOnSnake(food));
        }

        Ok(Self {
            score: (snake.len() - 1) as u32,
            cfg,
            grid,
            snake,
            food: Some(food),
            rng: ChaCha8Rng::seed_from_u64(seed),
            status: GameStatus::Running,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn result(&self) -> GameResult {
        GameResult {
            status: self.status,
            score: self.score,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    /// Occupied cells, head first.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.cells()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Request a direction change for the next tick.
    /// Returns false if it was ignored as a reversal (or changed nothing).
    pub fn queue_direction(&mut self, dir: Direction) -> bool {
        self.snake.set_heading(dir.into())
    }

    /// Resets snake, food, status, and score.
    pub fn reset(&mut self) {
        self.status = GameStatus::Running;
        self.score = 0;
        let head = self.grid.random_cell(&mut self.rng);
        self.snake = Snake::new(head, self.cfg.start_heading);
        self.food = None;
        self.relocate_food(&mut ());
        info!("new game: head at {head:?}, food at {:?}", self.food);
    }

    pub fn handle(&mut self, input: Input) -> TickResult {
        self.handle_with(input, &mut ())
    }

    /// Apply one inbound event and report the state afterwards.
    pub fn handle_with(&mut self, input: Input, observer: &mut impl GameObserver) -> TickResult {
        match input {
            Input::Direction(dir) => {
                self.queue_direction(dir);
            }
            Input::Tick => return self.tick_with(observer),
            Input::Reset => self.reset(),
        }
        self.tick_result(false)
    }

    pub fn tick(&mut self) -> TickResult {
        self.tick_with(&mut ())
    }

    /// Advance the game by one tick.
    ///
    /// Bounds and body are checked against the proposed head before anything
    /// moves, so a losing tick leaves the snake exactly where it was.
    pub fn tick_with(&mut self, observer: &mut impl GameObserver) -> TickResult {
        if self.status.is_terminal() {
            return self.tick_result(false);
        }

        // Not moving until the first direction arrives.
        let Some(next_head) = self.snake.next_head() else {
            return self.tick_result(false);
        };

        if !self.grid.is_valid(next_head) {
            self.finish(GameOverReason::OutOfBounds, observer);
            return self.tick_result(false);
        }

        if self.snake.body_contains(next_head) {
            self.finish(GameOverReason::SelfCollision, observer);
            return self.tick_result(false);
        }

        self.snake.advance(next_head);

        let ate_food = self.food == Some(next_head);
        if ate_food {
            self.snake.grow();
            self.score += 1;
            debug!("food eaten at {next_head:?}, score {}", self.score);
            observer.on_food_eaten(self.score);
            self.relocate_food(observer);
        }

        self.tick_result(ate_food)
    }

    fn tick_result(&self, ate_food: bool) -> TickResult {
        TickResult {
            ate_food,
            status: self.status,
            score: self.score,
        }
    }

    fn finish(&mut self, reason: GameOverReason, observer: &mut impl GameObserver) {
        self.status = GameStatus::GameOver(reason);
        info!(
            "game over ({reason:?}) with head at {:?}, score {}",
            self.snake.head(),
            self.score
        );
        observer.on_game_over(reason, self.score);
    }

    fn relocate_food(&mut self, observer: &mut impl GameObserver) {
        let occupied: HashSet<Cell> = self.snake.cells().collect();
        self.food = place_food(&self.grid, &occupied, &mut self.rng);
        match self.food {
            Some(cell) => debug!("food placed at {cell:?}"),
            None => {
                self.status = GameStatus::Won;
                info!("board full, score {}", self.score);
                observer.on_board_full(self.score);
            }
        }
    }
}
