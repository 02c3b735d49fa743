use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::{
    Direction, GameConfig, GameObserver, GameOverReason, GameState, GameStatus, Heading, Input,
    rasterize_game, render_text,
};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Alignment,
    style::Stylize,
    widgets::{Block, Borders, Paragraph, Wrap},
};

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Snake on a square grid, one cell per tick")]
struct Cli {
    /// Width of the square field in world units
    #[arg(long, default_value_t = 12.0)]
    field_width: f32,

    /// Edge length of one cell in world units
    #[arg(long, default_value_t = 1.0)]
    cell_size: f32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Start moving immediately instead of waiting for the first key
    #[arg(long)]
    heading: Option<StartHeading>,

    /// Where to write the log (the terminal belongs to the game)
    #[arg(long, default_value = "grid-snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum StartHeading {
    Up,
    Down,
    Left,
    Right,
}

impl From<StartHeading> for Heading {
    fn from(h: StartHeading) -> Self {
        let dir = match h {
            StartHeading::Up => Direction::Up,
            StartHeading::Down => Direction::Down,
            StartHeading::Left => Direction::Left,
            StartHeading::Right => Direction::Right,
        };
        dir.into()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?,
    )
    .context("Failed to initialize logger")?;

    let cfg = GameConfig {
        field_width: cli.field_width,
        cell_size: cli.cell_size,
        tick_millis: cli.tick_ms,
        start_heading: cli.heading.map(Heading::from),
    };
    let game = match cli.seed {
        Some(seed) => GameState::with_seed(cfg, seed),
        None => GameState::new(cfg),
    }
    .context("Invalid game configuration")?;
    info!("starting on a {0}x{0} grid", game.grid().side());

    // --- Init terminal ---
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let res = run(&mut terminal, game);

    // --- Restore terminal even on error ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Presentation-side reactions to game events.
#[derive(Default)]
struct Hud {
    message: Option<String>,
}

impl GameObserver for Hud {
    fn on_food_eaten(&mut self, score: u32) {
        self.message = Some(format!("Yum! Snake length: {score}"));
    }

    fn on_game_over(&mut self, reason: GameOverReason, score: u32) {
        let cause = match reason {
            GameOverReason::OutOfBounds => "hit the wall",
            GameOverReason::SelfCollision => "bit itself",
        };
        info!("player lost: {cause}");
        self.message = Some(format!("Game Over! Snake {cause}. Snake length: {score}"));
    }

    fn on_board_full(&mut self, score: u32) {
        self.message = Some(format!("You filled the board! Snake length: {score}"));
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut game: GameState) -> Result<()> {
    let tick_rate = game.config().tick_period()?;
    let mut last_tick = Instant::now();
    let mut hud = Hud::default();

    loop {
        // --- Input (non-blocking) ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key) {
                        KeyAction::Quit => break,
                        KeyAction::Game(input) => {
                            if input == Input::Reset {
                                hud.message = None;
                            }
                            game.handle_with(input, &mut hud);
                        }
                        KeyAction::Ignore => {}
                    }
                }
            }
        }

        // --- Tick ---
        if last_tick.elapsed() >= tick_rate {
            game.handle_with(Input::Tick, &mut hud);
            last_tick = Instant::now();
        }

        // --- Render ---
        terminal.draw(|f| {
            let area = f.area();

            let status = match game.status() {
                GameStatus::Running => "hjkl/arrows to steer",
                GameStatus::GameOver(_) => "r to restart, q to quit",
                GameStatus::Won => "r to play again, q to quit",
            };
            let title = format!(" Snake length: {}  •  {} ", game.score(), status);

            let mut text = render_text(&rasterize_game(&game));
            if let Some(msg) = &hud.message {
                text.push('\n');
                text.push_str(msg);
            }

            let block = Block::default().borders(Borders::ALL).title(title.bold());

            let (outer_w, outer_h) = frame_size(game.grid().side(), hud.message.as_deref());

            // Center the frame within the terminal area.
            let x = area.x.saturating_add(area.width.saturating_sub(outer_w) / 2);
            let y = area.y.saturating_add(area.height.saturating_sub(outer_h) / 2);
            let frame_area = ratatui::layout::Rect::new(x, y, outer_w, outer_h).intersection(area);

            let para = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: false });

            f.render_widget(para, frame_area);
        })?;
    }

    info!("quit with {:?}", game.result());
    Ok(())
}

/// Outer frame for the board: two columns per cell plus the border, one
/// extra row for messages, and wide enough that a message never wraps.
fn frame_size(side: i32, message: Option<&str>) -> (u16, u16) {
    let side = u16::try_from(side).unwrap_or(u16::MAX);
    let board_w = side.saturating_mul(2);
    let msg_w = message.map_or(0, |m| m.chars().count());
    let inner_w = board_w.max(u16::try_from(msg_w).unwrap_or(u16::MAX));
    (inner_w.saturating_add(2), side.saturating_add(3))
}

enum KeyAction {
    Quit,
    Game(Input),
    Ignore,
}

fn map_key(key: KeyEvent) -> KeyAction {
    let dir = |d| KeyAction::Game(Input::Direction(d));
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char('k') | KeyCode::Up => dir(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => dir(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => dir(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => dir(Direction::Right),

        KeyCode::Char('r') => KeyAction::Game(Input::Reset),

        _ => KeyAction::Ignore,
    }
}
