use crate::GameState;
use crate::grid::{Cell, Coord, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Head,
    Body,
    Food,
}

impl Tile {
    /// Two columns per cell keeps the board roughly square in a terminal.
    fn glyph(self) -> &'static str {
        match self {
            Self::Empty => " .",
            Self::Head => "██",
            Self::Body => "▓▓",
            Self::Food => "()",
        }
    }
}

/// A lightweight "raster" of the board for text renderers.
/// Not used by the core tick logic.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    pub tiles: Vec<Tile>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            tiles: vec![Tile::Empty; grid.cell_count()],
        }
    }

    pub fn side(&self) -> Coord {
        self.grid.side()
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.grid.is_valid(cell) {
            return None;
        }
        let col = (cell.x - self.grid.min()) as usize;
        let row = (cell.z - self.grid.min()) as usize;
        Some(row * self.grid.side() as usize + col)
    }

    pub fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(i) = self.idx(cell) {
            self.tiles[i] = tile;
        }
    }

    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.idx(cell).map(|i| self.tiles[i])
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_text(self))
    }
}

pub fn rasterize_game(state: &GameState) -> Board {
    let mut board = Board::new(*state.grid());
    if let Some(food) = state.food() {
        board.set(food, Tile::Food);
    }
    for cell in state.snake().body() {
        board.set(*cell, Tile::Body);
    }
    board.set(state.head(), Tile::Head);
    board
}

/// Board as text, one line per z row, lowest z at the top.
pub fn render_text(board: &Board) -> String {
    board
        .tiles
        .chunks(board.side() as usize)
        .map(|row| row.iter().map(|t| t.glyph()).collect::<String>())
        .collect::<Vec<String>>()
        .join("\n")
}
