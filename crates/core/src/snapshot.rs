use crate::game_state::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    /// Absolute board coordinates; rows may be negative while entering
    pub cells: [(i8, i8); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            cells: value.cells(),
        }
    }
}

/// Read-only copy of everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cells, `height * width` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell at (x, y); anything out of bounds reads as empty
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        if x >= self.width || y >= self.height {
            return Cell::Empty;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite one cell (handy for building render fixtures)
    pub fn set_cell(&mut self, x: u8, y: u8, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(slot) = self.board.get_mut(y as usize * self.width as usize + x as usize) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.board
            .resize(self.width as usize * self.height as usize, Cell::Empty);
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: Vec::new(),
            active: None,
            score: 0,
            lines: 0,
            game_over: false,
        };
        s.clear();
        s
    }
}
