//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used by the rule engine, the input layer and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! Reference playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: column `width / 2 - 2`, one row above the board (`y = -1`)
//!
//! # Timing and Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 1000 | Fixed gravity interval |
//! | `LINE_CLEAR_BONUS` | 100 | Score per cleared row, no multiplier |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, GameAction, GameConfig, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let cell = Cell::Occupied(PieceKind::T);
//! assert!(cell.is_occupied());
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//!
//! let config = GameConfig::default();
//! assert_eq!(config.width, BOARD_WIDTH);
//! assert_eq!(config.height, BOARD_HEIGHT);
//! ```

use std::time::Duration;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval (1000ms = 1 row per second)
pub const FALL_INTERVAL_MS: u32 = 1000;

/// Score awarded per cleared row
pub const LINE_CLEAR_BONUS: u32 = 100;

/// Spawn anchor column for the reference board width
pub const SPAWN_X: i8 = spawn_column(BOARD_WIDTH);

/// Spawn anchor row: one row above the visible board
pub const SPAWN_Y: i8 = -1;

/// Smallest board edge that still fits every piece in both orientations.
pub const MIN_BOARD_EDGE: u8 = 4;

/// Largest board edge; keeps every piece coordinate well inside `i8`.
pub const MAX_BOARD_EDGE: u8 = 64;

/// Clamp a requested board edge into `MIN_BOARD_EDGE..=MAX_BOARD_EDGE`.
pub const fn clamp_board_edge(edge: u8) -> u8 {
    if edge < MIN_BOARD_EDGE {
        MIN_BOARD_EDGE
    } else if edge > MAX_BOARD_EDGE {
        MAX_BOARD_EDGE
    } else {
        edge
    }
}

/// Spawn anchor column for a board `width` cells wide.
pub const fn spawn_column(width: u8) -> i8 {
    (width / 2) as i8 - 2
}

/// The seven piece kinds of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Upper-case letter naming the kind, as drawn in the side panel.
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// The piece kind is the identity tag of whatever locked there; colors are
/// looked up from the piece catalog, so no color doubles as "empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind) => Some(*kind),
        }
    }
}

/// Discrete commands the driver forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    SoftDrop,
    /// Swap the column and row of every piece offset
    Rotate,
}

impl GameAction {
    /// Parse action from a camelCase or lowercase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveRight"), Some(GameAction::MoveRight));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
        }
    }
}

/// Game rules fixed at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub fall_interval: Duration,
    pub line_clear_bonus: u32,
    pub spawn_x: i8,
}

impl GameConfig {
    /// Reference rules on a board of the given size.
    ///
    /// Each edge is clamped into `MIN_BOARD_EDGE..=MAX_BOARD_EDGE`.
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = clamp_board_edge(width);
        let height = clamp_board_edge(height);
        Self {
            width,
            height,
            spawn_x: spawn_column(width),
            ..Self::default()
        }
    }

    pub fn with_fall_interval(mut self, fall_interval: Duration) -> Self {
        self.fall_interval = fall_interval;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            fall_interval: Duration::from_millis(FALL_INTERVAL_MS as u64),
            line_clear_bonus: LINE_CLEAR_BONUS,
            spawn_x: SPAWN_X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_size_clamps_edges() {
        let tall = GameConfig::with_size(10, 200);
        assert_eq!((tall.width, tall.height), (10, MAX_BOARD_EDGE));

        let empty = GameConfig::with_size(0, 0);
        assert_eq!((empty.width, empty.height), (MIN_BOARD_EDGE, MIN_BOARD_EDGE));
        assert_eq!(empty.spawn_x, 0);

        let wide = GameConfig::with_size(255, 20);
        assert_eq!(wide.width, MAX_BOARD_EDGE);
        assert_eq!(wide.spawn_x, spawn_column(MAX_BOARD_EDGE));
    }

    #[test]
    fn reference_constants() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!(FALL_INTERVAL_MS, 1000);
        assert_eq!(LINE_CLEAR_BONUS, 100);
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, -1);
    }

    #[test]
    fn piece_kind_index_matches_all() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn cell_default_is_empty() {
        assert_eq!(Cell::default(), Cell::Empty);
        assert_eq!(Cell::Empty.kind(), None);
        assert_eq!(Cell::Occupied(PieceKind::L).kind(), Some(PieceKind::L));
    }

    #[test]
    fn config_with_size_recenters_spawn() {
        let config = GameConfig::with_size(16, 30);
        assert_eq!(config.spawn_x, 6);
        assert_eq!(config.line_clear_bonus, LINE_CLEAR_BONUS);
        assert_eq!(config.fall_interval, Duration::from_millis(1000));
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
