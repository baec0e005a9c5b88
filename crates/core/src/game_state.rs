//! Game state module - manages the complete game session
//!
//! This module ties together the board, the piece catalog, the injected random
//! source and the gravity gate. It owns the active piece and implements the
//! rules for spawning, moving, rotating, locking and clearing lines.
//!
//! Illegal moves and rotations are rejected silently: the call returns `false`
//! and nothing changes. The only terminal condition is game over, entered when
//! a freshly spawned piece would collide.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::board::Board;
use crate::gravity::GravityTimer;
use crate::pieces::{random_piece, template, transpose, PieceShape, PieceTemplate};
use crate::rng::RandomSource;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Active falling piece
///
/// Holds its own copy of the shape offsets, so rotation never reaches back
/// into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece from a catalog entry at the given anchor
    pub fn new(template: PieceTemplate, x: i8, y: i8) -> Self {
        Self {
            kind: template.kind,
            shape: template.shape,
            x,
            y,
        }
    }

    /// Absolute board coordinates of the 4 cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn color(&self) -> Rgb {
        template(self.kind).color
    }

    /// Check whether any cell collides with the walls, the floor or locked cells
    pub fn collides(&self, board: &Board) -> bool {
        self.cells().iter().any(|&(x, y)| board.collides_at(x, y))
    }

    fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    fn transposed(&self) -> Self {
        Self {
            shape: transpose(self.shape),
            ..*self
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// A piece is falling and accepts commands
    Falling,
    /// Terminal: a spawned piece collided
    GameOver,
}

/// Emitted after a piece locks (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cells written to the board (cells above the top edge are dropped)
    pub cells_locked: u8,
    pub lines_cleared: u32,
    pub score_awarded: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    rng: R,
    gravity: GravityTimer,
    score: u32,
    lines: u32,
    /// Monotonic count of successful spawns
    pieces_spawned: u32,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl<R: RandomSource> GameState<R> {
    /// Start a session with the reference rules
    pub fn new(rng: R) -> Self {
        Self::with_config(GameConfig::default(), rng, Instant::now())
    }

    /// Start a session with custom rules; `now` starts the gravity interval
    pub fn with_config(config: GameConfig, rng: R, now: Instant) -> Self {
        let board = Board::with_size(config.width, config.height);
        Self::from_board(config, board, rng, now)
    }

    /// Start a session on a pre-filled board.
    ///
    /// The board's dimensions take precedence over the ones in `config`.
    pub fn from_board(mut config: GameConfig, board: Board, rng: R, now: Instant) -> Self {
        config.width = board.width();
        config.height = board.height();
        config.spawn_x = config.spawn_x.clamp(0, board.width() as i8 - 1);

        let mut state = Self {
            config,
            board,
            active: None,
            rng,
            gravity: GravityTimer::new(config.fall_interval, now),
            score: 0,
            lines: 0,
            pieces_spawned: 0,
            game_over: false,
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Absolute cells of the active piece (for rendering)
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Falling
        }
    }

    pub fn gravity(&self) -> &GravityTimer {
        &self.gravity
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(Into::into);
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Check whether a piece would collide at its current position
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece.collides(&self.board)
    }

    /// Draw a new piece and place it at the spawn anchor.
    ///
    /// If the new piece collides the session ends; the board and the current
    /// active piece are left exactly as they were.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let piece = ActivePiece::new(random_piece(&mut self.rng), self.config.spawn_x, SPAWN_Y);

        if self.collides(&piece) {
            self.game_over = true;
            warn!(
                "game over: {} blocked at spawn, score {} after {} lines",
                piece.kind.as_str(),
                self.score,
                self.lines
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(
            "spawned {} at ({}, {})",
            piece.kind.as_str(),
            piece.x,
            piece.y
        );

        true
    }

    /// Try to shift the active piece; rejected moves leave it untouched
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.collides(&moved) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move the active piece one row down.
    ///
    /// If the row below is blocked the piece locks instead (followed by line
    /// clears and the next spawn) and this returns `false`. Soft drop and
    /// gravity both go through here.
    pub fn move_down(&mut self) -> bool {
        if self.game_over || self.active.is_none() {
            return false;
        }

        if self.try_move(0, 1) {
            return true;
        }

        self.lock_piece();
        false
    }

    /// Transpose the active piece's offsets; rejected rotations restore the
    /// previous offsets exactly.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.transposed();
        if self.collides(&rotated) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// Lock the active piece onto the board, clear lines, then spawn the next piece
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        let cells_locked = self.board.lock_cells(&active.cells(), active.kind);
        if cells_locked < active.shape.len() {
            debug!(
                "{} locked with {} cell(s) above the board",
                active.kind.as_str(),
                active.shape.len() - cells_locked
            );
        }

        let score_before = self.score;
        let lines_cleared = self.clear_lines();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            cells_locked: cells_locked as u8,
            lines_cleared,
            score_awarded: self.score - score_before,
        });

        self.spawn_piece();
    }

    /// Clear every full row, awarding the flat bonus per row
    fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows() as u32;
        if cleared > 0 {
            self.lines = self.lines.saturating_add(cleared);
            self.score = self
                .score
                .saturating_add(cleared.saturating_mul(self.config.line_clear_bonus));
            info!(
                "cleared {} line(s), score {} lines {}",
                cleared, self.score, self.lines
            );
        }
        cleared
    }

    /// Apply a single command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::Rotate => self.rotate(),
        }
    }

    /// Per-frame update: apply the commands received since the last frame,
    /// then run the gravity gate.
    ///
    /// Returns true if an automatic fall step ran (whether it moved the piece
    /// or locked it).
    pub fn update<I>(&mut self, now: Instant, actions: I) -> bool
    where
        I: IntoIterator<Item = GameAction>,
    {
        if self.game_over {
            return false;
        }

        for action in actions {
            self.apply_action(action);
        }

        self.tick(now)
    }

    /// Run the gravity gate alone
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.game_over {
            return false;
        }

        if !self.gravity.poll(now) {
            return false;
        }

        self.move_down();
        true
    }
}

impl Default for GameState<crate::rng::SimpleRng> {
    fn default() -> Self {
        Self::new(crate::rng::SimpleRng::default())
    }
}
