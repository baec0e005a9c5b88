//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::time::Instant;

use blockfall::core::{Board, GameState, RandomSource};
use blockfall::types::{GameConfig, PieceKind};

/// Hands out a fixed piece sequence, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct Scripted {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl Scripted {
    pub fn new(kinds: &[PieceKind]) -> Self {
        assert!(!kinds.is_empty());
        Self {
            kinds: kinds.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn next_range(&mut self, max: u32) -> u32 {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next += 1;
        kind.index() as u32 % max
    }
}

/// A session on `rows` (bottom-aligned, see [`Board::from_rows`]) that only deals `kinds`.
pub fn scripted_game(rows: &[&str], kinds: &[PieceKind], now: Instant) -> GameState<Scripted> {
    let config = GameConfig::default();
    let board = Board::from_rows(config.width, config.height, rows);
    GameState::from_board(config, board, Scripted::new(kinds), now)
}

/// Soft-drop until the active piece locks; returns the rows it fell.
pub fn drop_to_lock<R: RandomSource>(game: &mut GameState<R>) -> u32 {
    let mut fallen = 0;
    while game.move_down() {
        fallen += 1;
        assert!(fallen <= 64, "piece never locked");
    }
    fallen
}

/// Every active cell is inside the board horizontally, above the floor and
/// not on top of a locked cell.
pub fn assert_active_in_bounds<R: RandomSource>(game: &GameState<R>) {
    let board = game.board();
    if let Some(cells) = game.active_cells() {
        for (x, y) in cells {
            assert!(x >= 0 && x < board.width() as i8, "column {x} out of range");
            assert!(y < board.height() as i8, "row {y} below the floor");
            if y >= 0 {
                assert!(!board.is_occupied(x, y), "active cell ({x}, {y}) overlaps the stack");
            }
        }
    }
}
