//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game. It has no
//! dependencies on terminals, input devices or rendering:
//!
//! - **Deterministic**: randomness is injected, time is passed in
//! - **Testable**: every rule is reachable from plain method calls
//! - **Portable**: any driver that can call [`GameState::update`] can host it
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision checks and line clearing
//! - [`game_state`]: the session: active piece, score, game-over, gravity
//! - [`gravity`]: the fixed-interval fall gate
//! - [`pieces`]: the seven-shape catalog and the rotation transform
//! - [`rng`]: injectable random sources
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Game Rules
//!
//! - A piece spawns one row above the board, centered; if it collides there the
//!   game is over
//! - Left/right/down moves and rotation are rejected silently when blocked
//! - Rotation swaps the column and row of each offset
//! - A piece that cannot move down locks; rows that fill are cleared for a
//!   flat bonus each
//! - Gravity moves the piece down once per fixed interval
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use blockfall_core::{GameState, SimpleRng};
//! use blockfall_types::{GameAction, GameConfig};
//!
//! let start = Instant::now();
//! let mut game = GameState::with_config(GameConfig::default(), SimpleRng::new(12345), start);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//!
//! // One second later gravity pulls the piece down a row.
//! let y = game.active().unwrap().y;
//! assert!(game.update(start + Duration::from_secs(1), [GameAction::SoftDrop]));
//! assert_eq!(game.active().unwrap().y, y + 2);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{ActivePiece, GamePhase, GameState, LockEvent};
pub use gravity::GravityTimer;
pub use pieces::{color_of, get_shape, random_piece, template, transpose, PieceTemplate, CATALOG};
pub use rng::{RandomSource, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
