//! Held-key input handler for terminal environments.
//!
//! Movement keys are level-triggered: the first press acts at once and a held
//! key keeps repeating (after a delay, at a fixed rate). Rotation is
//! edge-triggered: one rotation per physical press, however long the key is
//! held. Terminals that never emit release events are handled with a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;
use log::trace;

use crate::map::action_for_code;
use crate::types::GameAction;

/// Delay before a held movement key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeats of a held movement key.
pub const DEFAULT_REPEAT_RATE_MS: u32 = 50;

/// Soft drop repeats with no initial delay.
pub const SOFT_DROP_REPEAT_DELAY_MS: u32 = 0;

/// Interval between soft drop repeats.
pub const SOFT_DROP_REPEAT_RATE_MS: u32 = 50;

// Without key-release events, a movement key counts as released once no press
// for it has been seen for this long. Short, so a tap never turns into a hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Without key-release events, rotate stays held this long after its last
/// press. Must outlast the OS auto-repeat delay (commonly 250-600 ms), whose
/// first repeat arrives as a fresh press.
pub const LEGACY_ROTATE_RELEASE_TIMEOUT_MS: u32 = 650;

/// With key-release events the timeout only guards against a lost release; it
/// must outlast the delay before the first `Repeat` event.
pub const ENHANCED_KEY_RELEASE_TIMEOUT_MS: u32 = 1000;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks held keys and turns them into per-tick commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    rotate_held: bool,
    last_key_time: Instant,
    last_rotate_time: Instant,
    horizontal_delay_timer: u32,
    down_delay_timer: u32,
    horizontal_repeat_accumulator: u32,
    down_repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
    rotate_release_timeout_ms: u32,
}

impl InputHandler {
    /// Handler tuned for terminals without key-release events.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_RATE_MS)
    }

    /// Handler tuned for what the terminal reports: with `release_events` the
    /// timeouts only cover lost releases.
    pub fn for_terminal(release_events: bool) -> Self {
        let handler = Self::new();
        if release_events {
            handler
                .with_key_release_timeout_ms(ENHANCED_KEY_RELEASE_TIMEOUT_MS)
                .with_rotate_release_timeout_ms(ENHANCED_KEY_RELEASE_TIMEOUT_MS)
        } else {
            handler
        }
    }

    pub fn with_config(repeat_delay: u32, repeat_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            rotate_held: false,
            last_key_time: now,
            last_rotate_time: now,
            horizontal_delay_timer: 0,
            down_delay_timer: 0,
            horizontal_repeat_accumulator: 0,
            down_repeat_accumulator: 0,
            repeat_delay,
            // A zero rate would never drain the accumulator.
            repeat_rate: repeat_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            rotate_release_timeout_ms: LEGACY_ROTATE_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn with_rotate_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.rotate_release_timeout_ms = timeout_ms;
        self
    }

    pub fn rotate_release_timeout_ms(&self) -> u32 {
        self.rotate_release_timeout_ms
    }

    /// Handle a key press. Returns the action to apply immediately, if any.
    ///
    /// A press of a key that is already held is treated as a repeat.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match action_for_code(code)? {
            GameAction::MoveLeft => self.press_horizontal(HorizontalDirection::Left),
            GameAction::MoveRight => self.press_horizontal(HorizontalDirection::Right),
            GameAction::SoftDrop => {
                self.last_key_time = Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_delay_timer = 0;
                    self.down_repeat_accumulator = 0;
                    Some(GameAction::SoftDrop)
                }
            }
            GameAction::Rotate => {
                self.last_rotate_time = Instant::now();
                if self.rotate_held {
                    trace!("rotate ignored: key still held");
                    None
                } else {
                    self.rotate_held = true;
                    Some(GameAction::Rotate)
                }
            }
        }
    }

    /// Handle a terminal auto-repeat event: keeps the key held, never acts.
    pub fn handle_key_repeat(&mut self, code: KeyCode) {
        match action_for_code(code) {
            Some(GameAction::Rotate) => self.last_rotate_time = Instant::now(),
            Some(_) => self.last_key_time = Instant::now(),
            None => {}
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_code(code) {
            Some(GameAction::MoveLeft) => self.release_horizontal(HorizontalDirection::Left),
            Some(GameAction::MoveRight) => self.release_horizontal(HorizontalDirection::Right),
            Some(GameAction::SoftDrop) => {
                self.down_held = false;
                self.down_delay_timer = 0;
                self.down_repeat_accumulator = 0;
            }
            Some(GameAction::Rotate) => self.rotate_held = false,
            None => {}
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameAction> {
        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_delay_timer = 0;
        self.horizontal_repeat_accumulator = 0;
        match direction {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    fn release_horizontal(&mut self, direction: HorizontalDirection) {
        if self.horizontal == direction {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_delay_timer = 0;
            self.horizontal_repeat_accumulator = 0;
        }
    }

    fn timed_out(since: Instant, timeout_ms: u32) -> bool {
        since.elapsed() > Duration::from_millis(timeout_ms as u64)
    }

    /// Advance held-key timers by one tick and collect the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        if Self::timed_out(self.last_key_time, self.key_release_timeout_ms) {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal(self.horizontal);
            }
            if self.down_held {
                self.down_held = false;
                self.down_delay_timer = 0;
                self.down_repeat_accumulator = 0;
            }
        }
        if self.rotate_held
            && Self::timed_out(self.last_rotate_time, self.rotate_release_timeout_ms)
        {
            self.rotate_held = false;
        }

        let horizontal_action = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = horizontal_action {
            let repeats = repeats_due(
                &mut self.horizontal_delay_timer,
                &mut self.horizontal_repeat_accumulator,
                elapsed_ms,
                self.repeat_delay,
                self.repeat_rate,
            );
            for _ in 0..repeats {
                let _ = actions.try_push(action);
            }
        }

        if self.down_held {
            let repeats = repeats_due(
                &mut self.down_delay_timer,
                &mut self.down_repeat_accumulator,
                elapsed_ms,
                SOFT_DROP_REPEAT_DELAY_MS,
                SOFT_DROP_REPEAT_RATE_MS,
            );
            for _ in 0..repeats {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        let now = Instant::now();
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.rotate_held = false;
        self.last_key_time = now;
        self.last_rotate_time = now;
        self.horizontal_delay_timer = 0;
        self.down_delay_timer = 0;
        self.horizontal_repeat_accumulator = 0;
        self.down_repeat_accumulator = 0;
    }
}

/// Advance a delay timer and repeat accumulator; returns how many repeats fell due.
fn repeats_due(
    delay_timer: &mut u32,
    accumulator: &mut u32,
    elapsed_ms: u32,
    delay: u32,
    rate: u32,
) -> u32 {
    let prev = *delay_timer;
    *delay_timer = delay_timer.saturating_add(elapsed_ms);
    if *delay_timer < delay {
        return 0;
    }

    // Only the time past the delay counts toward the first repeat.
    let excess = if prev < delay {
        *delay_timer - delay
    } else {
        elapsed_ms
    };
    *accumulator += excess;

    let repeats = *accumulator / rate;
    *accumulator %= rate;
    repeats
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
