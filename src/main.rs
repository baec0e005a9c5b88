//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `blockfall-term`. All game rules live in `blockfall-core`; this loop only
//! forwards commands, drives the per-frame update and draws snapshots.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, error, info};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{should_quit, InputHandler};
use blockfall::logging;
use blockfall::options::Options;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, GameConfig};

fn main() -> Result<()> {
    let options = Options::parse();
    let config = options.game_config()?;
    let _logger = logging::init(&options)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &options, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!("fatal error: {e:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, options: &Options, config: GameConfig) -> Result<()> {
    let mut game = GameState::with_config(config, options.rng(), Instant::now());
    info!(
        "new game: {}x{} board, fall every {:?}, seed {:?}, key events enhanced: {}",
        config.width,
        config.height,
        config.fall_interval,
        options.seed,
        term.key_events_enhanced()
    );

    let view = GameView::default();
    let mut input_handler = InputHandler::for_terminal(term.key_events_enhanced());
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut pending: Vec<GameAction> = Vec::with_capacity(64);

    let tick_duration = options.tick();
    let mut last_tick = Instant::now();
    let mut reported_game_over = false;

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!("quit at score {}", game.score());
                            return Ok(());
                        }
                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            pending.push(action);
                        }
                    }
                    KeyEventKind::Repeat => input_handler.handle_key_repeat(key.code),
                    KeyEventKind::Release => input_handler.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            pending.extend(input_handler.update(options.tick_ms));
            game.update(last_tick, pending.drain(..));

            if let Some(lock) = game.take_last_event() {
                debug!(
                    "locked {} ({} cells), cleared {} for {}",
                    lock.kind.as_str(),
                    lock.cells_locked,
                    lock.lines_cleared,
                    lock.score_awarded
                );
            }

            if game.game_over() && !reported_game_over {
                reported_game_over = true;
                info!(
                    "game over: score {}, lines {}, pieces {}",
                    game.score(),
                    game.lines(),
                    game.pieces_spawned()
                );
            }
        }
    }
}
