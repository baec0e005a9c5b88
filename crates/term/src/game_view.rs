//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests.

use crate::core::{color_of, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the playfield inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Draws the playfield, the side panel and the game-over overlay.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const GRID_DOT: CellStyle = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAYFIELD_BG).dim();
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const OVERLAY: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

/// Where the framed playfield sits for one frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 evens out the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into `fb`, resizing it to the viewport first.
    ///
    /// Reusing one framebuffer across frames keeps the loop allocation-free
    /// unless the terminal grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame_for(snap, viewport);
        self.draw_border(fb, frame);

        for y in 0..snap.height {
            for x in 0..snap.width {
                let (ch, style) = match snap.cell(x, y).kind() {
                    Some(kind) => ('█', block_style(kind)),
                    None => ('·', GRID_DOT),
                };
                self.paint_cell(fb, frame, x as u16, y as u16, ch, style);
            }
        }

        // Cells still above the board are not drawn.
        if let Some(active) = snap.active {
            let style = block_style(active.kind);
            for (x, y) in active.cells {
                if (0..snap.width as i8).contains(&x) && (0..snap.height as i8).contains(&y) {
                    self.paint_cell(fb, frame, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            draw_centered(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame_for(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.width as u16 * self.cell_w).saturating_add(2);
        let h = (snap.height as u16 * self.cell_h).saturating_add(2);
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', BORDER);
            fb.put_char(x, bottom, '─', BORDER);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', BORDER);
            fb.put_char(right, y, '│', BORDER);
        }
        fb.put_char(f.x, f.y, '┌', BORDER);
        fb.put_char(right, f.y, '┐', BORDER);
        fb.put_char(f.x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
    }

    fn paint_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x + 1 + x * self.cell_w;
        let py = f.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if viewport.width.saturating_sub(x) < PANEL_MIN_WIDTH {
            return;
        }

        let mut y = f.y;
        for (label, value) in [("SCORE", snap.score), ("LINES", snap.lines)] {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        }

        if let Some(active) = snap.active {
            fb.put_str(x, y, "PIECE", LABEL);
            let style = CellStyle {
                fg: color_of(active.kind),
                ..VALUE
            };
            fb.put_char(x, y.saturating_add(1), active.kind.symbol(), style);
            y = y.saturating_add(3);
        }

        let help = VALUE.dim();
        fb.put_str(x, y, "←→ move  ↓ drop", help);
        fb.put_str(x, y.saturating_add(1), "↑ rotate  q quit", help);
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle::fg(color_of(kind)).on(PLAYFIELD_BG).bold()
}

fn draw_centered(fb: &mut FrameBuffer, f: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
    fb.put_str(x, f.y.saturating_add(f.h / 2), text, OVERLAY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;
    use crate::types::Cell;

    #[test]
    fn active_cells_above_board_are_skipped() {
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            cells: [(0, -1), (1, -1), (2, -1), (3, -1)],
        });

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));

        // First board row stays empty (grid dots only).
        assert_eq!(fb.get(1, 1).unwrap().ch, '·');
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    }

    #[test]
    fn locked_cell_uses_catalog_color() {
        let mut snap = GameSnapshot::default();
        snap.set_cell(0, 19, Cell::Occupied(PieceKind::Z));

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        let cell = fb.get(1, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color_of(PieceKind::Z));
    }

    #[test]
    fn narrow_viewport_hides_panel() {
        let mut snap = GameSnapshot::default();
        snap.score = 12345;

        let fb = GameView::default().render(&snap, Viewport::new(30, 22));
        assert!((0..22).all(|y| !fb.row_text(y).contains("SCORE")));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.cells().len(), 6);
    }
}
