//! GameView: maps a [`Screen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::screen::{RecordsPanel, Screen};
use crate::types::{CellState, Point, FIELD_HEIGHT, FIELD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SETTLED_FG: Rgb = Rgb::new(165, 42, 42);
const ACTIVE_FG: Rgb = Rgb::new(60, 200, 80);
const WIN_BG: Rgb = Rgb::new(36, 213, 78);
const DEFEAT_BG: Rgb = Rgb::new(255, 26, 101);

/// Half-size of the next-shape preview grid (cells -2..=2 around the center).
const PREVIEW_RADIUS: i32 = 2;

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

/// Screen-space rectangle of the bordered board.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, screen: &Screen, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let w = FIELD_WIDTH as u16 * self.cell_w + 2;
        let h = FIELD_HEIGHT as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);
        for (y, row) in screen.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_field_cell(fb, frame, x as u16, y as u16, *cell);
            }
        }

        self.draw_side_panel(fb, screen, viewport, frame);

        if let Some(panel) = &screen.records {
            self.draw_records(fb, frame, panel);
        } else if !screen.running {
            self.draw_banner(fb, frame, "ENTER to start");
        }
    }

    pub fn render(&self, screen: &Screen, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_field_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, cell: CellState) {
        let (ch, style) = match cell {
            CellState::Free => ('·', CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim()),
            CellState::Settled => ('█', CellStyle::new(SETTLED_FG, BOARD_BG)),
            CellState::Active => ('█', CellStyle::new(ACTIVE_FG, BOARD_BG).bold()),
        };
        fb.fill_rect(
            f.x + 1 + x * self.cell_w,
            f.y + 1 + y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, screen: &Screen, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = f.y;
        fb.put_str(panel_x, y, "PLAYER", label);
        fb.put_str(panel_x, y + 1, &screen.username, value);
        y += 3;

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, screen.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, screen.level, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, panel_x, y, screen);
        y += (2 * PREVIEW_RADIUS + 2) as u16;

        for line in [
            "←/→   move",
            "↑     rotate",
            "↓/spc drop",
            "s     step",
            "enter start/stop",
            "r     restart",
            "q     quit",
        ] {
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, screen: &Screen) {
        let empty = CellStyle::new(Rgb::new(70, 70, 80), PANEL_BG);
        let filled = CellStyle::new(ACTIVE_FG, PANEL_BG);
        let side = 2 * PREVIEW_RADIUS + 1;

        for gy in 0..side {
            for gx in 0..side {
                let offset = Point::new(gx - PREVIEW_RADIUS, gy - PREVIEW_RADIUS);
                let occupied = screen.next.as_ref().is_some_and(|shape| {
                    offset == Point::default() || shape.offsets().contains(&offset)
                });
                let (ch, style) = if occupied { ('█', filled) } else { ('░', empty) };
                fb.fill_rect(x0 + gx as u16 * 2, y0 + gy as u16, 2, 1, ch, style);
            }
        }
    }

    fn draw_records(&self, fb: &mut FrameBuffer, f: Frame, panel: &RecordsPanel) {
        let bg = if panel.outcome.is_victory() { WIN_BG } else { DEFEAT_BG };
        let text = CellStyle::new(Rgb::new(255, 255, 255), bg);
        let inner_w = f.w.saturating_sub(4);
        let rows = panel.entries.len() as u16 + 5;
        let (x, y) = (f.x + 2, f.y + f.h.saturating_sub(rows) / 2);

        fb.fill_rect(x, y, inner_w, rows, ' ', text);
        centered(fb, x, inner_w, y + 1, panel.outcome.label(), text.bold());

        let score_w = 6u16;
        let name_w = inner_w.saturating_sub(score_w + 4) as usize;
        for (i, record) in panel.entries.iter().enumerate() {
            let row = y + 2 + i as u16;
            let name: String = record.username.chars().take(name_w).collect();
            fb.put_u32(x + 1, row, i as u32 + 1, text);
            fb.put_str(x + 3, row, &name, text);
            fb.put_u32(x + inner_w - score_w, row, record.score, text);
        }

        centered(fb, x, inner_w, y + rows - 2, "ENTER/R again", text.dim());
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, f: Frame, msg: &str) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        centered(fb, f.x, f.w, f.y + f.h / 2, msg, style);
    }
}

fn centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, s: &str, style: CellStyle) {
    let len = s.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(len) / 2, y, s, style);
}
