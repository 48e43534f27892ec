//! TerminalRenderer: flushes a cell grid to a real terminal.
//!
//! Frames are diffed against the previous one and only changed runs of cells
//! are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::grid::{Cell, CellGrid, HALF_BLOCK};
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<CellGrid>,
    buf: Vec<u8>,
    active: bool,
    key_releases: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            active: false,
            key_releases: false,
        }
    }

    /// Whether the terminal was asked to report key releases on `enter`.
    pub fn reports_key_releases(&self) -> bool {
        self.key_releases
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.key_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        if self.key_releases {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call when not entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        if self.key_releases {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.flush_buf()
    }

    /// Show or hide the terminal cursor. Ignored when not entered.
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.buf.clear();
        if visible {
            self.buf.queue(cursor::Show)?;
        } else {
            self.buf.queue(cursor::Hide)?;
        }
        self.flush_buf()
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `grid`, then swap it with the previous frame.
    ///
    /// On return `grid` holds stale content; callers repaint it fully before
    /// the next draw.
    pub fn draw_swap(&mut self, grid: &mut CellGrid) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.cols() == grid.cols() && prev.rows() == grid.rows() => {
                encode_diff_into(&prev, grid, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(grid, &mut self.buf)?;
                CellGrid::new(grid.cols(), grid.rows())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, grid);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(grid: &CellGrid, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut current: Option<Cell> = None;
    for row in 0..grid.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        for col in 0..grid.cols() {
            let cell = grid.get(col, row).unwrap_or_default();
            put_cell(out, cell, &mut current)?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the changed runs between `prev` and `next` into `out`.
pub fn encode_diff_into(prev: &CellGrid, next: &CellGrid, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Cell> = None;
    let mut any = false;
    for_each_changed_run(prev, next, |col, row, len| {
        any = true;
        out.queue(cursor::MoveTo(col, row))?;
        for dc in 0..len {
            let cell = next.get(col + dc, row).unwrap_or_default();
            put_cell(out, cell, &mut current)?;
        }
        Ok(())
    })?;
    if any {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn put_cell(out: &mut Vec<u8>, cell: Cell, current: &mut Option<Cell>) -> Result<()> {
    match current {
        Some(c) if *c == cell => {}
        Some(c) => {
            if c.upper != cell.upper {
                out.queue(SetForegroundColor(rgb_to_color(cell.upper)))?;
            }
            if c.lower != cell.lower {
                out.queue(SetBackgroundColor(rgb_to_color(cell.lower)))?;
            }
        }
        None => {
            out.queue(SetForegroundColor(rgb_to_color(cell.upper)))?;
            out.queue(SetBackgroundColor(rgb_to_color(cell.lower)))?;
        }
    }
    *current = Some(cell);
    out.queue(Print(HALF_BLOCK))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &CellGrid,
    next: &CellGrid,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.cols() != next.cols() || prev.rows() != next.rows() {
        for row in 0..next.rows() {
            f(0, row, next.cols())?;
        }
        return Ok(());
    }

    let cols = next.cols();
    for row in 0..next.rows() {
        let mut col = 0;
        while col < cols {
            if prev.get(col, row) == next.get(col, row) {
                col += 1;
                continue;
            }
            let start = col;
            col += 1;
            while col < cols && prev.get(col, row) != next.get(col, row) {
                col += 1;
            }
            f(start, row, col - start)?;
        }
    }
    Ok(())
}
