//! Half-block cell grid.
//!
//! Every terminal cell shows two stacked pixels: the upper one as the
//! foreground of `▀`, the lower one as the background.

use crate::types::Rgb;

/// Glyph drawn in every cell.
pub const HALF_BLOCK: char = '▀';

/// One terminal cell holding two vertical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub upper: Rgb,
    pub lower: Rgb,
}

impl Cell {
    pub const fn solid(color: Rgb) -> Self {
        Self {
            upper: color,
            lower: color,
        }
    }
}

/// Terminal-sized grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.rows as u32 * 2
    }

    /// Resize, keeping the allocation when possible.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.cols == cols && self.rows == rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells
            .resize(cols as usize * rows as usize, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        self.idx(col, row).map(|i| self.cells[i])
    }

    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(Cell::solid(color));
    }

    /// Set the pixel at (`x`, `y`), where `y` counts half-cells.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let (Ok(col), Ok(row)) = (u16::try_from(x), u16::try_from(y / 2)) else {
            return;
        };
        if let Some(i) = self.idx(col, row) {
            if y % 2 == 0 {
                self.cells[i].upper = color;
            } else {
                self.cells[i].lower = color;
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let col = u16::try_from(x).ok()?;
        let row = u16::try_from(y / 2).ok()?;
        self.get(col, row)
            .map(|c| if y % 2 == 0 { c.upper } else { c.lower })
    }
}
