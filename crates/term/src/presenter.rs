//! Terminal presenter.
//!
//! The terminal is the desktop: its size in cells, with rows doubled, is the
//! pixel area the window is fitted into. The "window" is a rectangle of that
//! area that the canvas texture is scaled into with nearest-neighbor
//! sampling. Fullscreen stretches it over every cell of the terminal.
//!
//! The pointer is the terminal's own text cursor, hidden on entry.

use log::{debug, warn};

use tui_pix_engine::Presenter;

use crate::grid::CellGrid;
use crate::renderer::TerminalRenderer;
use crate::types::{PixError, PixResult, Rgb, Size, WindowPlacement};

/// Padding kept around the window, in pixels.
pub const TERMINAL_PADDING: u32 = 2;

pub struct TerminalPresenter {
    renderer: TerminalRenderer,
    grid: CellGrid,
    canvas: Option<Size>,
    window: WindowPlacement,
    texture: Vec<Rgb>,
    background: Rgb,
    fullscreen: bool,
    cursor_shown: bool,
}

impl TerminalPresenter {
    /// Take over the terminal.
    pub fn new() -> anyhow::Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            renderer,
            grid: CellGrid::new(0, 0),
            canvas: None,
            window: WindowPlacement::default(),
            texture: Vec::new(),
            background: Rgb::BLACK,
            fullscreen: false,
            cursor_shown: false,
        })
    }

    /// Whether the terminal delivers real key release events.
    pub fn reports_key_releases(&self) -> bool {
        self.renderer.reports_key_releases()
    }

    /// Give the terminal back. Also runs on drop.
    pub fn restore(&mut self) -> anyhow::Result<()> {
        self.renderer.exit()
    }

    fn terminal_cells() -> Option<(u16, u16)> {
        crossterm::terminal::size().ok()
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {e}");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn desktop_bounds(&mut self) -> Option<Size> {
        Self::terminal_cells().map(|(cols, rows)| Size::new(cols as u32, rows as u32 * 2))
    }

    fn ui_padding(&self) -> u32 {
        TERMINAL_PADDING
    }

    fn create_target(
        &mut self,
        canvas: Size,
        window: WindowPlacement,
        title: &str,
    ) -> PixResult<()> {
        self.destroy_target();
        self.renderer.set_title(title).map_err(PixError::backend)?;
        self.canvas = Some(canvas);
        self.window = window;
        self.texture = vec![Rgb::BLACK; canvas.area()];
        debug!("terminal target {:?} in window {:?}", canvas, window);
        Ok(())
    }

    fn destroy_target(&mut self) {
        self.canvas = None;
        self.texture.clear();
        self.renderer.invalidate();
    }

    fn move_window(&mut self, window: WindowPlacement) -> PixResult<()> {
        self.window = window;
        self.renderer.invalidate();
        Ok(())
    }

    fn update_texture(&mut self, pixels: &[Rgb]) -> PixResult<()> {
        if pixels.len() != self.texture.len() {
            return Err(PixError::backend(format!(
                "texture holds {} pixels, got {}",
                self.texture.len(),
                pixels.len()
            )));
        }
        self.texture.copy_from_slice(pixels);
        Ok(())
    }

    fn clear(&mut self) -> PixResult<()> {
        let (cols, rows) =
            Self::terminal_cells().unwrap_or((self.grid.cols(), self.grid.rows()));
        self.grid.resize(cols, rows);
        self.grid.fill(self.background);
        Ok(())
    }

    fn copy_texture(&mut self) -> PixResult<()> {
        if let Some(canvas) = self.canvas {
            scale_into(&self.texture, canvas, self.window, &mut self.grid);
        }
        Ok(())
    }

    fn present(&mut self) -> PixResult<()> {
        self.renderer
            .draw_swap(&mut self.grid)
            .map_err(PixError::backend)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> PixResult<()> {
        self.fullscreen = fullscreen;
        self.renderer.invalidate();
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn show_cursor(&mut self, show: bool) -> PixResult<()> {
        self.renderer
            .set_cursor_visible(show)
            .map_err(PixError::backend)?;
        self.cursor_shown = show;
        Ok(())
    }

    fn is_cursor_shown(&self) -> bool {
        self.cursor_shown
    }
}

/// Nearest-neighbor scale of `texture` (`canvas` sized) into the `window`
/// rectangle of `grid`. Pixels falling outside the grid are dropped.
pub fn scale_into(
    texture: &[Rgb],
    canvas: Size,
    window: WindowPlacement,
    grid: &mut CellGrid,
) {
    if canvas.area() == 0 || texture.len() != canvas.area() {
        return;
    }
    if window.width == 0 || window.height == 0 {
        return;
    }
    let x_end = (window.x + window.width).min(grid.cols() as u32);
    let y_end = (window.y + window.height).min(grid.pixel_height());

    for py in window.y..y_end {
        let sy = ((py - window.y) as u64 * canvas.height as u64 / window.height as u64) as usize;
        let row = &texture[sy * canvas.width as usize..(sy + 1) * canvas.width as usize];
        for px in window.x..x_end {
            let sx = ((px - window.x) as u64 * canvas.width as u64 / window.width as u64) as usize;
            grid.set_pixel(px, py, row[sx]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    const A: Rgb = Rgb::new(255, 0, 0);
    const B: Rgb = Rgb::new(0, 255, 0);
    const C: Rgb = Rgb::new(0, 0, 255);
    const D: Rgb = Rgb::new(255, 255, 255);

    fn placement(x: u32, y: u32, width: u32, height: u32) -> WindowPlacement {
        WindowPlacement {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn integer_upscale_repeats_pixels() {
        let texture = [A, B, C, D];
        let mut grid = CellGrid::new(6, 3);
        scale_into(&texture, Size::new(2, 2), placement(1, 1, 4, 4), &mut grid);

        assert_eq!(grid.pixel(1, 1), Some(A));
        assert_eq!(grid.pixel(2, 2), Some(A));
        assert_eq!(grid.pixel(3, 1), Some(B));
        assert_eq!(grid.pixel(4, 4), Some(D));
        assert_eq!(grid.pixel(1, 3), Some(C));
        // Outside the window stays untouched.
        assert_eq!(grid.pixel(0, 0), Some(Rgb::default()));
        assert_eq!(grid.pixel(5, 5), Some(Rgb::default()));
    }

    #[test]
    fn identity_scale_packs_rows_into_cells() {
        let texture = [A, B, C, D];
        let mut grid = CellGrid::new(2, 1);
        scale_into(&texture, Size::new(2, 2), placement(0, 0, 2, 2), &mut grid);
        assert_eq!(grid.get(0, 0), Some(Cell { upper: A, lower: C }));
        assert_eq!(grid.get(1, 0), Some(Cell { upper: B, lower: D }));
    }

    #[test]
    fn window_larger_than_grid_is_clipped() {
        let texture = vec![A; 16];
        let mut grid = CellGrid::new(2, 1);
        scale_into(&texture, Size::new(4, 4), placement(1, 1, 8, 8), &mut grid);
        assert_eq!(grid.pixel(1, 1), Some(A));
        assert_eq!(grid.pixel(0, 1), Some(Rgb::default()));
    }

    #[test]
    fn mismatched_texture_is_ignored() {
        let mut grid = CellGrid::new(2, 1);
        scale_into(&[A], Size::new(2, 2), placement(0, 0, 2, 2), &mut grid);
        assert_eq!(grid.get(0, 0), Some(Cell::default()));
    }

    #[test]
    fn fullscreen_window_stretches_over_every_cell() {
        let texture = [A, B, C, D];
        let mut grid = CellGrid::new(6, 2);
        let window = crate::core::fullscreen_window(
            Size::new(2, 2),
            Some(Size::new(grid.cols() as u32, grid.pixel_height())),
        );
        scale_into(&texture, Size::new(2, 2), window, &mut grid);

        assert_eq!(grid.pixel(0, 0), Some(A));
        assert_eq!(grid.pixel(5, 0), Some(B));
        assert_eq!(grid.pixel(0, 3), Some(C));
        assert_eq!(grid.pixel(5, 3), Some(D));
        assert_eq!(grid.get(2, 1), Some(Cell { upper: C, lower: C }));
    }
}
