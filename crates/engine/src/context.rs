//! Engine context - the single owner of all runtime state
//!
//! One [`Engine`] holds the palette, the current screen (framebuffer plus
//! its staging surface), the window placement and the presenter. Hosts and
//! callbacks reach everything through `&mut Engine`; there are no globals.
//!
//! Drawing before a screen exists is a silent no-op, matching how pixels
//! outside the clip rectangle are handled.

use log::{debug, info};

use crate::backend::Presenter;
use crate::core::{fit_window, fullscreen_window, Framebuffer, Palette, Raster};
use crate::present::{present_frame, StagingSurface};
use crate::types::{PixError, PixResult, Rgb, Size, WindowPlacement, DEFAULT_TITLE};

/// Framebuffer and its derived presentation surface, recreated together.
struct Screen {
    fb: Framebuffer,
    staging: StagingSurface,
}

pub struct Engine {
    palette: Palette,
    screen: Option<Screen>,
    window: Option<WindowPlacement>,
    title: String,
    presenter: Box<dyn Presenter>,
    quit_requested: bool,
}

impl Engine {
    pub fn new(presenter: Box<dyn Presenter>) -> Self {
        Self {
            palette: Palette::new(),
            screen: None,
            window: None,
            title: DEFAULT_TITLE.to_string(),
            presenter,
            quit_requested: false,
        }
    }

    // ---------------------------------------------------------------------
    // Screen

    /// Create a `width` x `height` canvas and fit the window around it.
    ///
    /// Invalid sizes fail before anything is torn down. Otherwise the old
    /// screen is destroyed first, the color mapping is reset, and both dirty
    /// flags are raised. If the backend cannot create its target the engine
    /// is left without a screen.
    pub fn configure_screen(
        &mut self,
        width: u32,
        height: u32,
        title: Option<&str>,
    ) -> PixResult<(u32, u32)> {
        let fb = Framebuffer::new(width, height)?;

        self.destroy_screen();

        let title = title.unwrap_or(DEFAULT_TITLE);
        let canvas = fb.size();
        let desktop = self.presenter.desktop_bounds();
        let window = self.place_window(canvas, desktop);
        debug!(
            "fitting {}x{} canvas into desktop {:?}: window {:?}",
            width, height, desktop, window
        );

        self.presenter.create_target(canvas, window, title)?;

        self.palette.reset_mapping();
        self.palette.mark_dirty();
        self.screen = Some(Screen {
            staging: StagingSurface::new(canvas),
            fb,
        });
        self.window = Some(window);
        self.title = title.to_string();
        info!("screen configured: {}x{} \"{}\"", width, height, self.title);

        Ok((width, height))
    }

    fn destroy_screen(&mut self) {
        if self.screen.take().is_some() {
            debug!("destroying previous screen");
        }
        self.window = None;
        self.presenter.destroy_target();
    }

    /// Current canvas size.
    pub fn screen_size(&self) -> PixResult<(u32, u32)> {
        self.screen
            .as_ref()
            .map(|s| (s.fb.width(), s.fb.height()))
            .ok_or(PixError::NotInitialized)
    }

    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.screen.as_ref().map(|s| &s.fb)
    }

    pub fn window(&self) -> Option<WindowPlacement> {
        self.window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Re-run window fitting after the desktop changed size.
    pub fn handle_resize(&mut self, desktop: Size) -> PixResult<()> {
        let Some(screen) = &self.screen else {
            return Ok(());
        };
        let window = self.place_window(screen.fb.size(), Some(desktop));
        debug!("desktop resized to {:?}: window {:?}", desktop, window);
        self.presenter.move_window(window)?;
        self.window = Some(window);
        Ok(())
    }

    fn place_window(&self, canvas: Size, desktop: Option<Size>) -> WindowPlacement {
        if self.presenter.is_fullscreen() {
            fullscreen_window(canvas, desktop)
        } else {
            fit_window(canvas, desktop, self.presenter.ui_padding())
        }
    }

    /// Enter or leave fullscreen and refit the window. Returns the mode the
    /// backend actually ended up in.
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> PixResult<bool> {
        self.presenter.set_fullscreen(fullscreen)?;
        let active = self.presenter.is_fullscreen();
        info!("fullscreen {}", if active { "on" } else { "off" });

        if let Some(canvas) = self.screen.as_ref().map(|s| s.fb.size()) {
            let desktop = self.presenter.desktop_bounds();
            let window = self.place_window(canvas, desktop);
            self.presenter.move_window(window)?;
            self.window = Some(window);
        }
        Ok(active)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.presenter.is_fullscreen()
    }

    /// Show or hide the pointer. Returns the resulting visibility.
    pub fn show_cursor(&mut self, show: bool) -> PixResult<bool> {
        self.presenter.show_cursor(show)?;
        Ok(self.presenter.is_cursor_shown())
    }

    pub fn is_cursor_shown(&self) -> bool {
        self.presenter.is_cursor_shown()
    }

    /// Translate a desktop position into canvas pixels.
    ///
    /// Positions outside the window map outside the canvas, so callers can
    /// still track the pointer as it leaves.
    pub fn window_to_canvas(&self, x: i32, y: i32) -> (i32, i32) {
        match (&self.window, &self.screen) {
            (Some(w), Some(s)) => {
                let dx = (x as i64 - w.x as i64) * s.fb.width() as i64;
                let dy = (y as i64 - w.y as i64) * s.fb.height() as i64;
                let cx = dx.div_euclid(w.width as i64);
                let cy = dy.div_euclid(w.height as i64);
                (cx as i32, cy as i32)
            }
            _ => (x, y),
        }
    }

    // ---------------------------------------------------------------------
    // Palette

    pub fn set_color(&mut self, index: i32, r: i32, g: i32, b: i32) -> PixResult<()> {
        self.palette.set_color(index, r, g, b)
    }

    pub fn get_color(&self, index: i32) -> PixResult<Rgb> {
        self.palette.get_color(index)
    }

    pub fn remap(&mut self, index: i32, target: i32) -> PixResult<()> {
        self.palette.remap(index, target)
    }

    pub fn get_mapping(&self, index: i32) -> PixResult<u8> {
        self.palette.get_mapping(index)
    }

    pub fn reset_mapping(&mut self) {
        self.palette.reset_mapping();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // ---------------------------------------------------------------------
    // Drawing

    fn with_raster<R>(&mut self, f: impl FnOnce(&mut Raster<'_>) -> R) -> Option<R> {
        let screen = self.screen.as_mut()?;
        let mut raster = Raster::new(&mut screen.fb, self.palette.mapping());
        Some(f(&mut raster))
    }

    pub fn clear(&mut self, color: u8) {
        self.with_raster(|r| r.clear(color));
    }

    pub fn pixel(&mut self, color: u8, x: i32, y: i32) {
        self.with_raster(|r| r.pixel(color, x, y));
    }

    pub fn line(&mut self, color: u8, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.with_raster(|r| r.line(color, x0, y0, x1, y1));
    }

    pub fn rect(&mut self, color: u8, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool) {
        self.with_raster(|r| r.rect(color, x0, y0, x1, y1, filled));
    }

    pub fn circle(&mut self, color: u8, cx: i32, cy: i32, radius: i32, filled: bool) {
        self.with_raster(|r| r.circle(color, cx, cy, radius, filled));
    }

    pub fn text(&mut self, color: u8, x: i32, y: i32, s: &str) {
        self.with_raster(|r| r.text(color, x, y, s));
    }

    pub fn blit(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        data: &[u8],
        alpha: Option<u8>,
    ) -> PixResult<()> {
        match self.with_raster(|r| r.blit(x, y, width, height, data, alpha)) {
            Some(result) => result,
            None => {
                let expected = width.max(0) as i64 * height.max(0) as i64;
                if width < 0 || height < 0 || expected != data.len() as i64 {
                    return Err(PixError::invalid("invalid length of pixel string"));
                }
                Ok(())
            }
        }
    }

    // ---------------------------------------------------------------------
    // Loop control

    /// Ask the scheduler to stop after the current iteration.
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Push the canvas to the presenter (if dirty) and show a frame.
    pub fn present(&mut self) -> PixResult<()> {
        let screen = self
            .screen
            .as_mut()
            .map(|s| (&mut s.fb, &mut s.staging));
        present_frame(screen, &mut self.palette, self.presenter.as_mut())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.presenter.destroy_target();
    }
}
