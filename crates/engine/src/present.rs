//! Presenter adapter: indexed canvas to true-color texture.
//!
//! The expensive path (decode + upload) only runs when the canvas is dirty.
//! A static scene still gets cleared, copied and presented every frame.

use crate::backend::Presenter;
use crate::core::{Framebuffer, Palette};
use crate::types::{PixResult, Rgb, Size, PALETTE_SIZE};

/// True-color copy of the canvas plus the color table used to decode it.
///
/// Created and dropped together with the framebuffer it mirrors.
#[derive(Debug, Clone)]
pub struct StagingSurface {
    size: Size,
    pixels: Vec<Rgb>,
    color_table: [Rgb; PALETTE_SIZE],
}

impl StagingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb::BLACK; size.area()],
            color_table: [Rgb::BLACK; PALETTE_SIZE],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn color_table(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.color_table
    }

    pub fn set_colors(&mut self, colors: &[Rgb; PALETTE_SIZE]) {
        self.color_table = *colors;
    }

    /// Decode every stored index through the color table.
    pub fn decode(&mut self, fb: &Framebuffer) {
        debug_assert_eq!(fb.size(), self.size);
        let table = &self.color_table;
        for (dst, &index) in self.pixels.iter_mut().zip(fb.pixels()) {
            *dst = table[(index as usize) % PALETTE_SIZE];
        }
    }
}

/// One presentation step.
///
/// With a screen and a dirty canvas: refresh the color table if the palette
/// changed, decode, upload. Then always clear, copy and present.
pub fn present_frame(
    screen: Option<(&mut Framebuffer, &mut StagingSurface)>,
    palette: &mut Palette,
    presenter: &mut dyn Presenter,
) -> PixResult<()> {
    let has_screen = screen.is_some();
    if let Some((fb, staging)) = screen {
        if fb.is_dirty() {
            if palette.take_dirty() {
                staging.set_colors(palette.colors());
            }
            staging.decode(fb);
            presenter.update_texture(staging.pixels())?;
            fb.take_dirty();
        }
    }

    presenter.clear()?;
    if has_screen {
        presenter.copy_texture()?;
    }
    presenter.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Raster;
    use crate::headless::HeadlessPresenter;
    use crate::types::WindowPlacement;

    fn setup() -> (Framebuffer, StagingSurface, Palette) {
        let fb = Framebuffer::new(4, 2).unwrap();
        let staging = StagingSurface::new(fb.size());
        (fb, staging, Palette::new())
    }

    fn presenter_for(fb: &Framebuffer) -> HeadlessPresenter {
        let mut presenter = HeadlessPresenter::new();
        let window = WindowPlacement {
            x: 0,
            y: 0,
            width: fb.width(),
            height: fb.height(),
        };
        presenter.create_target(fb.size(), window, "test").unwrap();
        presenter
    }

    #[test]
    fn dirty_canvas_is_decoded_and_uploaded() {
        let (mut fb, mut staging, mut palette) = setup();
        let mut presenter = presenter_for(&fb);
        let stats = presenter.stats();
        Raster::new(&mut fb, palette.mapping()).pixel(8, 1, 1);

        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();

        let s = stats.borrow();
        assert_eq!(s.uploads, 1);
        assert_eq!(s.presents, 1);
        assert_eq!(s.texture[1 * 4 + 1], palette.colors()[8]);
        assert!(!fb.is_dirty());
        assert!(!palette.is_dirty());
    }

    #[test]
    fn clean_canvas_skips_upload_but_still_presents() {
        let (mut fb, mut staging, mut palette) = setup();
        let mut presenter = presenter_for(&fb);
        let stats = presenter.stats();

        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();
        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();

        let s = stats.borrow();
        assert_eq!(s.uploads, 1);
        assert_eq!(s.clears, 2);
        assert_eq!(s.copies, 2);
        assert_eq!(s.presents, 2);
    }

    #[test]
    fn palette_edit_waits_for_next_canvas_change() {
        let (mut fb, mut staging, mut palette) = setup();
        let mut presenter = presenter_for(&fb);
        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();

        palette.set_color(0, 1, 2, 3).unwrap();
        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();
        assert!(palette.is_dirty());
        assert_eq!(staging.color_table()[0], Rgb::BLACK);

        Raster::new(&mut fb, palette.mapping()).pixel(5, 0, 0);
        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();
        assert!(!palette.is_dirty());
        assert_eq!(staging.color_table()[0], Rgb::new(1, 2, 3));
        assert_eq!(staging.pixels()[1], Rgb::new(1, 2, 3));
    }

    #[test]
    fn decode_uses_palette_not_mapping() {
        let (mut fb, mut staging, mut palette) = setup();
        palette.remap(2, 9).unwrap();
        Raster::new(&mut fb, palette.mapping()).pixel(2, 0, 0);
        // Mapping changes after the write do not affect stored pixels.
        palette.reset_mapping();

        let mut presenter = presenter_for(&fb);
        present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();
        assert_eq!(staging.pixels()[0], palette.colors()[9]);
    }

    #[test]
    fn no_screen_still_clears_and_presents() {
        let mut palette = Palette::new();
        let mut presenter = HeadlessPresenter::new();
        let stats = presenter.stats();
        present_frame(None, &mut palette, &mut presenter).unwrap();

        let s = stats.borrow();
        assert_eq!((s.uploads, s.clears, s.copies, s.presents), (0, 1, 0, 1));
    }
}
