use std::collections::BTreeSet;

use tui_pix::core::{Framebuffer, Palette, Raster};

fn painted(fb: &Framebuffer) -> BTreeSet<(i32, i32)> {
    let mut out = BTreeSet::new();
    for y in 0..fb.height() as i32 {
        for x in 0..fb.width() as i32 {
            if fb.get_pixel(x, y) != Some(0) {
                out.insert((x, y));
            }
        }
    }
    out
}

fn draw(w: u32, h: u32, f: impl FnOnce(&mut Raster<'_>)) -> Framebuffer {
    let palette = Palette::new();
    let mut fb = Framebuffer::new(w, h).unwrap();
    f(&mut Raster::new(&mut fb, palette.mapping()));
    fb
}

#[test]
fn line_is_symmetric_in_its_endpoints() {
    let cases = [(0, 0, 17, 5), (3, 20, 9, 1), (-4, 7, 40, 9), (5, 5, 5, 30)];
    for (x0, y0, x1, y1) in cases {
        let a = draw(32, 32, |r| r.line(1, x0, y0, x1, y1));
        let b = draw(32, 32, |r| r.line(1, x1, y1, x0, y0));
        assert_eq!(painted(&a), painted(&b), "line {x0},{y0} -> {x1},{y1}");
    }
}

#[test]
fn horizontal_line_covers_every_column() {
    let fb = draw(16, 4, |r| r.line(3, 2, 1, 12, 1));
    let expected: BTreeSet<_> = (2..=12).map(|x| (x, 1)).collect();
    assert_eq!(painted(&fb), expected);
}

#[test]
fn outline_and_filled_rect_share_the_border() {
    let outline = draw(16, 16, |r| r.rect(2, 3, 3, 9, 7, false));
    let filled = draw(16, 16, |r| r.rect(2, 3, 3, 9, 7, true));
    let border = painted(&outline);
    let area = painted(&filled);

    assert_eq!(area.len(), 7 * 5);
    assert_eq!(border.len(), 2 * 7 + 2 * 3);
    assert!(border.is_subset(&area));
}

#[test]
fn filled_circle_contains_its_ring() {
    for radius in 0..6 {
        let ring = painted(&draw(24, 24, |r| r.circle(4, 12, 12, radius, false)));
        let disc = painted(&draw(24, 24, |r| r.circle(4, 12, 12, radius, true)));
        assert!(ring.is_subset(&disc), "radius {radius}");
        assert!(disc.contains(&(12, 12)));
        for &(x, y) in &disc {
            let (dx, dy) = (x - 12, y - 12);
            assert!(dx * dx + dy * dy <= radius * radius);
        }
    }
}

#[test]
fn shapes_crossing_the_edge_are_clipped() {
    let fb = draw(8, 8, |r| {
        r.rect(1, -100, -100, 100, 100, true);
        r.circle(2, 0, 0, 50, false);
        r.line(3, -1000, 3, 1000, 3);
    });
    assert_eq!(fb.pixels().len(), 64);
    assert_eq!(fb.get_pixel(7, 3), Some(3));
}

#[test]
fn text_draws_known_glyph_rows() {
    let fb = draw(16, 8, |r| r.text(1, 0, 0, "-"));
    // '-' is a single horizontal bar in the 8x8 font.
    let rows: BTreeSet<i32> = painted(&fb).iter().map(|&(_, y)| y).collect();
    assert_eq!(rows.len(), 1);
    assert!(painted(&fb).iter().all(|&(x, _)| x < 8));
}

#[test]
fn blit_writes_sprite_through_mapping() {
    let mut palette = Palette::new();
    palette.remap(0xa, 3).unwrap();
    let mut fb = Framebuffer::new(4, 4).unwrap();
    Raster::new(&mut fb, palette.mapping())
        .blit(1, 1, 2, 2, b"a00a", Some(0))
        .unwrap();

    assert_eq!(fb.get_pixel(1, 1), Some(3));
    assert_eq!(fb.get_pixel(2, 2), Some(3));
    assert_eq!(fb.get_pixel(2, 1), Some(0));
}

#[test]
fn blit_rejects_bad_lengths_without_drawing() {
    let palette = Palette::new();
    let mut fb = Framebuffer::new(4, 4).unwrap();
    let mut raster = Raster::new(&mut fb, palette.mapping());
    assert!(raster.blit(0, 0, 2, 2, b"fff", None).is_err());
    assert!(raster.blit(0, 0, -1, 2, b"", None).is_err());
    assert!(painted(&fb).is_empty());
}
