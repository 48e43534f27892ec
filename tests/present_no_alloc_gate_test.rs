use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_pix::core::{Framebuffer, Palette, Raster};
use tui_pix::engine::headless::HeadlessPresenter;
use tui_pix::engine::{present_frame, Presenter, StagingSurface};
use tui_pix::types::WindowPlacement;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

const SPRITE: &[u8] = b"0123456789abcdef0123456789abcdef";

fn draw_scene(raster: &mut Raster<'_>, frame: i32) {
    raster.clear(1);
    raster.line(7, 0, 0, 127, 95);
    raster.rect(8, frame % 50, 10, 60, 40, true);
    raster.rect(9, 2, 2, 125, 93, false);
    raster.circle(10, 64, 48, 20, false);
    raster.circle(11, 64, 48, 10, true);
    raster.text(7, 4, 80, "score 1234");
    let _ = raster.blit(frame % 100, 20, 8, 4, SPRITE, Some(0));
}

#[test]
fn steady_state_present_does_not_allocate() {
    let mut palette = Palette::new();
    let mut fb = Framebuffer::new(128, 96).unwrap();
    let mut staging = StagingSurface::new(fb.size());
    let mut presenter = HeadlessPresenter::new();
    let window = WindowPlacement {
        x: 0,
        y: 0,
        width: 128,
        height: 96,
    };
    presenter.create_target(fb.size(), window, "gate").unwrap();
    present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();

    let allocs = with_alloc_counting(|| {
        for frame in 0..50 {
            draw_scene(&mut Raster::new(&mut fb, palette.mapping()), frame);
            present_frame(Some((&mut fb, &mut staging)), &mut palette, &mut presenter).unwrap();
        }
    });

    assert_eq!(allocs, 0);
}
