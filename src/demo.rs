//! Built-in demo cartridge.
//!
//! Exercises every drawing primitive: a bouncing ball, an animated color
//! band driven through the mapping table, text, and a sprite blitted with a
//! transparent key. The pointer is tracked with a crosshair while the
//! backend cursor is hidden. The last key is shown for as long as it is held.
//!
//! Keys: `Escape`/`Q` quit, `Space` pauses, `R` resets the mapping,
//! `F` toggles fullscreen, `C` toggles the cursor.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use tui_pix::engine::{Callbacks, Engine};
use tui_pix::types::{EventKind, PixResult};

/// 8x8 smiley, `0` is transparent.
const SPRITE: &[u8] = b"\
00aaaa00\
0aaaaaa0\
aa1aa1aa\
aaaaaaaa\
a1aaaa1a\
aa1111aa\
0aaaaaa0\
00aaaa00";

#[derive(Debug)]
struct Demo {
    width: i32,
    height: i32,
    ball: (i32, i32),
    velocity: (i32, i32),
    pointer: Option<(i32, i32)>,
    paused: bool,
    last_key: String,
}

impl Demo {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            ball: (width as i32 / 3, height as i32 / 2),
            velocity: (2, 1),
            pointer: None,
            paused: false,
            last_key: String::new(),
        }
    }

    fn step(&mut self) {
        const R: i32 = 6;
        let (mut x, mut y) = self.ball;
        x += self.velocity.0;
        y += self.velocity.1;
        if x < R || x >= self.width - R {
            self.velocity.0 = -self.velocity.0;
            x = x.min(self.width - R - 1).max(R);
        }
        if y < R + 10 || y >= self.height - R {
            self.velocity.1 = -self.velocity.1;
            y = y.min(self.height - R - 1).max(R + 10);
        }
        self.ball = (x, y);
    }

    fn draw(&self, engine: &mut Engine, frame: u32) -> PixResult<()> {
        let (w, h) = (self.width, self.height);
        engine.clear(1);

        // Cycle slots 8..=11 through the mapping table; stored pixels keep
        // whatever slot was current when they were drawn.
        let shift = (frame / 8 % 4) as i32;
        for i in 0..4 {
            engine.remap(8 + i, 8 + (i + shift) % 4)?;
        }
        for i in 0..4 {
            let x0 = i * w / 4;
            engine.rect(8 + i as u8, x0, h - 8, x0 + w / 4 - 1, h - 1, true);
        }
        engine.reset_mapping();

        engine.rect(6, 0, 0, w - 1, h - 1, false);
        engine.line(5, 0, 10, w - 1, 10);
        engine.text(7, 2, 1, "PiX");
        if !self.last_key.is_empty() {
            engine.text(6, w - 8 * self.last_key.len() as i32 - 2, 1, &self.last_key);
        }

        let (bx, by) = self.ball;
        engine.circle(2, bx, by, 6, true);
        engine.circle(7, bx, by, 6, false);

        let sx = w / 2 - 4 + ((frame as i32 / 2) % 16 - 8).abs();
        engine.blit(sx, h / 2 - 4, 8, 8, SPRITE, Some(0))?;

        if let Some((px, py)) = self.pointer.filter(|_| !engine.is_cursor_shown()) {
            engine.line(7, px - 3, py, px + 3, py);
            engine.line(7, px, py - 3, px, py + 3);
            engine.pixel(8, px, py);
        }
        Ok(())
    }
}

/// Register the demo on `callbacks`.
pub fn install(callbacks: &mut Callbacks) {
    let state: Rc<RefCell<Option<Demo>>> = Rc::new(RefCell::new(None));

    let s = Rc::clone(&state);
    callbacks.on_init(move |engine| {
        let (w, h) = engine.screen_size()?;
        info!("demo started on {}x{} canvas", w, h);
        *s.borrow_mut() = Some(Demo::new(w, h));
        Ok(())
    });

    let s = Rc::clone(&state);
    callbacks.on_update(move |engine, frame| {
        let mut slot = s.borrow_mut();
        let Some(demo) = slot.as_mut() else {
            return Ok(());
        };
        if !demo.paused {
            demo.step();
        }
        demo.draw(engine, frame)
    });

    let s = Rc::clone(&state);
    callbacks.on_keydown(move |engine, key| {
        match key {
            "Escape" | "Q" => engine.quit(),
            "R" => engine.reset_mapping(),
            "F" => {
                let on = !engine.is_fullscreen();
                engine.set_fullscreen(on)?;
            }
            "C" => {
                let show = !engine.is_cursor_shown();
                engine.show_cursor(show)?;
            }
            _ => {}
        }
        if let Some(demo) = s.borrow_mut().as_mut() {
            if key == "Space" {
                demo.paused = !demo.paused;
            }
            demo.last_key = key.to_string();
        }
        Ok(())
    });

    let s = Rc::clone(&state);
    callbacks.on_keyup(move |_, key| {
        if let Some(demo) = s.borrow_mut().as_mut() {
            if demo.last_key == key {
                demo.last_key.clear();
            }
        }
        Ok(())
    });

    let s = Rc::clone(&state);
    callbacks.on_mousemoved(move |_, x, y| {
        if let Some(demo) = s.borrow_mut().as_mut() {
            demo.pointer = Some((x, y));
        }
        Ok(())
    });

    callbacks.on(EventKind::Quit, |_, _| {
        info!("demo finished");
        Ok(())
    });
}
