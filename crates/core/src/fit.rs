//! Window fitting against the desktop.
//!
//! The usable area is the desktop minus `padding` on each axis. A canvas that
//! does not fit is halved (both axes, floor) until it does; otherwise it is
//! scaled by the largest integer factor that still fits, keeping pixel edges
//! crisp. The window is centred on the desktop.
//!
//! In fullscreen the window covers the whole desktop and the canvas is
//! stretched to it, with no padding, halving or integer snapping.

use crate::types::{Size, WindowPlacement};

/// Compute the output window for `canvas`.
///
/// With no desktop report the window is the canvas size at the origin.
/// The result is never smaller than 1x1.
pub fn fit_window(canvas: Size, desktop: Option<Size>, padding: u32) -> WindowPlacement {
    let Some(desktop) = desktop else {
        return WindowPlacement {
            x: 0,
            y: 0,
            width: canvas.width.max(1),
            height: canvas.height.max(1),
        };
    };

    let avail_w = desktop.width.saturating_sub(padding);
    let avail_h = desktop.height.saturating_sub(padding);
    let (mut width, mut height) = (canvas.width, canvas.height);

    if width > avail_w || height > avail_h {
        while (width > avail_w || height > avail_h) && (width > 0 || height > 0) {
            width /= 2;
            height /= 2;
        }
    } else if width > 0 && height > 0 {
        let factor = (avail_w / width).min(avail_h / height).max(1);
        width *= factor;
        height *= factor;
    }

    let width = width.max(1);
    let height = height.max(1);
    WindowPlacement {
        x: desktop.width.saturating_sub(width) / 2,
        y: desktop.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Window for fullscreen mode: the entire desktop.
///
/// Falls back to the canvas size at the origin when the desktop is unknown.
pub fn fullscreen_window(canvas: Size, desktop: Option<Size>) -> WindowPlacement {
    let size = desktop.unwrap_or(canvas);
    WindowPlacement {
        x: 0,
        y: 0,
        width: size.width.max(1),
        height: size.height.max(1),
    }
}
