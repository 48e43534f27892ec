//! Runtime engine - state, callbacks and the fixed-timestep loop
//!
//! This crate ties the pure canvas from `tui-pix-core` to a backend. It knows
//! nothing about terminals or windows: everything platform-specific goes
//! through the traits in [`backend`].
//!
//! # Module Structure
//!
//! - [`context`]: [`Engine`], the single owner of palette, screen and presenter
//! - [`callbacks`]: One optional handler per event kind, plus `emit`
//! - [`scheduler`]: Event drain, fixed 33 ms updates, one present per iteration
//! - [`present`]: Indexed canvas to true-color texture, gated by dirty flags
//! - [`backend`]: `Presenter`, `Clock` and `EventSource` seams
//! - [`headless`]: In-memory backend for tests and offline rendering
//! - [`config`]: Environment-driven startup settings
//!
//! # Example
//!
//! ```
//! use tui_pix_engine::headless::{HeadlessPresenter, ManualClock, QueuedEvents};
//! use tui_pix_engine::{Callbacks, Engine, Scheduler};
//!
//! let mut engine = Engine::new(Box::new(HeadlessPresenter::new()));
//! engine.configure_screen(64, 64, None).unwrap();
//!
//! let mut callbacks = Callbacks::new();
//! callbacks.on_update(|engine, frame| {
//!     engine.clear(0);
//!     engine.circle(8, 32, 32, (frame % 20) as i32, true);
//!     if frame == 3 {
//!         engine.quit();
//!     }
//!     Ok(())
//! });
//!
//! let clock = ManualClock::new();
//! let mut events = QueuedEvents::new();
//! let mut scheduler = Scheduler::new();
//! scheduler.start(&mut engine, &mut callbacks, &mut clock.handle()).unwrap();
//!
//! while !engine.is_quit_requested() {
//!     clock.advance(33);
//!     scheduler
//!         .step(&mut engine, &mut callbacks, &mut events, &mut clock.handle())
//!         .unwrap();
//! }
//! scheduler.finish(&mut engine, &mut callbacks).unwrap();
//! assert_eq!(scheduler.frame_no(), 3);
//! ```

pub mod backend;
pub mod callbacks;
pub mod config;
pub mod context;
pub mod headless;
pub mod present;
pub mod scheduler;

pub use tui_pix_core as core;
pub use tui_pix_types as types;

pub use backend::{Clock, EventSource, MonotonicClock, Presenter};
pub use callbacks::{Callbacks, Handler};
pub use config::RuntimeConfig;
pub use context::Engine;
pub use present::{present_frame, StagingSurface};
pub use scheduler::{LoopState, Scheduler};
