//! # Signals, composition, and the reveal core
//!
//! Unfold renders a scrolling page with a small reactive core instead of a
//! retained widget tree. The pieces:
//!
//! - `Signal<T>` — observable value with cancellable subscriptions.
//! - `remember*` — lifecycle-aware storage bound to composition slots.
//! - `effect` / `scoped_effect` / `disposable_effect` — side effects whose
//!   cleanups are guaranteed to run on key change or teardown.
//! - `timer` — cancellable one-shot timers pumped by the host loop.
//!
//! On top of those sits the scroll-reveal subsystem, the mechanism every
//! section of the page shares:
//!
//! - [`Viewport`] — the page scroll position as one shared observed value.
//! - [`observe_visibility`] — edge-triggered entered/exited events for one
//!   element against that viewport.
//! - [`RevealController`] / [`use_reveal`] — per-element boolean reveal
//!   state under a one-shot or repeatable [`RevealPolicy`].
//! - [`Stagger`] — deterministic per-index delays for list cascades.
//!
//! ## Example
//!
//! ```rust
//! use unfold_core::prelude::*;
//!
//! let viewport = Viewport::new();
//! let ctrl = RevealController::new(RevealPolicy::once().threshold(0.2));
//! ctrl.attach(&viewport);
//!
//! // Layout publishes where the element ended up:
//! ctrl.bounds().publish(Rect::new(0.0, 900.0, 800.0, 300.0));
//! viewport.height.set(800.0);
//!
//! assert!(!ctrl.is_revealed());
//! viewport.offset.set(400.0); // scroll it into view
//! assert!(ctrl.is_revealed());
//! ```
//!
//! Everything is single-threaded and event-loop driven: observer callbacks
//! and timers run on the render thread, so there is no locking anywhere in
//! this crate.
//!
//! [`Viewport`]: viewport::Viewport
//! [`observe_visibility`]: visibility::observe_visibility
//! [`RevealController`]: reveal::RevealController
//! [`use_reveal`]: reveal::use_reveal
//! [`RevealPolicy`]: reveal::RevealPolicy
//! [`Stagger`]: stagger::Stagger

pub mod animation;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod reveal;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod stagger;
pub mod timer;
pub mod view;
pub mod viewport;
pub mod visibility;

mod tests;

pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use locals::*;
pub use modifier::*;
pub use prelude::*;
pub use reveal::*;
pub use runtime::*;
pub use signal::*;
pub use stagger::*;
pub use view::*;
pub use viewport::*;
pub use visibility::*;
