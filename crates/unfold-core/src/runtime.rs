use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::geometry::{Rect, Vec2};
use crate::scope::Scope;
use crate::view::{Scene, View};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static ROOT_SCOPE: RefCell<Option<Scope>> = const { RefCell::new(None) };
    static FRAME_REQUESTS: Cell<u32> = const { Cell::new(0) };
}

#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Frames one composition pass.
///
/// The root scope persists across frames; it is created on first use and
/// disposed exactly once by [`teardown`], which is when unmount cleanups
/// (subscriptions, timers) run.
pub struct ComposeGuard {
    scope: Scope,
}

impl ComposeGuard {
    pub fn begin() -> Self {
        let scope = ROOT_SCOPE.with(|rs| rs.borrow_mut().get_or_insert_with(Scope::new).clone());

        COMPOSER.with(|c| {
            c.borrow_mut().cursor = 0;
        });

        ComposeGuard { scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Dispose the root scope and forget all remembered slots. Runs every
/// registered cleanup; idempotent.
pub fn teardown() {
    ROOT_SCOPE.with(|rs| {
        if let Some(scope) = rs.borrow_mut().take() {
            scope.dispose();
        }
    });
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        c.slots.clear();
        c.keyed_slots.clear();
        c.cursor = 0;
    });
}

/// Ask the host loop for another frame (an animation or pending async step
/// still needs to make progress).
pub fn request_frame() {
    FRAME_REQUESTS.with(|c| c.set(c.get() + 1));
}

/// Number of frame requests since the last call; resets the counter.
pub fn take_frame_requests() -> u32 {
    FRAME_REQUESTS.with(|c| c.replace(0))
}

/// Slot-based remember (sequential composition only).
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember; stable across conditional branches.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Output of one composition tick: scene plus input surfaces.
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub focus_chain: Vec<u64>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_scroll: Option<Rc<dyn Fn(Vec2) -> Vec2>>,
    pub focusable: bool,
    /// Set when the region belongs to a text field; keys the field registry.
    pub tf_key: Option<u64>,
    pub z_index: f32,
}

pub struct Scheduler {
    pub focused: Option<u64>,
    pub size: (u32, u32),
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            focused: None,
            size: (1280, 800),
        }
    }

    pub fn compose<F>(
        &mut self,
        build_root: &mut F,
        layout_paint: impl Fn(&View, (u32, u32)) -> (Scene, Vec<HitRegion>),
    ) -> Frame
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        let guard = ComposeGuard::begin();
        let root = guard.scope().run(|| build_root(self));
        let (scene, hits) = layout_paint(&root, self.size);

        let focus_chain: Vec<u64> = hits.iter().filter(|h| h.focusable).map(|h| h.id).collect();

        Frame {
            scene,
            hit_regions: hits,
            focus_chain,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
