use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Key of one subscriber registered on a [`Signal`].
    pub struct SubId;
}

/// Observable, reactive value.
///
/// A `Signal<T>` is a cloneable handle to a piece of state. Writers call
/// [`set`](Signal::set) / [`update`](Signal::update); readers either poll
/// with [`get`](Signal::get) or register a callback with
/// [`subscribe`](Signal::subscribe). Subscriptions are keyed so they can be
/// removed again with [`unsubscribe`](Signal::unsubscribe), which is a no-op
/// for keys that were already removed.
///
/// Notification snapshots the subscriber list before invoking anyone, so a
/// callback may unsubscribe itself (or others) mid-delivery without
/// poisoning the borrow.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: SlotMap<SubId, Rc<dyn Fn(&T)>>,
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Read the value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.borrow_mut().subs.insert(Rc::new(f))
    }

    /// Remove a subscriber. Safe to call with a key that is already gone.
    pub fn unsubscribe(&self, id: SubId) {
        self.0.borrow_mut().subs.remove(id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    fn notify(&self)
    where
        T: Clone,
    {
        let (subs, value) = {
            let inner = self.0.borrow();
            let subs: Vec<Rc<dyn Fn(&T)>> = inner.subs.values().cloned().collect();
            (subs, inner.value.clone())
        };
        for sub in subs {
            sub(&value);
        }
    }
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
