#![forbid(unsafe_code)]

//! Observable value cell with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). When the value changes (determined by
//! `PartialEq`), every listener registered at that moment is called in
//! registration order with `(new, old)`.
//!
//! Listeners are owned by the observable. [`Observable::on_change`] hands back
//! a [`Subscription`] that removes the listener when dropped, or keeps it for
//! the observable's whole lifetime after [`Subscription::detach`].
//!
//! # Performance
//!
//! | Operation       | Complexity                   |
//! |-----------------|------------------------------|
//! | `get()`         | O(1) + clone of `T`          |
//! | `set()`         | O(L) where L = listeners     |
//! | `on_change()`   | O(1) amortized               |
//! | unsubscribe     | O(L)                         |
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: a listener may call `set()` on the same or another
//!   observable. No borrow is held while listeners run, so this never panics,
//!   but a feedback loop that keeps producing different values recurses until
//!   the values settle or the stack overflows. Cycles are not detected.
//! - **Stale `(new, old)` pairs**: when a listener re-enters `set()` on the
//!   same observable, listeners later in the outer pass still receive the
//!   outer pair, even though the stored value has moved on.
//! - **Listener panic**: propagates to the caller of `set()`. The value is
//!   already stored; listeners after the panicking one are not called.
//! - **Mutating inside `with()`**: the value is borrowed while the `with`
//!   closure runs, so calling `set()`, `update()`, `on_change()` or
//!   `on_change_now()` on the same observable from that closure panics, as
//!   does dropping one of its subscriptions. Reads (`get()`, `version()`,
//!   nested `with()`) are fine.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A change listener, called with `(new, old)`.
type Listener<T> = Rc<dyn Fn(&T, &T)>;

/// Removal seam between a [`Subscription`] and whatever container owns the
/// listener it refers to.
pub(crate) trait Unsubscribe {
    fn unsubscribe(&self, id: u64);
}

/// Shared interior for [`Observable<T>`].
struct ObservableInner<T> {
    value: T,
    version: u64,
    next_id: u64,
    /// Registration order is preserved; removal keeps the relative order.
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T> Unsubscribe for RefCell<ObservableInner<T>> {
    fn unsubscribe(&self, id: u64) {
        self.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
    }
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state:
/// both handles see the same value and share listeners.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Listeners are notified in registration order.
/// 4. Listeners registered during a notification are not called by that
///    notification.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("listener_count", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    ///
    /// The initial version is 0 and no listeners are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value.
    ///
    /// If the new value equals the current value this does nothing. Otherwise
    /// the value is stored, the version is bumped, and the listeners
    /// registered at this point are called with `(new, old)`.
    pub fn set(&self, value: T) {
        let (new, old) = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.version += 1;
            let new = value.clone();
            (new, std::mem::replace(&mut inner.value, value))
        };
        self.notify(&new, &old);
    }

    /// Modify the value in place via a closure. If the value changes
    /// (compared by `PartialEq` against a snapshot), the version is
    /// incremented and listeners are notified.
    ///
    /// # Panics
    ///
    /// Panics if `f` touches this observable (the value is mutably borrowed
    /// while `f` runs).
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                Some((inner.value.clone(), old))
            } else {
                None
            }
        };
        if let Some((new, old)) = changed {
            self.notify(&new, &old);
        }
    }

    /// Register a listener called with `(new, old)` on every change.
    ///
    /// The listener is not called for the current value. Dropping the
    /// returned [`Subscription`] removes it; [`Subscription::detach`] keeps it
    /// for as long as the observable lives.
    pub fn on_change(&self, listener: impl Fn(&T, &T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<ObservableInner<T>>> = Rc::downgrade(&self.inner);
        Subscription::new(id, weak)
    }

    /// Like [`on_change`](Self::on_change), but also calls the listener once
    /// right away with `(current, current)`.
    ///
    /// Bindings use this to push the current state into their target before
    /// any change happens.
    pub fn on_change_now(&self, listener: impl Fn(&T, &T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        let forward = Rc::clone(&listener);
        let subscription = self.on_change(move |new, old| forward(new, old));
        let current = self.get();
        listener(&current, &current);
        subscription
    }

    /// Current version number. Increments by 1 on each value-changing
    /// mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of currently registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether two handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    fn notify(&self, new: &T, old: &T) {
        // Snapshot so listeners can register, remove, or set re-entrantly.
        let listeners: Vec<Listener<T>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in &listeners {
            listener(new, old);
        }
    }
}

/// Handle for a registered listener.
///
/// Dropping the `Subscription` removes the listener from its source. Call
/// [`detach`](Self::detach) to keep the listener registered for the source's
/// lifetime instead.
#[must_use = "dropping a Subscription removes the listener; call detach() to keep it"]
pub struct Subscription {
    id: u64,
    owner: Option<Weak<dyn Unsubscribe>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, owner: Weak<dyn Unsubscribe>) -> Self {
        Self {
            id,
            owner: Some(owner),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Give up the handle without removing the listener.
    pub fn detach(mut self) {
        self.owner = None;
    }

    fn release(&mut self) {
        if let Some(owner) = self.owner.take().and_then(|w| w.upgrade()) {
            owner.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.owner.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
