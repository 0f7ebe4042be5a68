#![forbid(unsafe_code)]

//! A list that notifies listeners when items are added or removed.
//!
//! # Design
//!
//! [`ObservableList<T>`] shares its storage the same way [`Observable`] does
//! (`Rc<RefCell<..>>`, `Clone` hands out another handle). Add- and
//! remove-listeners live in separate registries but draw ids from one
//! counter, so a single [`Subscription`] type covers both.
//!
//! A remove-listener receives a [`RemoveMe`] token next to the removed item.
//! Calling [`RemoveMe::remove`] unregisters that listener from inside its own
//! callback, which is how a per-item view tears itself down once its item is
//! gone.
//!
//! # Invariants
//!
//! 1. Add-listeners run after the item is in the list; remove-listeners run
//!    after it is gone.
//! 2. Listeners fire in registration order, from a snapshot taken when the
//!    notification starts.
//! 3. `del` of an absent item notifies nobody.
//!
//! [`Observable`]: crate::Observable

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::observable::{Subscription, Unsubscribe};

type AddListener<T> = Rc<dyn Fn(&T)>;
type DelListener<T> = Rc<dyn Fn(&T, &RemoveMe)>;

struct ListInner<T> {
    items: Vec<T>,
    next_id: u64,
    add_listeners: Vec<(u64, AddListener<T>)>,
    del_listeners: Vec<(u64, DelListener<T>)>,
}

impl<T> Unsubscribe for RefCell<ListInner<T>> {
    fn unsubscribe(&self, id: u64) {
        let mut inner = self.borrow_mut();
        inner.add_listeners.retain(|(lid, _)| *lid != id);
        inner.del_listeners.retain(|(lid, _)| *lid != id);
    }
}

/// Token handed to remove-listeners so they can unregister themselves.
pub struct RemoveMe {
    id: u64,
    owner: Weak<dyn Unsubscribe>,
}

impl RemoveMe {
    /// Unregister the listener that received this token.
    pub fn remove(&self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.unsubscribe(self.id);
        }
    }
}

impl fmt::Debug for RemoveMe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoveMe").field("id", &self.id).finish()
    }
}

/// A shared list with add/remove notification.
pub struct ObservableList<T> {
    inner: Rc<RefCell<ListInner<T>>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableList")
            .field("items", &inner.items)
            .field("add_listeners", &inner.add_listeners.len())
            .field("del_listeners", &inner.del_listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + 'static> ObservableList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListInner {
                items: Vec::new(),
                next_id: 0,
                add_listeners: Vec::new(),
                del_listeners: Vec::new(),
            })),
        }
    }

    /// Append `item` and notify add-listeners.
    pub fn add(&self, item: T) {
        let listeners: Vec<AddListener<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.items.push(item.clone());
            inner.add_listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in &listeners {
            listener(&item);
        }
    }

    /// Remove the first element equal to `item`.
    ///
    /// Returns `false` (and notifies nobody) when no such element exists.
    pub fn del(&self, item: &T) -> bool {
        let (removed, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let Some(pos) = inner.items.iter().position(|i| i == item) else {
                return false;
            };
            let removed = inner.items.remove(pos);
            let listeners: Vec<(u64, DelListener<T>)> = inner
                .del_listeners
                .iter()
                .map(|(id, l)| (*id, Rc::clone(l)))
                .collect();
            (removed, listeners)
        };
        for (id, listener) in &listeners {
            let token = RemoveMe {
                id: *id,
                owner: self.owner(),
            };
            listener(&removed, &token);
        }
        true
    }

    /// Register a listener for added items.
    pub fn on_add(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.add_listeners.push((id, Rc::new(listener)));
        drop(inner);
        Subscription::new(id, self.owner())
    }

    /// Register a listener for removed items.
    pub fn on_del(&self, listener: impl Fn(&T, &RemoveMe) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.del_listeners.push((id, Rc::new(listener)));
        drop(inner);
        Subscription::new(id, self.owner())
    }

    /// Number of items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Number of items matching `pred`.
    #[must_use]
    pub fn count_if(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.inner.borrow().items.iter().filter(|i| pred(i)).count()
    }

    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.inner.borrow().items.contains(item)
    }

    /// Snapshot of the items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    fn owner(&self) -> Weak<dyn Unsubscribe> {
        let weak: Weak<RefCell<ListInner<T>>> = Rc::downgrade(&self.inner);
        weak
    }
}
