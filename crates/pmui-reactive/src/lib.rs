#![forbid(unsafe_code)]

//! Reactive primitives for presentation models.
//!
//! This crate provides the change-tracking building blocks that attributes
//! and controllers are made of:
//!
//! - [`Observable`]: a shared, version-tracked value cell that notifies
//!   listeners with `(new, old)` whenever the value changes.
//! - [`Subscription`]: handle for a registered listener; dropping it
//!   unsubscribes, [`Subscription::detach`] keeps the listener.
//! - [`ObservableList`]: a list with add/remove notification and
//!   self-removing remove-listeners ([`RemoveMe`]).
//!
//! # Architecture
//!
//! Every primitive uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Listeners are stored strongly by their source; subscriptions
//! hold only a `Weak` back-reference, so a subscription never keeps its
//! source alive.
//!
//! Dispatch is synchronous: `set()` returns only after every listener (and
//! everything those listeners set in turn) has run.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Listeners are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. A notification pass calls exactly the listeners registered when it
//!    started.

pub mod list;
pub mod observable;

pub use list::{ObservableList, RemoveMe};
pub use observable::{Observable, Subscription};
