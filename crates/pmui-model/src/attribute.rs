#![forbid(unsafe_code)]

//! Multi-facet presentation-model attribute.
//!
//! # Design
//!
//! An [`Attribute<T>`] bundles one [`Observable`] per facet:
//!
//! - **value** (`Observable<T>`): the privileged facet. Every external write
//!   goes through [`Attribute::set_converted_value`], which runs the current
//!   converter before storing.
//! - **valid** (`Observable<bool>`): derived. A listener attached once, at
//!   construction, recomputes `validator(value)` after every value change.
//! - any other [`Facet`]: independent observables created on first lookup
//!   and only ever changed by explicit `set` calls.
//!
//! ```text
//! set_converted_value(raw)
//!   └─ value.set(converter(raw))
//!        ├─ revalidate()  ── valid.set(validator(value)) ── valid listeners
//!        └─ value listeners (registration order)
//! ```
//!
//! `Attribute` is a handle: cloning it shares the same facets, converter and
//! validator.
//!
//! # Invariants
//!
//! 1. After any value change or validator swap has finished propagating,
//!    `valid == validator(value)`.
//! 2. Each write through `set_converted_value` applies the converter exactly
//!    once before the value is stored.
//! 3. Looking up the same facet twice returns the same observable.
//! 4. The revalidation listener is registered exactly once.
//!
//! # Failure Modes
//!
//! - **Converter panic**: propagates to the writer. Nothing is stored, the
//!   value keeps its previous state.
//! - **Validator panic**: propagates. The value has already been stored, so
//!   `valid` stays stale until the next successful revalidation.
//! - **Writing `value_obs()` directly**: bypasses the converter. Validation
//!   still runs because it listens on the observable itself.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use pmui_reactive::{Observable, Subscription};

use crate::facet::{EDITABLE, Facet, FacetId, LABEL, VALID};
use crate::logging::trace;

type Converter<T> = Rc<dyn Fn(T) -> T>;
type Validator<T> = Rc<dyn Fn(&T) -> bool>;

struct AttributeInner<T> {
    value: Observable<T>,
    valid: Observable<bool>,
    converter: RefCell<Converter<T>>,
    validator: RefCell<Validator<T>>,
    /// Lazily created facets, each an `Observable<V>` behind `dyn Any`.
    facets: RefCell<HashMap<FacetId, Box<dyn Any>>>,
    _revalidation: Subscription,
}

impl<T: Clone + PartialEq + 'static> AttributeInner<T> {
    fn revalidate(&self) {
        // Clone out of the cells so the validator may touch this attribute.
        let validator = Rc::clone(&self.validator.borrow());
        let current = self.value.get();
        let valid = validator(&current);
        trace!(valid, "attribute revalidated");
        self.valid.set(valid);
    }
}

/// A value with conversion, validation and arbitrary extra facets.
pub struct Attribute<T> {
    inner: Rc<AttributeInner<T>>,
}

impl<T> Clone for Attribute<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("value", &self.inner.value)
            .field("valid", &self.inner.valid)
            .field("facets", &self.inner.facets.borrow().len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Attribute<T> {
    /// Create an attribute holding `value` as is.
    ///
    /// The converter starts as identity and the validator accepts
    /// everything, so the attribute starts valid.
    #[must_use]
    pub fn new(value: T) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<AttributeInner<T>>| {
            let value = Observable::new(value);
            let valid = Observable::new(true);

            let weak = weak.clone();
            let revalidation = value.on_change(move |_, _| {
                if let Some(inner) = weak.upgrade() {
                    inner.revalidate();
                }
            });

            let mut facets: HashMap<FacetId, Box<dyn Any>> = HashMap::new();
            facets.insert(FacetId::of(&VALID), Box::new(valid.clone()));

            let converter: Converter<T> = Rc::new(|v: T| v);
            let validator: Validator<T> = Rc::new(|_: &T| true);
            AttributeInner {
                value,
                valid,
                converter: RefCell::new(converter),
                validator: RefCell::new(validator),
                facets: RefCell::new(facets),
                _revalidation: revalidation,
            }
        });
        Self { inner }
    }

    /// Builder form of [`set_converter`](Self::set_converter).
    #[must_use]
    pub fn with_converter(self, converter: impl Fn(T) -> T + 'static) -> Self {
        self.set_converter(converter);
        self
    }

    /// Builder form of [`set_validator`](Self::set_validator).
    #[must_use]
    pub fn with_validator(self, validator: impl Fn(&T) -> bool + 'static) -> Self {
        self.set_validator(validator);
        self
    }

    /// The value facet.
    ///
    /// Listen on it freely; write through
    /// [`set_converted_value`](Self::set_converted_value) instead of
    /// `set` so the converter is applied.
    #[must_use]
    pub fn value_obs(&self) -> Observable<T> {
        self.inner.value.clone()
    }

    /// The validity facet. Same observable as `get_obs(&VALID)`.
    #[must_use]
    pub fn valid_obs(&self) -> Observable<bool> {
        self.inner.valid.clone()
    }

    /// The observable for `facet`, created with the facet's default on first
    /// lookup.
    pub fn get_obs<V: Clone + PartialEq + 'static>(&self, facet: &Facet<V>) -> Observable<V> {
        self.facet_obs(facet, || facet.default_value())
    }

    /// The observable for `facet`, created with `initial` on first lookup.
    ///
    /// `initial` is ignored when the facet already exists.
    pub fn get_obs_or<V: Clone + PartialEq + 'static>(
        &self,
        facet: &Facet<V>,
        initial: V,
    ) -> Observable<V> {
        self.facet_obs(facet, || initial)
    }

    fn facet_obs<V: Clone + PartialEq + 'static>(
        &self,
        facet: &Facet<V>,
        init: impl FnOnce() -> V,
    ) -> Observable<V> {
        let id = FacetId::of(facet);
        let mut facets = self.inner.facets.borrow_mut();
        if let Some(existing) = facets
            .get(&id)
            .and_then(|slot| slot.downcast_ref::<Observable<V>>())
        {
            return existing.clone();
        }
        let obs = Observable::new(init());
        trace!(facet = facet.name(), "facet created");
        facets.insert(id, Box::new(obs.clone()));
        obs
    }

    /// Replace the converter and run it over the current value.
    pub fn set_converter(&self, converter: impl Fn(T) -> T + 'static) {
        *self.inner.converter.borrow_mut() = Rc::new(converter);
        trace!("attribute converter replaced");
        self.set_converted_value(self.inner.value.get());
    }

    /// Replace the validator and revalidate the current value.
    pub fn set_validator(&self, validator: impl Fn(&T) -> bool + 'static) {
        *self.inner.validator.borrow_mut() = Rc::new(validator);
        trace!("attribute validator replaced");
        self.inner.revalidate();
    }

    /// Convert `raw` and store the result in the value facet.
    ///
    /// This is the entry point for external writes such as input fields.
    pub fn set_converted_value(&self, raw: T) {
        let converter = Rc::clone(&self.inner.converter.borrow());
        let converted = converter(raw);
        self.inner.value.set(converted);
    }

    /// Recompute the validity facet from the current value.
    pub fn revalidate(&self) {
        self.inner.revalidate();
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> T {
        self.inner.value.get()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.valid.get()
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.get_obs(&LABEL).get()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        self.get_obs(&LABEL).set(label.into());
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.get_obs(&EDITABLE).get()
    }

    pub fn set_editable(&self, editable: bool) {
        self.get_obs(&EDITABLE).set(editable);
    }

    /// Whether two handles refer to the same attribute.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}
