#![forbid(unsafe_code)]

//! Typed facet keys.
//!
//! A [`Facet<V>`] names one aspect of an [`Attribute`] and fixes the type of
//! the observable behind it. The key space is open: any crate can declare
//! its own facets with [`Facet::new`] and look them up on any attribute.
//!
//! Built-in facets and their defaults:
//!
//! | Facet        | Type     | Default |
//! |--------------|----------|---------|
//! | [`VALID`]    | `bool`   | `true`  |
//! | [`EDITABLE`] | `bool`   | `true`  |
//! | [`LABEL`]    | `String` | `""`    |
//!
//! The value facet is typed by the attribute itself and is reached through
//! [`Attribute::value_obs`].
//!
//! [`Attribute`]: crate::Attribute
//! [`Attribute::value_obs`]: crate::Attribute::value_obs

use std::any::TypeId;
use std::fmt;

/// A named, typed facet key with a default for lazy creation.
pub struct Facet<V> {
    name: &'static str,
    default: fn() -> V,
}

impl<V> Facet<V> {
    /// Declare a facet.
    ///
    /// `default` builds the initial value the first time the facet is looked
    /// up on an attribute without a caller-supplied initial value.
    #[must_use]
    pub const fn new(name: &'static str, default: fn() -> V) -> Self {
        Self { name, default }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Build a fresh default value.
    #[must_use]
    pub fn default_value(&self) -> V {
        (self.default)()
    }
}

// Manual impls: `V` itself need not be Clone/Copy.
impl<V> Clone for Facet<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Facet<V> {}

impl<V> fmt::Debug for Facet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Facet").field(&self.name).finish()
    }
}

/// Map key for a facet: same name with a different value type is a
/// different facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FacetId {
    name: &'static str,
    ty: TypeId,
}

impl FacetId {
    pub(crate) fn of<V: 'static>(facet: &Facet<V>) -> Self {
        Self {
            name: facet.name,
            ty: TypeId::of::<V>(),
        }
    }
}

fn yes() -> bool {
    true
}

/// Whether the attribute's current value passes its validator.
pub const VALID: Facet<bool> = Facet::new("valid", yes);

/// Whether the bound input accepts edits.
pub const EDITABLE: Facet<bool> = Facet::new("editable", yes);

/// Human-readable caption.
pub const LABEL: Facet<String> = Facet::new("label", String::new);
