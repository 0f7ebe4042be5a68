#![forbid(unsafe_code)]

//! Presentation-model attributes.
//!
//! # Role
//! `pmui-model` sits between the reactive cells of `pmui-reactive` and
//! whatever projects models onto a screen. An [`Attribute`] is what a text
//! field binds to: its value (converted on the way in), its validity, and
//! any number of extra [`Facet`]s such as editability or a label.
//!
//! # Primary responsibilities
//! - **Attribute**: value/validity pair with converter and validator.
//! - **Facet**: typed, open-ended keys with per-facet defaults.
//! - **logging**: `tracing` facade, compiled out without the `tracing`
//!   feature.
//!
//! # Example
//!
//! ```
//! use pmui_model::{Attribute, LABEL};
//!
//! let name = Attribute::new("abc".to_string());
//! name.set_validator(|s: &String| s.len() > 5);
//! assert!(!name.is_valid());
//!
//! name.set_converted_value("abcdefgh".to_string());
//! assert!(name.is_valid());
//!
//! name.get_obs(&LABEL).set("Name".to_string());
//! assert_eq!(name.label(), "Name");
//! ```

pub mod attribute;
pub mod facet;
pub mod logging;

pub use attribute::Attribute;
pub use facet::{EDITABLE, Facet, LABEL, VALID};
pub use pmui_reactive::{Observable, ObservableList, RemoveMe, Subscription};
