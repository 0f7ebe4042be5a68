#![forbid(unsafe_code)]

//! Person model and controllers.
//!
//! The model/controller half of a master-detail person editor: a
//! [`MasterController`] holding the persons, a [`SelectionController`]
//! tracking the selected one, and [`Person`] itself with its two name
//! [`Attribute`](pmui_model::Attribute)s. Views bind to these; rendering is
//! left to the caller.

pub mod controller;
pub mod person;

pub use controller::{MasterController, SelectionController};
pub use person::Person;
