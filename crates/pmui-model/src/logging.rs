//! Logging facade.
//!
//! With the `tracing` feature (on by default) this re-exports the `tracing`
//! event macros. Without it the same names expand to nothing, so call sites
//! never need their own `cfg` guards.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __pmui_log_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::__pmui_log_noop as debug;
#[cfg(not(feature = "tracing"))]
pub use crate::__pmui_log_noop as trace;
