//! Input actions
//!
//! The game never talks to raw key codes. It asks the backend whether a
//! logical `Action` is held; the backend owns the key bindings.

mod actions;

pub use actions::*;
