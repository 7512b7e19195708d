//! Dispatcher turning motion requests into cursor results.
//!
//! Sub-modules:
//! * `motion` - cursor movement semantics and the preferred-column policy
//!
//! The session layer in `core-state` decides what to do with a result (commit it,
//! move the overlay occupant, score a pearl); the dispatcher never mutates anything.

mod motion;

pub use motion::compute_motion;
