//! # fieldvim-engine
//!
//! The modal engine: for every incoming key event it decides what action to
//! take, what mode to transition to, and how to sequence the resulting key
//! injections.
//!
//! The engine never touches text itself. Everything with a side effect on
//! the page goes through the capability traits in [`capabilities`]: an
//! async key injector, selection and focus providers, and a mode sink for
//! UI indication. A synchronous [`InputGate`] is shared with the host so
//! overlapping key events and injection echoes can be classified without
//! entering the async manager.

mod capabilities;
mod executor;
mod gate;
mod manager;
mod state;

pub use capabilities::{
    FocusProvider, Host, InjectError, KeyInjector, ModeSink, SelectionDirection,
    SelectionProvider, SelectionRange,
};
pub use gate::{Admission, InputGate};
pub use manager::{KeyDisposition, ModeManager};
pub use state::SessionState;
