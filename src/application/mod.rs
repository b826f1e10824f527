//! Application layer: the settlement state machine and the session around it.
//!
//! [`state`] holds the pure transitions, [`controller`] applies them and
//! notifies observers, [`session`] keeps the screen-side state for the
//! terminal UI.

pub mod controller;
pub mod errors;
pub mod forms;
pub mod session;
pub mod state;

pub use controller::*;
pub use errors::*;
pub use forms::*;
pub use session::*;
pub use state::*;
