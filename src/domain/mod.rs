//! Domain layer: contacts, balances and the settlement rule.
//!
//! Nothing in here knows about the terminal or the event loop.

pub mod models;
pub mod services;
pub mod errors;

pub use models::*;
pub use services::*;
pub use errors::*;
