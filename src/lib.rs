//! evenup - split bills with friends from the terminal.
//!
//! Keeps a list of friends with running balances and applies the result of
//! splitting a bill to the selected friend.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
