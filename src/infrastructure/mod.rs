//! Infrastructure layer: everything that touches the outside world.
//!
//! Id generation, configuration, the seed file, the CSV balance report and
//! log output.

pub mod config;
pub mod errors;
pub mod id;
pub mod logging;
pub mod report;
pub mod seed;

pub use config::*;
pub use errors::*;
pub use id::*;
pub use logging::*;
pub use report::*;
pub use seed::*;
