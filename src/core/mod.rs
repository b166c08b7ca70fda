/*!
 * Core Module
 * Fundamental simulator types, limits, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod id;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::{FailurePolicy, SimulationConfig};
pub use errors::*;
pub use id::{IdGenerator, PidAllocator};
pub use types::*;
