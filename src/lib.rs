/*!
 * Process Simulator Library
 * Process lifecycle simulation exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::{FailurePolicy, PidAllocator, ProcessError, ProcessResult, SimulationConfig};
pub use monitoring::init_tracing;
pub use process::{
    ExecutionOutcome, Process, ProcessKind, ProcessRegistry, ProcessState, ProcessType,
};
