/*!
 * Process Module
 * Simulated process kinds, their lifecycle and the registry that runs them
 */

mod entity;
pub mod kinds;
mod registry;
mod registry_builder;
mod stats;
pub mod timing;
mod types;
mod validation;

// Re-export for convenience
pub use entity::Process;
pub use kinds::{
    BatchProcess, CpuProcess, DaemonProcess, Device, IoProcess, MemoryProcess, MemoryType,
    NetworkProcess, ProcessKind, Protocol, RealTimeProcess,
};
pub use registry::ProcessRegistry;
pub use registry_builder::ProcessRegistryBuilder;
pub use stats::{RegistrySummary, StateStats, VariantStats};
pub use timing::{Clock, Entropy, ExecutionContext, Interrupted, ManualClock, SystemClock};
pub use types::{ExecutionOutcome, ProcessState, ProcessType};
