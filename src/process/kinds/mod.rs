/*!
 * Process Kinds
 *
 * Closed set of process flavors. Each kind validates its own parameters and
 * owns the workload run between the shared `Running` and `Terminated`
 * transitions.
 */

mod batch;
mod cpu;
mod daemon;
mod io;
mod memory;
mod network;
mod realtime;

pub use batch::BatchProcess;
pub use cpu::CpuProcess;
pub use daemon::DaemonProcess;
pub use io::{Device, IoProcess};
pub use memory::{MemoryProcess, MemoryType};
pub use network::{NetworkProcess, Protocol};
pub use realtime::RealTimeProcess;

use super::timing::{ExecutionContext, Interrupted};
use super::types::{ProcessState, ProcessType};
use crate::core::types::{Millis, Pid, Priority};
use serde::Serialize;
use tracing::debug;

/// Kind-specific parameters and runtime fields of a process
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessKind {
    Cpu(CpuProcess),
    Io(IoProcess),
    Daemon(DaemonProcess),
    Network(NetworkProcess),
    Memory(MemoryProcess),
    Batch(BatchProcess),
    RealTime(RealTimeProcess),
}

impl ProcessKind {
    #[must_use]
    pub const fn process_type(&self) -> ProcessType {
        match self {
            Self::Cpu(_) => ProcessType::Cpu,
            Self::Io(_) => ProcessType::Io,
            Self::Daemon(_) => ProcessType::Daemon,
            Self::Network(_) => ProcessType::Network,
            Self::Memory(_) => ProcessType::Memory,
            Self::Batch(_) => ProcessType::Batch,
            Self::RealTime(_) => ProcessType::RealTime,
        }
    }

    /// Priority a freshly constructed process of this kind starts with
    #[must_use]
    pub const fn default_priority(&self) -> Priority {
        match self {
            Self::Cpu(_) => CpuProcess::PRIORITY,
            Self::Io(_) => IoProcess::PRIORITY,
            Self::Daemon(_) => DaemonProcess::PRIORITY,
            Self::Network(_) => NetworkProcess::PRIORITY,
            Self::Memory(_) => MemoryProcess::PRIORITY,
            Self::Batch(_) => BatchProcess::PRIORITY,
            Self::RealTime(rt) => rt.priority(),
        }
    }

    /// Kind-specific fields for `Display`
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Cpu(k) => k.describe(),
            Self::Io(k) => k.describe(),
            Self::Daemon(k) => k.describe(),
            Self::Network(k) => k.describe(),
            Self::Memory(k) => k.describe(),
            Self::Batch(k) => k.describe(),
            Self::RealTime(k) => k.describe(),
        }
    }

    pub(crate) fn run(
        &mut self,
        ctx: &ExecutionContext,
        lifecycle: &mut Lifecycle<'_>,
    ) -> RunResult {
        match self {
            Self::Cpu(k) => k.run(ctx),
            Self::Io(k) => k.run(ctx, lifecycle),
            Self::Daemon(k) => k.run(ctx),
            Self::Network(k) => k.run(ctx),
            Self::Memory(k) => k.run(ctx),
            Self::Batch(k) => k.run(ctx),
            Self::RealTime(k) => k.run(ctx),
        }
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ProcessKind {
                fn from(kind: $ty) -> Self {
                    ProcessKind::$variant(kind)
                }
            }
        )*
    };
}

impl_from_kind! {
    Cpu => CpuProcess,
    Io => IoProcess,
    Daemon => DaemonProcess,
    Network => NetworkProcess,
    Memory => MemoryProcess,
    Batch => BatchProcess,
    RealTime => RealTimeProcess,
}

/// Finished workload: measured duration and the kind-specific outcome detail
#[derive(Debug)]
pub(crate) struct Completion {
    pub elapsed_ms: Millis,
    pub detail: String,
}

impl Completion {
    pub(crate) fn new(elapsed_ms: Millis, detail: String) -> Self {
        Self { elapsed_ms, detail }
    }
}

pub(crate) type RunResult = Result<Completion, Interrupted>;

/// Mutable view of a process state during one execution
pub(crate) struct Lifecycle<'a> {
    pid: Pid,
    state: &'a mut ProcessState,
}

impl<'a> Lifecycle<'a> {
    pub(crate) fn new(pid: Pid, state: &'a mut ProcessState) -> Self {
        Self { pid, state }
    }

    pub(crate) fn transition(&mut self, to: ProcessState) {
        debug_assert!(
            self.state.can_transition_to(to),
            "illegal transition {:?} -> {:?}",
            self.state,
            to
        );
        debug!(pid = self.pid, from = %self.state, to = %to, "state transition");
        *self.state = to;
    }
}
