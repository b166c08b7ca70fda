/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
///
/// `New -> Running -> [Blocked -> Running]? -> Terminated`. `Ready` is a
/// resting state an aborted execution falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Constructed, never executed
    New,
    /// Waiting to run
    Ready,
    /// Executing its workload
    Running,
    /// Waiting on a device
    Blocked,
    /// Finished its last execution
    Terminated,
}

impl ProcessState {
    pub const ALL: [ProcessState; 5] = [
        ProcessState::New,
        ProcessState::Ready,
        ProcessState::Running,
        ProcessState::Blocked,
        ProcessState::Terminated,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Terminated => "TERMINATED",
        }
    }

    /// Check if the process is resting before an execution
    #[inline(always)]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::New | Self::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Whether `self -> to` is an edge of the lifecycle
    ///
    /// Terminated processes may run again. Running and Blocked may fall back
    /// to Ready when their execution is aborted.
    #[must_use]
    pub const fn can_transition_to(&self, to: ProcessState) -> bool {
        matches!(
            (self, to),
            (Self::New | Self::Ready | Self::Terminated, Self::Running)
                | (Self::Running, Self::Blocked | Self::Terminated | Self::Ready)
                | (Self::Blocked, Self::Running | Self::Ready)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag naming one of the seven process kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    Cpu,
    Io,
    Daemon,
    Network,
    Memory,
    Batch,
    RealTime,
}

impl ProcessType {
    pub const ALL: [ProcessType; 7] = [
        ProcessType::Cpu,
        ProcessType::Io,
        ProcessType::Daemon,
        ProcessType::Network,
        ProcessType::Memory,
        ProcessType::Batch,
        ProcessType::RealTime,
    ];

    /// Key used in statistics reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "ProcesoCPU",
            Self::Io => "ProcesoIO",
            Self::Daemon => "Daemon",
            Self::Network => "ProcesoRed",
            Self::Memory => "ProcesoMemoria",
            Self::Batch => "ProcesoBatch",
            Self::RealTime => "ProcesoTiempoReal",
        }
    }

    /// Short human-readable name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Io => "I/O",
            Self::Daemon => "Daemon",
            Self::Network => "Network",
            Self::Memory => "Memory",
            Self::Batch => "Batch",
            Self::RealTime => "Real-time",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Result of asking for an execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// The workload ran to completion
    Completed { pid: Pid, message: String },
    /// A simulated wait was interrupted; the process fell back to Ready
    Aborted { pid: Pid, message: String },
    /// No process with that PID is registered
    NotFound { pid: Pid },
}

impl ExecutionOutcome {
    #[inline]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        match self {
            Self::Completed { pid, .. } | Self::Aborted { pid, .. } | Self::NotFound { pid } => {
                *pid
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Human-readable outcome line
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Completed { message, .. } | Self::Aborted { message, .. } => message.clone(),
            Self::NotFound { pid } => format!("Process not found with PID: {}", pid),
        }
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
