/*!
 * Process Entity
 * Identity, lifecycle state and priority shared by every process kind
 */

use super::kinds::{Lifecycle, ProcessKind};
use super::timing::{ExecutionContext, Interrupted};
use super::types::{ExecutionOutcome, ProcessState, ProcessType};
use super::validation::{validate_name, validate_priority};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::{Millis, Pid, Priority};
use crate::monitoring::ExecutionSpan;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::warn;

/// A simulated process
///
/// Two processes are equal when their PIDs match, whatever their kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pid: Pid,
    name: String,
    state: ProcessState,
    priority: Priority,
    execution_time_ms: Millis,
    kind: ProcessKind,
}

impl Process {
    /// Build a process in state `New` with its kind's default priority
    pub fn new(pid: Pid, name: &str, kind: impl Into<ProcessKind>) -> ProcessResult<Self> {
        let kind = kind.into();
        Ok(Self {
            pid,
            name: validate_name(name)?,
            state: ProcessState::New,
            priority: kind.default_priority(),
            execution_time_ms: 0,
            kind,
        })
    }

    #[inline]
    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Duration of the last completed execution, 0 before the first
    #[inline]
    #[must_use]
    pub fn execution_time_ms(&self) -> Millis {
        self.execution_time_ms
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ProcessKind {
        &self.kind
    }

    /// Edit kind parameters through their re-validating setters
    ///
    /// `f` works on a staged copy that is committed only if it succeeds and
    /// the kind stays the same; otherwise the process is left untouched.
    /// Replacing a real-time kind with one of different criticality
    /// re-derives the priority.
    pub fn update_kind<R>(
        &mut self,
        f: impl FnOnce(&mut ProcessKind) -> ProcessResult<R>,
    ) -> ProcessResult<R> {
        let mut staged = self.kind.clone();
        let result = f(&mut staged)?;

        if staged.process_type() != self.kind.process_type() {
            return Err(ProcessError::WrongKind {
                pid: self.pid,
                expected: self.kind.process_type().to_string(),
                actual: staged.process_type().to_string(),
            });
        }

        if let (ProcessKind::RealTime(old), ProcessKind::RealTime(new)) = (&self.kind, &staged) {
            if old.is_critical() != new.is_critical() {
                self.priority = new.priority();
            }
        }
        self.kind = staged;
        Ok(result)
    }

    #[inline]
    #[must_use]
    pub fn process_type(&self) -> ProcessType {
        self.kind.process_type()
    }

    /// Set priority, rejecting values outside 1..=10
    pub fn set_priority(&mut self, priority: i64) -> ProcessResult<()> {
        self.priority = validate_priority(priority)?;
        Ok(())
    }

    /// Toggle criticality of a real-time process and re-derive its priority
    pub fn set_critical(&mut self, critical: bool) -> ProcessResult<()> {
        match &mut self.kind {
            ProcessKind::RealTime(rt) => {
                rt.set_critical(critical);
                self.priority = rt.priority();
                Ok(())
            }
            other => Err(ProcessError::WrongKind {
                pid: self.pid,
                expected: ProcessType::RealTime.to_string(),
                actual: other.process_type().to_string(),
            }),
        }
    }

    /// `[PID: <id> | <name>] - Estado: <state> - `
    #[must_use]
    pub fn outcome_prefix(&self) -> String {
        format!("[PID: {} | {}] - Estado: {} - ", self.pid, self.name, self.state)
    }

    /// Run the kind's workload through `Running` to `Terminated`
    ///
    /// Re-running a terminated process is allowed and overwrites its timing.
    /// An interrupted wait leaves the process `Ready` with its previous timing.
    pub fn execute(&mut self, ctx: &ExecutionContext) -> ExecutionOutcome {
        let span = ExecutionSpan::new(self.pid, self.process_type());
        let _entered = span.enter();

        let mut lifecycle = Lifecycle::new(self.pid, &mut self.state);
        lifecycle.transition(ProcessState::Running);

        match self.kind.run(ctx, &mut lifecycle) {
            Ok(done) => {
                lifecycle.transition(ProcessState::Terminated);
                self.execution_time_ms = done.elapsed_ms;
                span.record_elapsed(done.elapsed_ms);
                span.record_result(true);
                ExecutionOutcome::Completed {
                    pid: self.pid,
                    message: format!("{}{}", self.outcome_prefix(), done.detail),
                }
            }
            Err(Interrupted) => {
                lifecycle.transition(ProcessState::Ready);
                warn!(pid = self.pid, name = %self.name, "execution interrupted");
                span.record_error("interrupted");
                ExecutionOutcome::Aborted {
                    pid: self.pid,
                    message: format!(
                        "{}Execution interrupted during a simulated wait",
                        self.outcome_prefix()
                    ),
                }
            }
        }
    }
}

impl PartialEq for Process {
    fn eq(&self, other: &Self) -> bool {
        self.pid == other.pid
    }
}

impl Eq for Process {}

impl Hash for Process {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pid.hash(state);
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [PID={}, Name={}, State={}, Priority={}, {}]",
            self.process_type(),
            self.pid,
            self.name,
            self.state,
            self.priority,
            self.kind.describe()
        )
    }
}
