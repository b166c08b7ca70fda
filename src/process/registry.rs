/*!
 * Process Registry
 * Ordered process table, execution history and statistics
 */

use super::entity::Process;
use super::kinds::ProcessKind;
use super::registry_builder::ProcessRegistryBuilder;
use super::stats::{RegistrySummary, StateStats, VariantStats};
use super::timing::ExecutionContext;
use super::types::{ExecutionOutcome, ProcessType};
use super::validation::validate_registration_name;
use crate::core::config::{FailurePolicy, SimulationConfig};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::id::{IdGenerator, PidAllocator};
use crate::core::types::Pid;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of simulated processes in registration order
///
/// PIDs are unique within a registry. Lookups hand out clones, so callers
/// never hold a reference into the table.
pub struct ProcessRegistry {
    pub(super) processes: RwLock<Vec<Process>>,
    pub(super) history: RwLock<Vec<String>>,
    pub(super) pids: PidAllocator,
    pub(super) context: Arc<ExecutionContext>,
}

impl ProcessRegistry {
    /// Registry on the process-wide PID allocator with real waits
    pub fn new() -> Self {
        Self::from_parts(
            PidAllocator::global(),
            Arc::new(ExecutionContext::system(SimulationConfig::default())),
        )
    }

    pub fn builder() -> ProcessRegistryBuilder {
        ProcessRegistryBuilder::new()
    }

    pub(super) fn from_parts(pids: PidAllocator, context: Arc<ExecutionContext>) -> Self {
        Self {
            processes: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
            pids,
            context,
        }
    }

    #[inline]
    pub fn context(&self) -> &Arc<ExecutionContext> {
        &self.context
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        self.context.config()
    }

    #[inline]
    pub fn pid_allocator(&self) -> &PidAllocator {
        &self.pids
    }

    /// Add an already-built process, rejecting a PID already present
    pub fn submit(&self, process: Process) -> ProcessResult<()> {
        let mut processes = self.processes.write();
        if processes.iter().any(|p| p.pid() == process.pid()) {
            warn!(pid = process.pid(), "Rejected duplicate PID");
            return Err(ProcessError::DuplicatePid(process.pid()));
        }

        info!(
            pid = process.pid(),
            name = %process.name(),
            process_type = %process.process_type(),
            priority = process.priority(),
            "Registered process"
        );
        processes.push(process);
        Ok(())
    }

    /// Allocate a PID and register a new process under it
    ///
    /// The PID is consumed even when registration fails afterwards.
    pub fn register(&self, name: &str, kind: impl Into<ProcessKind>) -> ProcessResult<Pid> {
        let name = validate_registration_name(name, self.config().name_max_len)?;
        let pid = self.next_pid()?;
        self.submit(Process::new(pid, &name, kind)?)?;
        Ok(pid)
    }

    /// Remove by PID, returning whether anything was removed
    pub fn remove(&self, pid: Pid) -> bool {
        let mut processes = self.processes.write();
        match processes.iter().position(|p| p.pid() == pid) {
            Some(index) => {
                let removed = processes.remove(index);
                info!(pid, name = %removed.name(), "Removed process");
                true
            }
            None => false,
        }
    }

    /// Execute every process in registration order
    ///
    /// Completed outcomes are appended to the history. With
    /// [`FailurePolicy::FailFast`] the run stops after the first aborted
    /// execution, which is still part of the returned list.
    pub fn execute_all(&self) -> Vec<ExecutionOutcome> {
        let mut processes = self.processes.write();
        let mut outcomes = Vec::with_capacity(processes.len());

        for process in processes.iter_mut() {
            let outcome = process.execute(&self.context);
            self.record(&outcome);
            let aborted = outcome.is_aborted();
            outcomes.push(outcome);

            if aborted && self.config().failure_policy == FailurePolicy::FailFast {
                warn!(pid = process.pid(), "Stopping bulk execution after abort");
                break;
            }
        }

        info!(executed = outcomes.len(), "Bulk execution finished");
        outcomes
    }

    /// Execute one process by PID
    pub fn execute(&self, pid: Pid) -> ExecutionOutcome {
        let mut processes = self.processes.write();
        let Some(process) = processes.iter_mut().find(|p| p.pid() == pid) else {
            debug!(pid, "Execution requested for unknown PID");
            return ExecutionOutcome::NotFound { pid };
        };

        let outcome = process.execute(&self.context);
        self.record(&outcome);
        outcome
    }

    fn record(&self, outcome: &ExecutionOutcome) {
        if let ExecutionOutcome::Completed { message, .. } = outcome {
            self.history.write().push(message.clone());
        }
    }

    pub fn get_process(&self, pid: Pid) -> Option<Process> {
        self.processes
            .read()
            .iter()
            .find(|p| p.pid() == pid)
            .cloned()
    }

    /// Snapshot in registration order
    pub fn list_processes(&self) -> Vec<Process> {
        self.processes.read().clone()
    }

    pub fn list_by_type(&self, process_type: ProcessType) -> Vec<Process> {
        self.processes
            .read()
            .iter()
            .filter(|p| p.process_type() == process_type)
            .cloned()
            .collect()
    }

    /// Highest priority first; ties keep registration order
    pub fn sorted_by_priority(&self) -> Vec<Process> {
        let mut sorted = self.list_processes();
        sorted.sort_by(|a, b| b.priority().cmp(&a.priority()));
        sorted
    }

    /// Change a registered process's priority
    pub fn set_priority(&self, pid: Pid, priority: i64) -> ProcessResult<()> {
        self.update(pid, |process| process.set_priority(priority))?;
        info!(pid, priority, "Updated priority");
        Ok(())
    }

    /// Mutate a registered process in place
    pub fn update<R>(
        &self,
        pid: Pid,
        f: impl FnOnce(&mut Process) -> ProcessResult<R>,
    ) -> ProcessResult<R> {
        let mut processes = self.processes.write();
        let process = processes
            .iter_mut()
            .find(|p| p.pid() == pid)
            .ok_or(ProcessError::NotFound(pid))?;
        f(process)
    }

    /// Drop every process; PID counter and history are kept
    pub fn clear(&self) {
        let mut processes = self.processes.write();
        let count = processes.len();
        processes.clear();
        info!(count, "Cleared process table");
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    /// Completed outcome messages, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.read().clone()
    }

    /// Allocate a PID; every call consumes one
    pub fn next_pid(&self) -> ProcessResult<Pid> {
        self.pids.next().ok_or_else(|| {
            warn!("PID space exhausted");
            ProcessError::PidsExhausted
        })
    }

    pub fn stats_by_type(&self) -> VariantStats {
        VariantStats::collect(self.processes.read().iter())
    }

    pub fn stats_by_state(&self) -> StateStats {
        StateStats::collect(self.processes.read().iter())
    }

    pub fn summary(&self) -> RegistrySummary {
        let processes = self.processes.read();
        RegistrySummary::collect(&processes, self.history.read().len(), self.pids.current())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.read().is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.read().iter().any(|p| p.pid() == pid)
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRegistry")
            .field("processes", &self.len())
            .field("history", &self.history.read().len())
            .field("next_pid", &self.pids.current())
            .finish()
    }
}
