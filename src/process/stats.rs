/*!
 * Registry Statistics
 * Counts by kind and state, plus the registry summary block
 */

use super::entity::Process;
use super::types::{ProcessState, ProcessType};
use crate::core::types::Pid;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Process counts per kind, every kind present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VariantStats {
    pub total: usize,
    pub by_type: BTreeMap<ProcessType, usize>,
}

impl VariantStats {
    pub(crate) fn collect<'a>(processes: impl IntoIterator<Item = &'a Process>) -> Self {
        let mut by_type: BTreeMap<ProcessType, usize> =
            ProcessType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut total = 0;
        for process in processes {
            *by_type.entry(process.process_type()).or_default() += 1;
            total += 1;
        }
        Self { total, by_type }
    }

    #[must_use]
    pub fn count(&self, process_type: ProcessType) -> usize {
        self.by_type.get(&process_type).copied().unwrap_or(0)
    }

    /// Report keyed by `Total` and each kind's label
    #[must_use]
    pub fn to_labeled_map(&self) -> BTreeMap<&'static str, usize> {
        let mut map: BTreeMap<&'static str, usize> = self
            .by_type
            .iter()
            .map(|(t, count)| (t.label(), *count))
            .collect();
        map.insert("Total", self.total);
        map
    }
}

/// Process counts per state, every state present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateStats {
    by_state: BTreeMap<ProcessState, usize>,
}

impl StateStats {
    pub(crate) fn collect<'a>(processes: impl IntoIterator<Item = &'a Process>) -> Self {
        let mut by_state: BTreeMap<ProcessState, usize> =
            ProcessState::ALL.iter().map(|s| (*s, 0)).collect();
        for process in processes {
            *by_state.entry(process.state()).or_default() += 1;
        }
        Self { by_state }
    }

    #[must_use]
    pub fn count(&self, state: ProcessState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.by_state.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessState, usize)> + '_ {
        self.by_state.iter().map(|(s, c)| (*s, *c))
    }
}

/// Snapshot of registry bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrySummary {
    pub process_count: usize,
    pub execution_count: usize,
    pub next_pid: Pid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_priority: Option<f64>,
}

impl RegistrySummary {
    pub(crate) fn collect(processes: &[Process], execution_count: usize, next_pid: Pid) -> Self {
        let average_priority = (!processes.is_empty()).then(|| {
            let sum: u64 = processes.iter().map(|p| u64::from(p.priority())).sum();
            sum as f64 / processes.len() as f64
        });
        Self {
            process_count: processes.len(),
            execution_count,
            next_pid,
            average_priority,
        }
    }
}

impl fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SYSTEM SUMMARY ===")?;
        writeln!(f, "Registered processes: {}", self.process_count)?;
        writeln!(f, "Executions performed: {}", self.execution_count)?;
        writeln!(f, "Next available PID: {}", self.next_pid)?;
        if let Some(avg) = self.average_priority {
            writeln!(f, "Average priority: {:.2}", avg)?;
        }
        Ok(())
    }
}
