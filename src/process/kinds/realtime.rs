/*!
 * Real-time Process
 * Measures its own wall time against a deadline
 */

use super::{Completion, RunResult};
use crate::core::errors::ProcessResult;
use crate::core::types::{Millis, Priority};
use crate::process::timing::ExecutionContext;
use crate::process::validation::at_least;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RealTimeProcess {
    deadline_ms: Millis,
    critical: bool,
    measured_ms: Millis,
    simulated_ms: Millis,
    jitter_ms: f64,
}

impl RealTimeProcess {
    pub const CRITICAL_PRIORITY: Priority = 10;
    pub const NON_CRITICAL_PRIORITY: Priority = 9;

    pub fn new(deadline_ms: i64, critical: bool) -> ProcessResult<Self> {
        Ok(Self {
            deadline_ms: validate_deadline(deadline_ms)?,
            critical,
            measured_ms: 0,
            simulated_ms: 0,
            jitter_ms: 0.0,
        })
    }

    #[inline]
    pub const fn priority(&self) -> Priority {
        if self.critical {
            Self::CRITICAL_PRIORITY
        } else {
            Self::NON_CRITICAL_PRIORITY
        }
    }

    #[inline]
    pub fn deadline_ms(&self) -> Millis {
        self.deadline_ms
    }

    #[inline]
    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// Wall time measured by the last execution
    #[inline]
    pub fn measured_ms(&self) -> Millis {
        self.measured_ms
    }

    /// Duration drawn for the last execution
    #[inline]
    pub fn simulated_ms(&self) -> Millis {
        self.simulated_ms
    }

    /// `|measured - simulated|` of the last execution
    #[inline]
    pub fn jitter_ms(&self) -> f64 {
        self.jitter_ms
    }

    pub fn meets_deadline(&self) -> bool {
        self.measured_ms <= self.deadline_ms
    }

    /// Share of the deadline used by the last execution, in percent
    pub fn deadline_utilization(&self) -> f64 {
        self.measured_ms as f64 / self.deadline_ms as f64 * 100.0
    }

    pub fn remaining_deadline_ms(&self) -> Millis {
        self.deadline_ms.saturating_sub(self.measured_ms)
    }

    pub fn criticality(&self) -> &'static str {
        if self.critical {
            "CRITICAL - a missed deadline can damage the system"
        } else {
            "NON-CRITICAL - a missed deadline only affects performance"
        }
    }

    pub fn set_deadline(&mut self, deadline_ms: i64) -> ProcessResult<()> {
        self.deadline_ms = validate_deadline(deadline_ms)?;
        Ok(())
    }

    /// Priority follows criticality, so only `Process::set_critical` calls this
    pub(crate) fn set_critical(&mut self, critical: bool) {
        self.critical = critical;
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "Deadline={}ms, Critical={}, Jitter={:.2}ms",
            self.deadline_ms,
            if self.critical { "yes" } else { "no" },
            self.jitter_ms
        )
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        let start = ctx.now();
        let simulated = ctx.base_wait()?;
        let measured = (ctx.now().saturating_sub(start)).as_millis() as Millis;

        self.simulated_ms = simulated;
        self.measured_ms = measured;
        self.jitter_ms = (measured as f64 - simulated as f64).abs();

        let mut detail = format!(
            "Deadline: {}ms | Actual time: {}ms",
            self.deadline_ms, measured
        );
        if self.meets_deadline() {
            detail.push_str(" ✓ PASSED");
        } else {
            detail.push_str(" ✗ EXCEEDED");
        }
        if self.critical {
            detail.push_str(" [CRÍTICO]");
        }
        detail.push_str(&format!(" | Jitter: {:.2}ms", self.jitter_ms));

        Ok(Completion::new(measured, detail))
    }
}

fn validate_deadline(deadline_ms: i64) -> ProcessResult<Millis> {
    Ok(at_least("deadline (ms)", deadline_ms, 1)? as Millis)
}
