/*!
 * CPU-bound Process
 * Arithmetic-heavy workload spread across a number of cores
 */

use super::{Completion, RunResult};
use crate::core::errors::ProcessResult;
use crate::core::limits::{CPU_CORES_MAX, CPU_CORES_MIN, CPU_WORK_LOOP_CAP};
use crate::core::types::Priority;
use crate::process::timing::ExecutionContext;
use crate::process::validation::{at_least, in_range};
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CpuProcess {
    operations: u64,
    cores: u32,
}

impl CpuProcess {
    pub const PRIORITY: Priority = 7;

    /// `operations >= 1`, `cores` in 1..=16
    pub fn new(operations: i64, cores: i64) -> ProcessResult<Self> {
        Ok(Self {
            operations: validate_operations(operations)?,
            cores: validate_cores(cores)?,
        })
    }

    #[inline]
    pub fn operations(&self) -> u64 {
        self.operations
    }

    #[inline]
    pub fn cores(&self) -> u32 {
        self.cores
    }

    pub fn set_operations(&mut self, operations: i64) -> ProcessResult<()> {
        self.operations = validate_operations(operations)?;
        Ok(())
    }

    pub fn set_cores(&mut self, cores: i64) -> ProcessResult<()> {
        self.cores = validate_cores(cores)?;
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!("Operations={}, Cores={}", self.operations, self.cores)
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        let elapsed = ctx.base_wait()?;
        std::hint::black_box(crunch(self.operations));

        Ok(Completion::new(
            elapsed,
            format!(
                "Executed {} operations on {} cores. Time: {}ms",
                self.operations, self.cores, elapsed
            ),
        ))
    }
}

/// Bounded trigonometric/power loop standing in for real computation
fn crunch(operations: u64) -> f64 {
    (0..operations.min(CPU_WORK_LOOP_CAP))
        .map(|i| {
            let x = i as f64;
            (x * PI).sqrt() + x.powi(2) + (x / 180.0 * PI).sin()
        })
        .sum()
}

fn validate_operations(operations: i64) -> ProcessResult<u64> {
    Ok(at_least("operation count", operations, 1)? as u64)
}

fn validate_cores(cores: i64) -> ProcessResult<u32> {
    Ok(in_range(
        "core count",
        cores,
        i64::from(CPU_CORES_MIN),
        i64::from(CPU_CORES_MAX),
    )? as u32)
}
