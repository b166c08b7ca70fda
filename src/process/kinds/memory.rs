/*!
 * Memory-management Process
 * Manages a block of RAM or virtual memory and compacts it on every run
 */

use super::{Completion, RunResult};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{
    FRAGMENTATION_INITIAL_MAX, FRAGMENTATION_MAX, FRAGMENTATION_MIN, FRAGMENTATION_REDUCTION_MAX,
};
use crate::core::types::Priority;
use crate::process::timing::ExecutionContext;
use crate::process::validation::at_least;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryType {
    Ram,
    Virtual,
}

impl MemoryType {
    pub const NAMES: [&'static str; 2] = ["RAM", "VIRTUAL"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ram => "RAM",
            Self::Virtual => "VIRTUAL",
        }
    }
}

impl FromStr for MemoryType {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RAM" => Ok(Self::Ram),
            "VIRTUAL" => Ok(Self::Virtual),
            _ => Err(ProcessError::invalid_choice("memory type", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryProcess {
    allocated_mb: u64,
    memory_type: MemoryType,
    fragmentation: f64,
}

impl MemoryProcess {
    pub const PRIORITY: Priority = 8;

    /// Starts with a random fragmentation in `[0, 15)` percent
    pub fn new(allocated_mb: i64, memory_type: MemoryType) -> ProcessResult<Self> {
        let initial = rand::thread_rng().gen::<f64>() * FRAGMENTATION_INITIAL_MAX;
        Self::with_fragmentation(allocated_mb, memory_type, initial)
    }

    /// Explicit starting fragmentation, in `[0, 100]` percent
    pub fn with_fragmentation(
        allocated_mb: i64,
        memory_type: MemoryType,
        fragmentation: f64,
    ) -> ProcessResult<Self> {
        Ok(Self {
            allocated_mb: validate_megabytes(allocated_mb)?,
            memory_type,
            fragmentation: validate_fragmentation(fragmentation)?,
        })
    }

    #[inline]
    pub fn allocated_mb(&self) -> u64 {
        self.allocated_mb
    }

    #[inline]
    pub fn memory_type(&self) -> MemoryType {
        self.memory_type
    }

    /// Current fragmentation in percent
    #[inline]
    pub fn fragmentation(&self) -> f64 {
        self.fragmentation
    }

    pub fn set_allocated_mb(&mut self, allocated_mb: i64) -> ProcessResult<()> {
        self.allocated_mb = validate_megabytes(allocated_mb)?;
        Ok(())
    }

    pub fn set_memory_type(&mut self, memory_type: MemoryType) {
        self.memory_type = memory_type;
    }

    pub fn set_fragmentation(&mut self, fragmentation: f64) -> ProcessResult<()> {
        self.fragmentation = validate_fragmentation(fragmentation)?;
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "Memory={} MB, Type={}, Fragmentation={:.2}%",
            self.allocated_mb, self.memory_type, self.fragmentation
        )
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        let elapsed = ctx.base_wait()?;

        let reduction = ctx.entropy().fraction() * FRAGMENTATION_REDUCTION_MAX;
        self.fragmentation = (self.fragmentation - reduction).max(FRAGMENTATION_MIN);

        Ok(Completion::new(
            elapsed,
            format!(
                "Managing {} MB of {} memory | Fragmentation: {:.2}%",
                self.allocated_mb, self.memory_type, self.fragmentation
            ),
        ))
    }
}

fn validate_megabytes(allocated_mb: i64) -> ProcessResult<u64> {
    Ok(at_least("allocated memory (MB)", allocated_mb, 1)? as u64)
}

fn validate_fragmentation(fragmentation: f64) -> ProcessResult<f64> {
    if !(FRAGMENTATION_MIN..=FRAGMENTATION_MAX).contains(&fragmentation) {
        return Err(ProcessError::out_of_range(
            "fragmentation",
            fragmentation,
            FRAGMENTATION_MIN,
            FRAGMENTATION_MAX,
        ));
    }
    Ok(fragmentation)
}
