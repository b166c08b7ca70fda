/*!
 * Simulation Configuration
 *
 * Runtime configuration for execution timing, registration rules and bulk
 * execution policy. Defaults reproduce the reference timings; every field can
 * be overridden from `PROCSIM_*` environment variables.
 */

use super::errors::{ProcessError, ProcessResult};
use super::limits::{
    BASE_WAIT_MAX_MS, BASE_WAIT_MIN_MS, NAME_MAX_LEN, PID_START, TASK_WAIT_MAX_MS,
    TASK_WAIT_MIN_MS,
};
use super::types::{Millis, Pid};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What `execute_all` does after an execution is interrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first aborted execution
    #[default]
    FailFast,
    /// Keep going and report every outcome
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_fast" | "failfast" | "fail-fast" => Ok(Self::FailFast),
            "continue" | "best_effort" => Ok(Self::Continue),
            other => Err(ProcessError::InvalidConfig(format!(
                "unknown failure policy '{}' (expected fail_fast or continue)",
                other
            ))),
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Lower bound of the shared randomized wait
    pub base_wait_min_ms: Millis,
    /// Upper bound of the shared randomized wait (inclusive)
    pub base_wait_max_ms: Millis,
    /// Lower bound of a batch task wait
    pub task_wait_min_ms: Millis,
    /// Upper bound of a batch task wait (inclusive)
    pub task_wait_max_ms: Millis,
    /// Longest process name accepted by `register`
    pub name_max_len: usize,
    /// First PID of a private allocator built from this config
    pub pid_start: Pid,
    pub failure_policy: FailurePolicy,
    /// Fixed RNG seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_wait_min_ms: BASE_WAIT_MIN_MS,
            base_wait_max_ms: BASE_WAIT_MAX_MS,
            task_wait_min_ms: TASK_WAIT_MIN_MS,
            task_wait_max_ms: TASK_WAIT_MAX_MS,
            name_max_len: NAME_MAX_LEN,
            pid_start: PID_START,
            failure_policy: FailurePolicy::FailFast,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Configuration with every simulated wait collapsed to zero
    pub const fn instant() -> Self {
        Self {
            base_wait_min_ms: 0,
            base_wait_max_ms: 0,
            task_wait_min_ms: 0,
            task_wait_max_ms: 0,
            name_max_len: NAME_MAX_LEN,
            pid_start: PID_START,
            failure_policy: FailurePolicy::FailFast,
            seed: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_base_wait(mut self, min_ms: Millis, max_ms: Millis) -> Self {
        self.base_wait_min_ms = min_ms;
        self.base_wait_max_ms = max_ms;
        self
    }

    /// Load defaults overlaid with `PROCSIM_*` environment variables
    ///
    /// Environment variables:
    /// - PROCSIM_BASE_WAIT_MIN_MS / PROCSIM_BASE_WAIT_MAX_MS
    /// - PROCSIM_TASK_WAIT_MIN_MS / PROCSIM_TASK_WAIT_MAX_MS
    /// - PROCSIM_NAME_MAX_LEN
    /// - PROCSIM_PID_START
    /// - PROCSIM_FAILURE_POLICY (fail_fast | continue)
    /// - PROCSIM_SEED
    pub fn from_env() -> ProcessResult<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse("PROCSIM_BASE_WAIT_MIN_MS")? {
            config.base_wait_min_ms = v;
        }
        if let Some(v) = env_parse("PROCSIM_BASE_WAIT_MAX_MS")? {
            config.base_wait_max_ms = v;
        }
        if let Some(v) = env_parse("PROCSIM_TASK_WAIT_MIN_MS")? {
            config.task_wait_min_ms = v;
        }
        if let Some(v) = env_parse("PROCSIM_TASK_WAIT_MAX_MS")? {
            config.task_wait_max_ms = v;
        }
        if let Some(v) = env_parse("PROCSIM_NAME_MAX_LEN")? {
            config.name_max_len = v;
        }
        if let Some(v) = env_parse("PROCSIM_PID_START")? {
            config.pid_start = v;
        }
        if let Some(v) = env_parse("PROCSIM_FAILURE_POLICY")? {
            config.failure_policy = v;
        }
        if let Some(v) = env_parse("PROCSIM_SEED")? {
            config.seed = Some(v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject inverted ranges and unusable limits
    pub fn validate(&self) -> ProcessResult<()> {
        if self.base_wait_min_ms > self.base_wait_max_ms {
            return Err(ProcessError::InvalidConfig(format!(
                "base wait range is inverted ({} > {})",
                self.base_wait_min_ms, self.base_wait_max_ms
            )));
        }
        if self.task_wait_min_ms > self.task_wait_max_ms {
            return Err(ProcessError::InvalidConfig(format!(
                "task wait range is inverted ({} > {})",
                self.task_wait_min_ms, self.task_wait_max_ms
            )));
        }
        if self.name_max_len == 0 {
            return Err(ProcessError::InvalidConfig(
                "name_max_len must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str) -> ProcessResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ProcessError::InvalidConfig(format!("{}={}: {}", key, raw, e))),
        Err(_) => Ok(None),
    }
}
