/*!
 * Process Registry Builder
 * Builder pattern for ProcessRegistry construction
 */

use super::registry::ProcessRegistry;
use super::timing::{Clock, Entropy, ExecutionContext, SystemClock};
use crate::core::config::SimulationConfig;
use crate::core::errors::ProcessResult;
use crate::core::id::PidAllocator;
use std::sync::Arc;
use tracing::info;

/// Builder for ProcessRegistry
pub struct ProcessRegistryBuilder {
    config: SimulationConfig,
    clock: Option<Arc<dyn Clock>>,
    entropy: Option<Entropy>,
    pids: Option<PidAllocator>,
    private_pids: bool,
}

impl ProcessRegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            clock: None,
            entropy: None,
            pids: None,
            private_pids: false,
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the wall clock, e.g. with a `ManualClock` in tests
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_entropy(mut self, entropy: Entropy) -> Self {
        self.entropy = Some(entropy);
        self
    }

    /// Reproducible draws; same as setting `seed` in the config
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Share an id space with other registries
    pub fn with_pid_allocator(mut self, pids: PidAllocator) -> Self {
        self.pids = Some(pids);
        self
    }

    /// Own counter starting at the configured `pid_start`
    pub fn with_private_pids(mut self) -> Self {
        self.private_pids = true;
        self
    }

    /// Build the ProcessRegistry, validating the configuration first
    pub fn build(self) -> ProcessResult<ProcessRegistry> {
        self.config.validate()?;

        let mut features = Vec::new();
        if self.clock.is_some() {
            features.push("custom-clock");
        }
        if self.entropy.is_some() || self.config.seed.is_some() {
            features.push("deterministic-entropy");
        }

        let pids = match (self.pids, self.private_pids) {
            (Some(pids), _) => {
                features.push("shared-pids");
                pids
            }
            (None, true) => {
                features.push("private-pids");
                PidAllocator::new(self.config.pid_start)
            }
            (None, false) => PidAllocator::global(),
        };

        let entropy = match (self.entropy, self.config.seed) {
            (Some(entropy), _) => entropy,
            (None, Some(seed)) => Entropy::seeded(seed),
            (None, None) => Entropy::from_os(),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        info!(
            failure_policy = ?self.config.failure_policy,
            "Process registry initialized with: {}",
            if features.is_empty() {
                "defaults".to_string()
            } else {
                features.join(", ")
            }
        );

        let context = ExecutionContext::new(clock, entropy, self.config);
        Ok(ProcessRegistry::from_parts(pids, Arc::new(context)))
    }
}

impl Default for ProcessRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
