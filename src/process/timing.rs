/*!
 * Simulation Timing
 *
 * Injectable clock and randomness used by process executions. The system
 * clock blocks the calling thread for real; the manual clock advances virtual
 * time instantly so tests run deterministically.
 */

use crate::core::config::SimulationConfig;
use crate::core::types::Millis;
use parking_lot::{Condvar, Mutex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// A simulated wait was cut short
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("simulated wait interrupted")]
pub struct Interrupted;

/// Time source for simulated executions
pub trait Clock: Send + Sync {
    /// Monotonic time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Block for `duration`, or fail if the wait is interrupted
    fn sleep(&self, duration: Duration) -> Result<(), Interrupted>;
}

// ============================================================================
// System Clock
// ============================================================================

/// Wall-clock time with interruptible waits
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    pending_interrupt: Mutex<bool>,
    wakeup: Condvar,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            pending_interrupt: Mutex::new(false),
            wakeup: Condvar::new(),
        }
    }

    /// Interrupt the wait in progress, or the next one if none is running
    pub fn interrupt(&self) {
        let mut pending = self.pending_interrupt.lock();
        *pending = true;
        self.wakeup.notify_all();
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now() + duration;
        let mut pending = self.pending_interrupt.lock();
        loop {
            if std::mem::take(&mut *pending) {
                return Err(Interrupted);
            }
            if self.wakeup.wait_until(&mut pending, deadline).timed_out() {
                return if std::mem::take(&mut *pending) {
                    Err(Interrupted)
                } else {
                    Ok(())
                };
            }
        }
    }
}

// ============================================================================
// Manual Clock
// ============================================================================

/// Virtual clock: `sleep` returns immediately and advances `now`
#[derive(Debug, Default)]
pub struct ManualClock {
    state: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    overhead: Duration,
    sleeps: usize,
    interrupt_at: Option<usize>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep advances time by its duration plus `overhead`
    pub fn with_overhead(overhead: Duration) -> Self {
        Self {
            state: Mutex::new(ManualState {
                overhead,
                ..ManualState::default()
            }),
        }
    }

    /// Make the `nth` upcoming sleep (1-based) fail with [`Interrupted`]
    pub fn interrupt_after(&self, nth: usize) {
        let mut state = self.state.lock();
        state.interrupt_at = Some(state.sleeps + nth.max(1));
    }

    /// Advance virtual time without sleeping
    pub fn advance(&self, by: Duration) {
        self.state.lock().now += by;
    }

    /// Number of sleeps performed so far, interrupted ones included
    pub fn sleep_count(&self) -> usize {
        self.state.lock().sleeps
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let mut state = self.state.lock();
        state.sleeps += 1;
        if state.interrupt_at == Some(state.sleeps) {
            state.interrupt_at = None;
            return Err(Interrupted);
        }
        let step = duration + state.overhead;
        state.now += step;
        Ok(())
    }
}

// ============================================================================
// Entropy
// ============================================================================

/// Random source for simulated durations and measurements
#[derive(Debug)]
pub struct Entropy {
    rng: Mutex<StdRng>,
}

impl Entropy {
    /// Seeded from the operating system
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform draw from `min..=max`
    pub fn between(&self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.lock().gen_range(min..=max)
    }

    /// Uniform draw from `[0, 1)`
    pub fn fraction(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

// ============================================================================
// Execution Context
// ============================================================================

/// Everything an execution needs besides the process itself
pub struct ExecutionContext {
    clock: Arc<dyn Clock>,
    entropy: Entropy,
    config: SimulationConfig,
}

impl ExecutionContext {
    pub fn new(clock: Arc<dyn Clock>, entropy: Entropy, config: SimulationConfig) -> Self {
        Self {
            clock,
            entropy,
            config,
        }
    }

    /// Real waits, OS-seeded randomness (or the configured seed)
    pub fn system(config: SimulationConfig) -> Self {
        let entropy = match config.seed {
            Some(seed) => Entropy::seeded(seed),
            None => Entropy::from_os(),
        };
        Self::new(Arc::new(SystemClock::new()), entropy, config)
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    #[inline]
    pub fn entropy(&self) -> &Entropy {
        &self.entropy
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Fixed wait
    pub fn wait_ms(&self, ms: Millis) -> Result<(), Interrupted> {
        self.clock.sleep(Duration::from_millis(ms))
    }

    /// Draw the shared base duration and wait for it
    pub fn base_wait(&self) -> Result<Millis, Interrupted> {
        let ms = self
            .entropy
            .between(self.config.base_wait_min_ms, self.config.base_wait_max_ms);
        self.wait_ms(ms)?;
        Ok(ms)
    }

    /// Draw a batch task duration and wait for it
    pub fn task_wait(&self) -> Result<Millis, Interrupted> {
        let ms = self
            .entropy
            .between(self.config.task_wait_min_ms, self.config.task_wait_max_ms);
        self.wait_ms(ms)?;
        Ok(ms)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
