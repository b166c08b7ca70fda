/*!
 * ID Generation System
 * Centralized PID allocation shared by every registry that needs one id space
 */

use super::limits::PID_START;
use super::types::Pid;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

// ============================================================================
// ID Generator Trait
// ============================================================================

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID, or `None` once the id space is used up
    fn next(&self) -> Option<T>;

    /// Get the value the next call to `next` will return
    fn current(&self) -> T;
}

// ============================================================================
// PID Allocator
// ============================================================================

/// Monotonic PID allocator
///
/// Clones share the same counter, so handing a clone to several registries
/// gives them one id space. Ids are never recycled: once `Pid::MAX` is
/// reached the allocator stops handing out ids instead of wrapping.
#[derive(Debug, Clone)]
pub struct PidAllocator {
    counter: Arc<AtomicU32>,
}

static GLOBAL_PIDS: OnceLock<PidAllocator> = OnceLock::new();

impl PidAllocator {
    /// Create a private allocator starting at `start`
    #[inline]
    #[must_use]
    pub fn new(start: Pid) -> Self {
        Self {
            counter: Arc::new(AtomicU32::new(start)),
        }
    }

    /// The process-wide allocator, starting at [`PID_START`]
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_PIDS.get_or_init(|| Self::new(PID_START)).clone()
    }

    /// Whether two handles draw from the same counter
    #[inline]
    #[must_use]
    pub fn shares_counter_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new(PID_START)
    }
}

impl IdGenerator<Pid> for PidAllocator {
    #[inline]
    fn next(&self) -> Option<Pid> {
        self.counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pid| pid.checked_add(1))
            .ok()
    }

    #[inline]
    fn current(&self) -> Pid {
        self.counter.load(Ordering::SeqCst)
    }
}
