/*!
 * System Limits and Constants
 *
 * Centralized location for the simulator's bounds, default values and timing
 * constants. Grouped by domain.
 */

use super::types::{Millis, Pid, Priority};

// =============================================================================
// IDENTITY
// =============================================================================

/// First PID handed out by a fresh allocator
pub const PID_START: Pid = 1000;

/// Maximum length of a process name accepted at registration
pub const NAME_MAX_LEN: usize = 50;

// =============================================================================
// PRIORITY
// =============================================================================

/// Lowest valid priority
pub const PRIORITY_MIN: Priority = 1;

/// Highest valid priority
pub const PRIORITY_MAX: Priority = 10;

/// Priority of a process that does not override it
pub const PRIORITY_DEFAULT: Priority = 5;

// =============================================================================
// SHARED EXECUTION TIMING
// =============================================================================

/// Lower bound of the randomized base wait
pub const BASE_WAIT_MIN_MS: Millis = 100;

/// Upper bound of the randomized base wait (inclusive)
pub const BASE_WAIT_MAX_MS: Millis = 500;

/// Wall time after which an execution span reports a slow execution
pub const SLOW_EXECUTION_THRESHOLD_MS: u128 = 2_000;

// =============================================================================
// CPU
// =============================================================================

pub const CPU_CORES_MIN: u32 = 1;
pub const CPU_CORES_MAX: u32 = 16;

/// Cap on the number of loop iterations actually computed per execution
pub const CPU_WORK_LOOP_CAP: u64 = 1_000;

// =============================================================================
// I/O
// =============================================================================

pub const IO_WAIT_NETWORK_MS: Millis = 50;
pub const IO_WAIT_DISK_MS: Millis = 100;
pub const IO_WAIT_KEYBOARD_MS: Millis = 200;

// =============================================================================
// DAEMON
// =============================================================================

/// Default monitoring interval in seconds
pub const DAEMON_MONITOR_INTERVAL_SECS: u32 = 30;

// =============================================================================
// NETWORK
// =============================================================================

pub const PORT_MIN: u16 = 1;
pub const PORT_MAX: u16 = 65_535;

pub const PACKETS_MIN: u32 = 100;
pub const PACKETS_MAX: u32 = 1_000;

// =============================================================================
// MEMORY
// =============================================================================

/// Upper bound of the fragmentation drawn at construction (percent)
pub const FRAGMENTATION_INITIAL_MAX: f64 = 15.0;

/// Largest fragmentation reduction applied by one execution (points)
pub const FRAGMENTATION_REDUCTION_MAX: f64 = 2.0;

/// Valid fragmentation range for explicit updates (percent)
pub const FRAGMENTATION_MIN: f64 = 0.0;
pub const FRAGMENTATION_MAX: f64 = 100.0;

// =============================================================================
// BATCH
// =============================================================================

pub const TASK_WAIT_MIN_MS: Millis = 50;
pub const TASK_WAIT_MAX_MS: Millis = 150;
