/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Priority level (1-10, higher is more important)
pub type Priority = u8;

/// Simulated duration in milliseconds
pub type Millis = u64;
