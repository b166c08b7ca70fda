/*!
 * I/O-bound Process
 * Blocks on a device for a fixed, device-specific time before finishing
 */

use super::{Completion, Lifecycle, RunResult};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::{IO_WAIT_DISK_MS, IO_WAIT_KEYBOARD_MS, IO_WAIT_NETWORK_MS};
use crate::core::types::{Millis, Priority};
use crate::process::timing::ExecutionContext;
use crate::process::types::ProcessState;
use crate::process::validation::at_least;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device an I/O process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Device {
    Keyboard,
    Disk,
    Network,
}

impl Device {
    pub const NAMES: [&'static str; 3] = ["KEYBOARD", "DISK", "NETWORK"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keyboard => "KEYBOARD",
            Self::Disk => "DISK",
            Self::Network => "NETWORK",
        }
    }

    /// Blocking time per execution
    #[must_use]
    pub const fn wait_ms(&self) -> Millis {
        match self {
            Self::Network => IO_WAIT_NETWORK_MS,
            Self::Disk => IO_WAIT_DISK_MS,
            Self::Keyboard => IO_WAIT_KEYBOARD_MS,
        }
    }
}

impl FromStr for Device {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KEYBOARD" => Ok(Self::Keyboard),
            "DISK" => Ok(Self::Disk),
            "NETWORK" => Ok(Self::Network),
            _ => Err(ProcessError::invalid_choice("device", s, &Self::NAMES)),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IoProcess {
    device: Device,
    bytes: u64,
}

impl IoProcess {
    pub const PRIORITY: Priority = 4;

    pub fn new(device: Device, bytes: i64) -> ProcessResult<Self> {
        Ok(Self {
            device,
            bytes: validate_bytes(bytes)?,
        })
    }

    #[inline]
    pub fn device(&self) -> Device {
        self.device
    }

    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Time spent blocked on the device per execution
    #[inline]
    pub fn wait_ms(&self) -> Millis {
        self.device.wait_ms()
    }

    pub fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub fn set_bytes(&mut self, bytes: i64) -> ProcessResult<()> {
        self.bytes = validate_bytes(bytes)?;
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!("Device={}, Bytes={}", self.device, self.bytes)
    }

    pub(super) fn run(
        &mut self,
        ctx: &ExecutionContext,
        lifecycle: &mut Lifecycle<'_>,
    ) -> RunResult {
        let blocked = self.wait_ms();

        lifecycle.transition(ProcessState::Blocked);
        ctx.wait_ms(blocked)?;
        lifecycle.transition(ProcessState::Running);

        let elapsed = ctx.base_wait()?;

        Ok(Completion::new(
            elapsed,
            format!(
                "Transferred {} bytes via {}. Blocked: {}ms",
                self.bytes, self.device, blocked
            ),
        ))
    }
}

fn validate_bytes(bytes: i64) -> ProcessResult<u64> {
    Ok(at_least("byte count", bytes, 1)? as u64)
}
