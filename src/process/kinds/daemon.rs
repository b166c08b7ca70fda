/*!
 * Daemon Process
 * Background service with an optional auto-start flag
 */

use super::{Completion, RunResult};
use crate::core::errors::ProcessResult;
use crate::core::limits::DAEMON_MONITOR_INTERVAL_SECS;
use crate::core::types::Priority;
use crate::process::timing::ExecutionContext;
use crate::process::validation::{at_least, non_empty};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DaemonProcess {
    service: String,
    auto_start: bool,
    monitor_interval_secs: u32,
}

impl DaemonProcess {
    pub const PRIORITY: Priority = 3;

    pub fn new(service: &str, auto_start: bool) -> ProcessResult<Self> {
        Ok(Self {
            service: non_empty("service name", service)?,
            auto_start,
            monitor_interval_secs: DAEMON_MONITOR_INTERVAL_SECS,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    #[inline]
    pub fn monitor_interval_secs(&self) -> u32 {
        self.monitor_interval_secs
    }

    pub fn set_service(&mut self, service: &str) -> ProcessResult<()> {
        self.service = non_empty("service name", service)?;
        Ok(())
    }

    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }

    pub fn set_monitor_interval(&mut self, secs: i64) -> ProcessResult<()> {
        let secs = at_least("monitoring interval", secs, 1)?;
        self.monitor_interval_secs = u32::try_from(secs).unwrap_or(u32::MAX);
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "Service={}, AutoStart={}, Monitoring={}s",
            self.service,
            if self.auto_start { "yes" } else { "no" },
            self.monitor_interval_secs
        )
    }

    pub(super) fn run(&mut self, ctx: &ExecutionContext) -> RunResult {
        let elapsed = ctx.base_wait()?;

        let mut detail = format!("Service '{}' running in background.", self.service);
        if self.auto_start {
            detail.push_str(" [Autoiniciable]");
        }
        detail.push_str(&format!(" Monitoring every {}s", self.monitor_interval_secs));

        Ok(Completion::new(elapsed, detail))
    }
}
