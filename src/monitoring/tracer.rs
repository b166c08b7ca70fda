/*!
 * Structured Tracing
 * Subscriber setup and per-execution spans using the tracing crate
 *
 * Features:
 * - Trace ID per execution for log correlation
 * - JSON-formatted logs for structured parsing
 * - Slow execution warnings
 */

use crate::core::limits::SLOW_EXECUTION_THRESHOLD_MS;
use crate::core::types::{Millis, Pid};
use crate::process::ProcessType;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PROCSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("PROCSIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::NONE)
                    .compact(),
            )
            .try_init()
    };

    // A subscriber installed earlier (tests, embedding apps) wins
    if initialized.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for log correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one process execution
pub struct ExecutionSpan {
    span: tracing::Span,
    start: Instant,
    pid: Pid,
    trace_id: String,
}

impl ExecutionSpan {
    pub fn new(pid: Pid, process_type: ProcessType) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "execution",
            trace_id = %trace_id,
            pid = pid,
            process_type = %process_type,
            elapsed_ms = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        let _entered = span.enter();
        debug!(pid = pid, process_type = %process_type, "execution started");
        drop(_entered);

        Self {
            span,
            start: Instant::now(),
            pid,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Simulated duration reported by the workload
    pub fn record_elapsed(&self, elapsed_ms: Millis) {
        self.span.record("elapsed_ms", elapsed_ms);
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "completed" } else { "failed" });
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "aborted");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for ExecutionSpan {
    fn drop(&mut self) {
        let wall = self.start.elapsed();
        let _entered = self.span.enter();

        if wall.as_millis() > SLOW_EXECUTION_THRESHOLD_MS {
            warn!(
                trace_id = %self.trace_id,
                pid = self.pid,
                wall_ms = wall.as_millis() as u64,
                slow = true,
                "slow execution detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                pid = self.pid,
                wall_us = wall.as_micros() as u64,
                "execution finished"
            );
        }
    }
}
