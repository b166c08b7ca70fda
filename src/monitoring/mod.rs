/*!
 * Monitoring
 * Structured tracing for process executions
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, ExecutionSpan};
