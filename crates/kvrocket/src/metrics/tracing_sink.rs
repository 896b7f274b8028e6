use std::time::Duration;

use kvrocket_core::metrics::{ErrorClass, MetricsSink};

/// Reports metrics as structured log events.
///
/// Durations are emitted at `info` as `ExecutionTime:<operation>`. Failures
/// are emitted as `4XXError:<operation>` at `warn` and `5XXError:<operation>`
/// at `error`, with the status code as a field.
#[derive(Debug, Clone)]
pub struct TracingMetrics {
    namespace: String,
}

impl TracingMetrics {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl MetricsSink for TracingMetrics {
    fn record_duration(&self, operation: &str, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            namespace = %self.namespace,
            metric = %format!("ExecutionTime:{}", operation),
            elapsed_ms,
            "Operation completed"
        );
    }

    fn record_error(&self, operation: &str, class: ErrorClass, status: u16, message: &str) {
        let metric = format!("{}:{}", class.metric_prefix(), operation);
        match class {
            ErrorClass::Client => tracing::warn!(
                namespace = %self.namespace,
                metric = %metric,
                status,
                error = message,
                "Operation failed"
            ),
            ErrorClass::Server => tracing::error!(
                namespace = %self.namespace,
                metric = %metric,
                status,
                error = message,
                "Operation failed"
            ),
        }
    }
}
