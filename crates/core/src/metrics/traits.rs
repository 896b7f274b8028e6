use std::time::Duration;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller's request was at fault (4xx).
    Client,
    /// The store or the service failed (5xx).
    Server,
}

impl ErrorClass {
    /// Classifies an HTTP-style status code. Anything below 500 is a client error.
    pub fn from_status(status: u16) -> Self {
        if status >= 500 {
            Self::Server
        } else {
            Self::Client
        }
    }

    /// Metric name prefix, e.g. `4XXError`.
    pub fn metric_prefix(&self) -> &'static str {
        match self {
            Self::Client => "4XXError",
            Self::Server => "5XXError",
        }
    }
}

/// Sink for operation timings and failures.
pub trait MetricsSink: Send + Sync {
    /// Records how long a named operation took.
    fn record_duration(&self, operation: &str, elapsed: Duration);

    /// Records a failed operation. `status` is the HTTP-style status code the
    /// failure maps to and `class` its 4xx/5xx bucket.
    fn record_error(&self, operation: &str, class: ErrorClass, status: u16, message: &str);
}
