//! Metrics reporting for repositories.

mod metered;
mod tracing_sink;

pub use metered::MeteredRepository;
pub use tracing_sink::TracingMetrics;
