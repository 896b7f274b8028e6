mod measure;
mod traits;

pub use measure::{measure, report_error};
pub use traits::{ErrorClass, MetricsSink};
