use std::future::Future;
use std::time::Instant;

use crate::storage::{access_error_to_status_code, AccessError};

use super::{ErrorClass, MetricsSink};

/// Awaits `future` and records its wall-clock duration under `operation`.
pub async fn measure<M, F, T>(operation: &str, sink: &M, future: F) -> T
where
    M: MetricsSink + ?Sized,
    F: Future<Output = T>,
{
    let start = Instant::now();
    let output = future.await;
    sink.record_duration(operation, start.elapsed());
    output
}

/// Records an access layer failure with its 4xx/5xx class.
pub fn report_error<M>(operation: &str, sink: &M, error: &AccessError)
where
    M: MetricsSink + ?Sized,
{
    let status = access_error_to_status_code(error);
    sink.record_error(
        operation,
        ErrorClass::from_status(status),
        status,
        &error.to_string(),
    );
}
