//! Metered repository decorator.
//!
//! Wraps any `Repository<T>` and reports the duration of every call, plus the
//! 4xx/5xx class of every failure, to a `MetricsSink`.

use std::sync::Arc;

use async_trait::async_trait;

use kvrocket_core::metrics::{measure, report_error, MetricsSink};
use kvrocket_core::storage::{Cursor, Page, Repository, Result};

/// Metered repository decorator.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `M` - The metrics sink
pub struct MeteredRepository<R, M> {
    inner: Arc<R>,
    sink: Arc<M>,
}

impl<R, M> MeteredRepository<R, M>
where
    M: MetricsSink,
{
    /// Creates a new metered repository.
    ///
    /// # Arguments
    ///
    /// * `inner` - The repository whose calls are measured
    /// * `sink` - Where durations and failures are reported
    pub fn new(inner: Arc<R>, sink: Arc<M>) -> Self {
        Self { inner, sink }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Report the error, if any, and pass the result through.
    fn observe<V>(&self, operation: &str, result: Result<V>) -> Result<V> {
        if let Err(err) = &result {
            report_error(operation, self.sink.as_ref(), err);
        }
        result
    }
}

#[async_trait]
impl<T, R, M> Repository<T> for MeteredRepository<R, M>
where
    T: Send + Sync + 'static,
    R: Repository<T> + 'static,
    M: MetricsSink + 'static,
{
    async fn create(&self, record: T) -> Result<T> {
        let result = measure("create", self.sink.as_ref(), self.inner.create(record)).await;
        self.observe("create", result)
    }

    async fn fetch(&self, partition_key: &str, range_key: &str) -> Result<Option<T>> {
        let result = measure(
            "fetch",
            self.sink.as_ref(),
            self.inner.fetch(partition_key, range_key),
        )
        .await;
        self.observe("fetch", result)
    }

    async fn fetch_all(
        &self,
        partition_key: &str,
        limit: u32,
        cursor: Option<&Cursor>,
    ) -> Result<Page<T>> {
        let result = measure(
            "fetch_all",
            self.sink.as_ref(),
            self.inner.fetch_all(partition_key, limit, cursor),
        )
        .await;
        self.observe("fetch_all", result)
    }

    async fn update(&self, record: &T) -> Result<()> {
        let result = measure("update", self.sink.as_ref(), self.inner.update(record)).await;
        self.observe("update", result)
    }

    async fn delete(&self, partition_key: &str, range_key: &str) -> Result<()> {
        let result = measure(
            "delete",
            self.sink.as_ref(),
            self.inner.delete(partition_key, range_key),
        )
        .await;
        self.observe("delete", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use kvrocket_core::metrics::ErrorClass;
    use kvrocket_core::storage::{AccessError, StoreError};

    #[derive(Default)]
    struct RecordingSink {
        durations: Mutex<Vec<String>>,
        errors: Mutex<Vec<(String, ErrorClass, u16)>>,
    }

    impl RecordingSink {
        fn durations(&self) -> Vec<String> {
            self.durations.lock().unwrap().clone()
        }

        fn errors(&self) -> Vec<(String, ErrorClass, u16)> {
            self.errors.lock().unwrap().clone()
        }
    }

    impl MetricsSink for RecordingSink {
        fn record_duration(&self, operation: &str, _elapsed: Duration) {
            self.durations.lock().unwrap().push(operation.to_string());
        }

        fn record_error(&self, operation: &str, class: ErrorClass, status: u16, _message: &str) {
            self.errors
                .lock()
                .unwrap()
                .push((operation.to_string(), class, status));
        }
    }

    /// Repository with scripted outcomes: pages and fetches succeed with
    /// nothing, creates fail with a client error, deletes with a server error.
    #[derive(Default)]
    struct ScriptedRepository {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Repository<String> for ScriptedRepository {
        async fn create(&self, _record: String) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AccessError::InvalidKey("empty".to_string()))
        }

        async fn fetch(&self, _: &str, _: &str) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn fetch_all(&self, _: &str, _: u32, _: Option<&Cursor>) -> Result<Page<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Page::new(vec!["2021".to_string()], None))
        }

        async fn update(&self, _record: &String) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete(&self, _: &str, _: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::ConnectionFailed("down".to_string()).into())
        }
    }

    fn metered() -> (
        Arc<ScriptedRepository>,
        Arc<RecordingSink>,
        MeteredRepository<ScriptedRepository, RecordingSink>,
    ) {
        let inner = Arc::new(ScriptedRepository::default());
        let sink = Arc::new(RecordingSink::default());
        let metered = MeteredRepository::new(inner.clone(), sink.clone());
        (inner, sink, metered)
    }

    #[tokio::test]
    async fn test_every_call_records_duration_once() {
        let (inner, sink, metered) = metered();

        let _ = metered.create("x".to_string()).await;
        let _ = metered.fetch("user#42", "2021").await;
        let _ = metered.fetch_all("user#42", 10, None).await;
        let _ = metered.update(&"x".to_string()).await;
        let _ = metered.delete("user#42", "2021").await;

        assert_eq!(
            sink.durations(),
            vec!["create", "fetch", "fetch_all", "update", "delete"]
        );
        assert_eq!(inner.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_results_pass_through_unchanged() {
        let (_, _, metered) = metered();

        let page = metered.fetch_all("user#42", 10, None).await.unwrap();
        assert_eq!(page.items, vec!["2021".to_string()]);
        assert_eq!(
            metered.create("x".to_string()).await,
            Err(AccessError::InvalidKey("empty".to_string()))
        );
    }

    #[tokio::test]
    async fn test_not_found_is_not_an_error() {
        let (_, sink, metered) = metered();

        let fetched = metered.fetch("user#42", "1999").await.unwrap();
        assert!(fetched.is_none());
        assert!(sink.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_classified() {
        let (_, sink, metered) = metered();

        let _ = metered.create("x".to_string()).await;
        let _ = metered.delete("user#42", "2021").await;

        assert_eq!(
            sink.errors(),
            vec![
                ("create".to_string(), ErrorClass::Client, 400),
                ("delete".to_string(), ErrorClass::Server, 503),
            ]
        );
    }

    #[tokio::test]
    async fn test_bool_helpers_go_through_metering() {
        let (_, sink, metered) = metered();

        assert!(metered.update_ok(&"x".to_string()).await);
        assert!(!metered.delete_ok("user#42", "2021").await);
        assert_eq!(sink.durations(), vec!["update", "delete"]);
    }
}
