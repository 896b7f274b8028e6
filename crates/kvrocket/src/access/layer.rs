//! Generic key-value access layer.
//!
//! Implements `Repository<T>` for any record type by pairing a
//! `KeyValueStore` with a `ModelConverter<T>`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use kvrocket_core::attribute::AttributeMap;
use kvrocket_core::converter::ModelConverter;
use kvrocket_core::storage::{
    AccessError, Cursor, Key, KeyValueStore, Page, QueryRequest, Repository, Result, ScanPolicy,
};

/// Create/fetch/update/delete access to records of type `T` stored in one
/// collection.
///
/// The layer holds no mutable state, so a single instance can be shared
/// between tasks. Every operation is one round trip to the store; failures are
/// returned as they come and never retried.
///
/// # Type Parameters
///
/// * `T` - The record type
/// * `S` - The store implementation
/// * `C` - The converter between `T` and attribute maps
pub struct KeyValueAccessLayer<T, S, C> {
    store: Arc<S>,
    collection: String,
    converter: C,
    scan_policy: ScanPolicy,
    _record: PhantomData<fn() -> T>,
}

impl<T, S, C> KeyValueAccessLayer<T, S, C>
where
    S: KeyValueStore,
    C: ModelConverter<T>,
{
    /// Creates an access layer over `collection` with the lenient scan policy.
    ///
    /// # Arguments
    ///
    /// * `store` - The store to read from and write to
    /// * `collection` - The collection (table) holding the records
    /// * `converter` - Maps records to and from attribute maps
    pub fn new(store: Arc<S>, collection: impl Into<String>, converter: C) -> Self {
        Self {
            store,
            collection: collection.into(),
            converter,
            scan_policy: ScanPolicy::default(),
            _record: PhantomData,
        }
    }

    /// Sets what `fetch_all` does with items that fail conversion.
    pub fn with_scan_policy(mut self, scan_policy: ScanPolicy) -> Self {
        self.scan_policy = scan_policy;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn scan_policy(&self) -> ScanPolicy {
        self.scan_policy
    }

    /// Convert a record and check that the converter emitted a usable key.
    fn encode(&self, record: &T) -> Result<(Key, AttributeMap)> {
        let item = self.converter.to_attributes(record).map_err(|err| {
            tracing::warn!(collection = %self.collection, error = %err, "Failed to convert record");
            AccessError::from(err)
        })?;

        let key = Key::from_attributes(&item).ok_or_else(|| {
            AccessError::InvalidKey("record has no partition_key/range_key attributes".to_string())
        })?;
        validate_key(&key)?;

        Ok((key, item))
    }

    fn decode(&self, item: &AttributeMap) -> Result<T> {
        self.converter.from_attributes(item).map_err(AccessError::from)
    }

    async fn put(&self, key: &Key, item: AttributeMap) -> Result<()> {
        self.store
            .put(&self.collection, item)
            .await
            .map_err(|err| {
                tracing::error!(
                    collection = %self.collection,
                    partition_key = %key.partition_key,
                    range_key = %key.range_key,
                    error = %err,
                    "Failed to put item"
                );
                AccessError::from(err)
            })
    }
}

#[async_trait]
impl<T, S, C> Repository<T> for KeyValueAccessLayer<T, S, C>
where
    T: Send + Sync + 'static,
    S: KeyValueStore + 'static,
    C: ModelConverter<T> + 'static,
{
    async fn create(&self, record: T) -> Result<T> {
        let (key, item) = self.encode(&record)?;
        self.put(&key, item).await?;
        Ok(record)
    }

    async fn fetch(&self, partition_key: &str, range_key: &str) -> Result<Option<T>> {
        let key = Key::new(partition_key, range_key);
        validate_key(&key)?;

        let item = self
            .store
            .get(&self.collection, &key)
            .await
            .map_err(|err| {
                tracing::error!(
                    collection = %self.collection,
                    partition_key,
                    range_key,
                    error = %err,
                    "Failed to fetch item"
                );
                AccessError::from(err)
            })?;

        match item {
            Some(item) => Ok(Some(self.decode(&item)?)),
            None => {
                tracing::debug!(collection = %self.collection, partition_key, range_key, "No item found");
                Ok(None)
            }
        }
    }

    async fn fetch_all(
        &self,
        partition_key: &str,
        limit: u32,
        cursor: Option<&Cursor>,
    ) -> Result<Page<T>> {
        if partition_key.is_empty() {
            return Err(AccessError::InvalidKey(
                "partition key must not be empty".to_string(),
            ));
        }
        if limit == 0 {
            return Err(AccessError::InvalidLimit);
        }

        let start_after = match cursor {
            Some(cursor) if cursor.partition_key() != partition_key => {
                return Err(AccessError::CursorMismatch {
                    expected: partition_key.to_string(),
                    found: cursor.partition_key().to_string(),
                });
            }
            Some(cursor) if cursor.range_key().is_empty() => None,
            Some(cursor) => Some(Key::new(partition_key, cursor.range_key())),
            None => None,
        };

        let output = self
            .store
            .query(
                &self.collection,
                QueryRequest {
                    partition_key: partition_key.to_string(),
                    limit,
                    start_after,
                },
            )
            .await
            .map_err(|err| {
                tracing::error!(
                    collection = %self.collection,
                    partition_key,
                    error = %err,
                    "Failed to query partition"
                );
                AccessError::from(err)
            })?;

        let mut page = Page::new(Vec::with_capacity(output.items.len()), None);
        for err in output.unreadable {
            if self.scan_policy == ScanPolicy::Strict {
                return Err(AccessError::from(err));
            }
            tracing::warn!(
                collection = %self.collection,
                partition_key,
                error = %err,
                "Skipping item the store could not read"
            );
            page.skipped += 1;
        }
        for item in &output.items {
            match self.decode(item) {
                Ok(record) => page.items.push(record),
                Err(err) if self.scan_policy == ScanPolicy::Strict => return Err(err),
                Err(err) => {
                    let range_key = Key::from_attributes(item).map(|key| key.range_key);
                    tracing::warn!(
                        collection = %self.collection,
                        partition_key,
                        range_key = ?range_key,
                        error = %err,
                        "Skipping item that failed conversion"
                    );
                    page.skipped += 1;
                }
            }
        }

        page.cursor = output
            .last_key
            .map(|key| Cursor::new(partition_key, key.range_key));

        Ok(page)
    }

    async fn update(&self, record: &T) -> Result<()> {
        let (key, item) = self.encode(record)?;
        self.put(&key, item).await
    }

    async fn delete(&self, partition_key: &str, range_key: &str) -> Result<()> {
        let key = Key::new(partition_key, range_key);
        validate_key(&key)?;

        self.store
            .delete(&self.collection, &key)
            .await
            .map_err(|err| {
                tracing::error!(
                    collection = %self.collection,
                    partition_key,
                    range_key,
                    error = %err,
                    "Failed to delete item"
                );
                AccessError::from(err)
            })
    }
}

fn validate_key(key: &Key) -> Result<()> {
    if key.is_complete() {
        Ok(())
    } else {
        Err(AccessError::InvalidKey(format!(
            "partition and range keys must not be empty: {:?}",
            key
        )))
    }
}
