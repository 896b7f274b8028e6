use async_trait::async_trait;

use crate::attribute::AttributeMap;

use super::{Cursor, Key, Page, QueryOutput, QueryRequest, Result, StoreError};

/// The primitive operations of a partition/range keyed store.
///
/// Implementations perform exactly one round trip per call and no retries.
/// Dropping the returned future cancels the underlying request.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Writes an item unconditionally, replacing any item with the same key.
    async fn put(&self, collection: &str, item: AttributeMap) -> std::result::Result<(), StoreError>;

    /// Reads the item stored under `key`, if any.
    async fn get(
        &self,
        collection: &str,
        key: &Key,
    ) -> std::result::Result<Option<AttributeMap>, StoreError>;

    /// Reads one page of a partition in ascending range key order.
    async fn query(
        &self,
        collection: &str,
        request: QueryRequest,
    ) -> std::result::Result<QueryOutput, StoreError>;

    /// Deletes the item stored under `key`. Deleting an absent key succeeds.
    async fn delete(&self, collection: &str, key: &Key) -> std::result::Result<(), StoreError>;
}

/// Typed create/fetch/update/delete access to records of type `T`.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Writes a record unconditionally and hands it back unchanged.
    async fn create(&self, record: T) -> Result<T>;

    /// Looks a record up by its composite key. `Ok(None)` when it does not exist.
    async fn fetch(&self, partition_key: &str, range_key: &str) -> Result<Option<T>>;

    /// Reads up to `limit` records of a partition, resuming after `cursor`.
    async fn fetch_all(
        &self,
        partition_key: &str,
        limit: u32,
        cursor: Option<&Cursor>,
    ) -> Result<Page<T>>;

    /// Overwrites a record unconditionally.
    async fn update(&self, record: &T) -> Result<()>;

    /// Deletes a record. Deleting a missing record succeeds.
    async fn delete(&self, partition_key: &str, range_key: &str) -> Result<()>;

    /// [`Repository::update`] reduced to a success flag.
    async fn update_ok(&self, record: &T) -> bool {
        self.update(record).await.is_ok()
    }

    /// [`Repository::delete`] reduced to a success flag.
    async fn delete_ok(&self, partition_key: &str, range_key: &str) -> bool {
        self.delete(partition_key, range_key).await.is_ok()
    }
}
