//! In-memory store implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kvrocket_core::attribute::AttributeMap;
use kvrocket_core::storage::{Key, KeyValueStore, QueryOutput, QueryRequest, StoreError};

type Collection = BTreeMap<Key, AttributeMap>;

/// In-memory storage backend for testing.
///
/// Each collection is a `BTreeMap` ordered by `(partition_key, range_key)`, so
/// a query walks a partition in range key order. Collections are created on
/// first write. Data is not persisted and will be lost when the store is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items stored in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Whether a collection holds no items.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn put(&self, collection: &str, item: AttributeMap) -> Result<(), StoreError> {
        let key = Key::from_attributes(&item).ok_or_else(|| {
            StoreError::Rejected("item is missing its partition_key or range_key".to_string())
        })?;

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }

    async fn get(&self, collection: &str, key: &Key) -> Result<Option<AttributeMap>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|items| items.get(key))
            .cloned())
    }

    async fn query(
        &self,
        collection: &str,
        request: QueryRequest,
    ) -> Result<QueryOutput, StoreError> {
        let collections = self.collections.read().await;
        let Some(items) = collections.get(collection) else {
            return Ok(QueryOutput::default());
        };

        let lower = match request.start_after {
            Some(key) => Bound::Excluded(key),
            None => Bound::Included(Key::new(request.partition_key.as_str(), "")),
        };
        let mut partition = items
            .range((lower, Bound::Unbounded))
            .skip_while(|(key, _)| key.partition_key < request.partition_key)
            .take_while(|(key, _)| key.partition_key == request.partition_key);

        let page: Vec<(&Key, &AttributeMap)> =
            partition.by_ref().take(request.limit as usize).collect();
        let more = partition.next().is_some();

        Ok(QueryOutput {
            last_key: if more {
                page.last().map(|(key, _)| (*key).clone())
            } else {
                None
            },
            items: page.into_iter().map(|(_, item)| item.clone()).collect(),
            unreadable: Vec::new(),
        })
    }

    async fn delete(&self, collection: &str, key: &Key) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(items) = collections.get_mut(collection) {
            items.remove(key);
        }
        Ok(())
    }
}
