//! DynamoDB store implementation.
//!
//! Implements `KeyValueStore` from `kvrocket_core::storage` on top of a table
//! whose primary key is `partition_key` (hash) and `range_key` (range). The
//! collection name passed to each call is the table name.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use aws_sdk_dynamodb::Client;

use kvrocket_core::attribute::AttributeMap;
use kvrocket_core::storage::{
    Key, KeyValueStore, QueryOutput, QueryRequest, StoreError, PARTITION_KEY_ATTR, RANGE_KEY_ATTR,
};

use super::conversions::{
    from_sdk_item, from_sdk_items, key_to_sdk_item, sdk_item_to_key, to_sdk_item,
};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error};

/// DynamoDB-based store.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn put(&self, collection: &str, item: AttributeMap) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(collection)
            .set_item(Some(to_sdk_item(&item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, collection))?;

        Ok(())
    }

    async fn get(&self, collection: &str, key: &Key) -> Result<Option<AttributeMap>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(collection)
            .key(
                PARTITION_KEY_ATTR,
                SdkAttributeValue::S(key.partition_key.clone()),
            )
            .key(RANGE_KEY_ATTR, SdkAttributeValue::S(key.range_key.clone()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, collection))?;

        match result.item {
            Some(item) => Ok(Some(from_sdk_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn query(
        &self,
        collection: &str,
        request: QueryRequest,
    ) -> Result<QueryOutput, StoreError> {
        let result = self
            .client
            .query()
            .table_name(collection)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", PARTITION_KEY_ATTR)
            .expression_attribute_values(":pk", SdkAttributeValue::S(request.partition_key))
            .limit(i32::try_from(request.limit).unwrap_or(i32::MAX))
            .scan_index_forward(true)
            .set_exclusive_start_key(request.start_after.as_ref().map(key_to_sdk_item))
            .send()
            .await
            .map_err(|e| map_query_error(e, collection))?;

        let (items, unreadable) = from_sdk_items(result.items());

        let last_key = match result.last_evaluated_key {
            Some(key) => sdk_item_to_key(&key)?,
            None => None,
        };

        Ok(QueryOutput {
            items,
            last_key,
            unreadable,
        })
    }

    async fn delete(&self, collection: &str, key: &Key) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(collection)
            .set_key(Some(key_to_sdk_item(key)))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, collection))?;

        Ok(())
    }
}
