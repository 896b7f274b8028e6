//! Table provisioning for the `partition_key` / `range_key` schema.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use kvrocket_core::storage::{StoreError, PARTITION_KEY_ATTR, RANGE_KEY_ATTR};

use super::error::map_table_error;

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_DELAY: Duration = Duration::from_secs(2);

/// What [`ensure_table`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    Created,
    AlreadyExists,
}

/// Creates the table with the store's key schema unless it already exists,
/// then waits for it to become active.
pub async fn ensure_table(client: &Client, table_name: &str) -> Result<TableOutcome, StoreError> {
    if table_status(client, table_name).await?.is_some() {
        wait_for_table_active(client, table_name).await?;
        return Ok(TableOutcome::AlreadyExists);
    }

    tracing::info!(table_name, "Creating table");
    client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema_element(PARTITION_KEY_ATTR, KeyType::Hash)?)
        .key_schema(key_schema_element(RANGE_KEY_ATTR, KeyType::Range)?)
        .attribute_definitions(string_attribute(PARTITION_KEY_ATTR)?)
        .attribute_definitions(string_attribute(RANGE_KEY_ATTR)?)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(map_table_error)?;

    wait_for_table_active(client, table_name).await?;
    Ok(TableOutcome::Created)
}

/// Fetches the current table status, `None` if the table doesn't exist.
async fn table_status(client: &Client, table_name: &str) -> Result<Option<TableStatus>, StoreError> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(response
            .table()
            .and_then(|table| table.table_status())
            .cloned()),
        Err(err) => {
            let service_error = err.into_service_error();
            if service_error.is_resource_not_found_exception() {
                Ok(None)
            } else {
                Err(map_table_error(service_error))
            }
        }
    }
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<(), StoreError> {
    for _ in 0..ACTIVATION_ATTEMPTS {
        if let Some(TableStatus::Active) = table_status(client, table_name).await? {
            return Ok(());
        }
        tokio::time::sleep(ACTIVATION_DELAY).await;
    }

    Err(StoreError::Internal(format!(
        "Timeout waiting for table {} to become active",
        table_name
    )))
}

fn key_schema_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement, StoreError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
        .map_err(map_table_error)
}

fn string_attribute(name: &str) -> Result<AttributeDefinition, StoreError> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(map_table_error)
}
