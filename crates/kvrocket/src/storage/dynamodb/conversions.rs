//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between the SDK's `AttributeValue` maps and
//! the store-neutral attribute model. These are testable in isolation without
//! DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use kvrocket_core::attribute::{AttributeMap, AttributeValue};
use kvrocket_core::storage::{Key, StoreError, RANGE_KEY_ATTR};

/// An item as the SDK represents it.
pub type SdkItem = HashMap<String, SdkAttributeValue>;

/// Convert an attribute map to a DynamoDB item.
pub fn to_sdk_item(item: &AttributeMap) -> SdkItem {
    item.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert an attribute value to its SDK form.
pub fn to_sdk_value(value: &AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s.clone()),
        AttributeValue::N(n) => SdkAttributeValue::N(n.clone()),
        AttributeValue::Bool(b) => SdkAttributeValue::Bool(*b),
        AttributeValue::Null => SdkAttributeValue::Null(true),
        AttributeValue::L(values) => SdkAttributeValue::L(values.iter().map(to_sdk_value).collect()),
        AttributeValue::M(fields) => SdkAttributeValue::M(to_sdk_item(fields)),
    }
}

/// Convert a DynamoDB item to an attribute map.
pub fn from_sdk_item(item: &SdkItem) -> Result<AttributeMap, StoreError> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), from_sdk_value(name, value)?)))
        .collect()
}

/// Convert a page of DynamoDB items.
///
/// Items that cannot be converted don't fail the page; each yields one error,
/// returned alongside the converted items.
pub fn from_sdk_items(items: &[SdkItem]) -> (Vec<AttributeMap>, Vec<StoreError>) {
    let mut converted = Vec::with_capacity(items.len());
    let mut unreadable = Vec::new();

    for item in items {
        match from_sdk_item(item) {
            Ok(item) => converted.push(item),
            Err(StoreError::UnsupportedAttribute(reason)) => {
                let range_key = item
                    .get(RANGE_KEY_ATTR)
                    .and_then(|value| value.as_s().ok())
                    .map_or("?", String::as_str);
                unreadable.push(StoreError::UnsupportedAttribute(format!(
                    "item {}: {}",
                    range_key, reason
                )));
            }
            Err(err) => unreadable.push(err),
        }
    }

    (converted, unreadable)
}

/// Convert an SDK attribute value.
///
/// String and number sets become lists. Binary values have no counterpart and
/// are rejected.
pub fn from_sdk_value(name: &str, value: &SdkAttributeValue) -> Result<AttributeValue, StoreError> {
    Ok(match value {
        SdkAttributeValue::S(s) => AttributeValue::S(s.clone()),
        SdkAttributeValue::N(n) => AttributeValue::N(n.clone()),
        SdkAttributeValue::Bool(b) => AttributeValue::Bool(*b),
        SdkAttributeValue::Null(_) => AttributeValue::Null,
        SdkAttributeValue::L(values) => AttributeValue::L(
            values
                .iter()
                .map(|v| from_sdk_value(name, v))
                .collect::<Result<_, _>>()?,
        ),
        SdkAttributeValue::M(fields) => AttributeValue::M(from_sdk_item(fields)?),
        SdkAttributeValue::Ss(values) => {
            AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
        }
        SdkAttributeValue::Ns(values) => {
            AttributeValue::L(values.iter().cloned().map(AttributeValue::N).collect())
        }
        SdkAttributeValue::B(_) | SdkAttributeValue::Bs(_) => {
            return Err(StoreError::UnsupportedAttribute(format!(
                "{}: binary values are not supported",
                name
            )))
        }
        other => {
            return Err(StoreError::UnsupportedAttribute(format!(
                "{}: {:?}",
                name, other
            )))
        }
    })
}

/// Convert a key to the two-attribute SDK key map.
pub fn key_to_sdk_item(key: &Key) -> SdkItem {
    to_sdk_item(&key.to_attributes())
}

/// Read a key back out of an SDK key map such as `LastEvaluatedKey`.
pub fn sdk_item_to_key(item: &SdkItem) -> Result<Option<Key>, StoreError> {
    Ok(Key::from_attributes(&from_sdk_item(item)?))
}
