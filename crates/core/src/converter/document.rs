//! A [`ModelConverter`] for any serde-compatible record.
//!
//! The record is serialized to a JSON object and each field becomes one
//! attribute:
//!
//! | JSON      | Attribute |
//! |-----------|-----------|
//! | string    | `S`       |
//! | number    | `N`       |
//! | bool      | `BOOL`    |
//! | null      | `NULL`    |
//! | array     | `L`       |
//! | object    | `M`       |
//!
//! Two string fields of the record are copied into the `partition_key` and
//! `range_key` attributes. Reading back drops those copies again, so the record
//! comes back exactly as written. A record field named `partition_key` or
//! `range_key` is only allowed when it is the configured key field of the same
//! role; any other use would be overwritten by the key copy and is rejected.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::attribute::{get_string, AttributeError, AttributeMap, AttributeValue};
use crate::storage::{Key, PARTITION_KEY_ATTR, RANGE_KEY_ATTR};

use super::{ConversionError, ModelConverter};

/// Converts serde records by way of their JSON shape.
#[derive(Debug, Clone)]
pub struct SerdeConverter<T> {
    partition_field: String,
    range_field: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> SerdeConverter<T> {
    /// Creates a converter that takes the partition and range keys from the
    /// named record fields.
    pub fn new(partition_field: impl Into<String>, range_field: impl Into<String>) -> Self {
        Self {
            partition_field: partition_field.into(),
            range_field: range_field.into(),
            _record: PhantomData,
        }
    }

    pub fn partition_field(&self) -> &str {
        &self.partition_field
    }

    pub fn range_field(&self) -> &str {
        &self.range_field
    }

    /// Whether the record itself owns the stored key attribute `attr`.
    fn owns_key_attribute(&self, attr: &str) -> bool {
        (attr == PARTITION_KEY_ATTR && self.partition_field == PARTITION_KEY_ATTR)
            || (attr == RANGE_KEY_ATTR && self.range_field == RANGE_KEY_ATTR)
    }

    fn is_key_copy(&self, attr: &str) -> bool {
        (attr == PARTITION_KEY_ATTR || attr == RANGE_KEY_ATTR) && !self.owns_key_attribute(attr)
    }
}

impl<T> ModelConverter<T> for SerdeConverter<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_attributes(&self, record: &T) -> Result<AttributeMap, ConversionError> {
        let value =
            serde_json::to_value(record).map_err(|e| ConversionError::Serialization(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ConversionError::Serialization(
                "record must serialize to a JSON object".to_string(),
            ));
        };

        if let Some(name) = fields.keys().find(|name| self.is_key_copy(name)) {
            return Err(ConversionError::InvalidField {
                field: name.clone(),
                reason: "name is reserved for the stored key attribute".to_string(),
            });
        }

        let mut item: AttributeMap = fields
            .into_iter()
            .map(|(name, value)| (name, json_to_attribute(value)))
            .collect();

        let key = Key::new(
            key_field(&item, &self.partition_field)?,
            key_field(&item, &self.range_field)?,
        );
        item.extend(key.to_attributes());

        Ok(item)
    }

    fn from_attributes(&self, item: &AttributeMap) -> Result<T, ConversionError> {
        let mut fields = Map::with_capacity(item.len());
        for (name, value) in item.iter().filter(|(name, _)| !self.is_key_copy(name)) {
            fields.insert(name.clone(), attribute_to_json(name, value)?);
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ConversionError::Serialization(e.to_string()))
    }
}

/// Convert a JSON value into an attribute value.
pub fn json_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(json_to_attribute).collect())
        }
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(name, value)| (name, json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// Convert an attribute value into a JSON value.
///
/// `field` names the attribute in error messages.
pub fn attribute_to_json(field: &str, value: &AttributeValue) -> Result<Value, ConversionError> {
    Ok(match value {
        AttributeValue::Null => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(field, n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|v| attribute_to_json(field, v))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut object = Map::with_capacity(fields.len());
            for (name, v) in fields {
                object.insert(name.clone(), attribute_to_json(name, v)?);
            }
            Value::Object(object)
        }
    })
}

fn parse_number(field: &str, raw: &str) -> Result<Number, ConversionError> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Number::from(n));
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(Number::from(n));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ConversionError::InvalidField {
            field: field.to_string(),
            reason: format!("not a number: {}", raw),
        })
}

fn key_field(item: &AttributeMap, field: &str) -> Result<String, ConversionError> {
    match get_string(item, field) {
        Ok(value) => Ok(value),
        Err(AttributeError::Missing { .. }) => Err(ConversionError::MissingField(field.to_string())),
        Err(err) => Err(ConversionError::InvalidField {
            field: field.to_string(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Reading {
        user: String,
        year: String,
        total: i64,
        ratio: f64,
        verified: bool,
        tags: Vec<String>,
        note: Option<String>,
        location: Location,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Location {
        city: String,
        floor: u32,
    }

    fn sample_reading() -> Reading {
        Reading {
            user: "user#42".to_string(),
            year: "2021".to_string(),
            total: -12,
            ratio: 0.25,
            verified: true,
            tags: vec!["a".to_string(), "b".to_string()],
            note: None,
            location: Location {
                city: "Montevideo".to_string(),
                floor: 3,
            },
        }
    }

    fn converter() -> SerdeConverter<Reading> {
        SerdeConverter::new("user", "year")
    }

    #[test]
    fn test_round_trip() {
        let reading = sample_reading();
        let item = converter().to_attributes(&reading).unwrap();
        let parsed = converter().from_attributes(&item).unwrap();

        assert_eq!(parsed, reading);
    }

    #[test]
    fn test_item_has_key_attributes() {
        let item = converter().to_attributes(&sample_reading()).unwrap();

        assert_eq!(
            Key::from_attributes(&item),
            Some(Key::new("user#42", "2021"))
        );
    }

    #[test]
    fn test_field_tags() {
        let item = converter().to_attributes(&sample_reading()).unwrap();

        assert_eq!(item.get("total"), Some(&AttributeValue::N("-12".to_string())));
        assert_eq!(item.get("verified"), Some(&AttributeValue::Bool(true)));
        assert_eq!(item.get("note"), Some(&AttributeValue::Null));
        assert_eq!(
            item.get("tags"),
            Some(&AttributeValue::L(vec![
                AttributeValue::string("a"),
                AttributeValue::string("b"),
            ]))
        );
        let location = item.get("location").unwrap().as_m().unwrap();
        assert_eq!(location.get("floor"), Some(&AttributeValue::N("3".to_string())));
    }

    #[test]
    fn test_missing_key_field() {
        let converter: SerdeConverter<Reading> = SerdeConverter::new("owner", "year");
        let result = converter.to_attributes(&sample_reading());

        assert_eq!(result, Err(ConversionError::MissingField("owner".to_string())));
    }

    #[test]
    fn test_non_string_key_field() {
        let converter: SerdeConverter<Reading> = SerdeConverter::new("user", "total");
        let result = converter.to_attributes(&sample_reading());

        assert!(matches!(result, Err(ConversionError::InvalidField { .. })));
    }

    #[test]
    fn test_non_object_record() {
        let converter: SerdeConverter<String> = SerdeConverter::new("a", "b");
        let result = converter.to_attributes(&"plain".to_string());

        assert!(matches!(result, Err(ConversionError::Serialization(_))));
    }

    #[test]
    fn test_missing_record_field_fails_deserialization() {
        let mut item = converter().to_attributes(&sample_reading()).unwrap();
        item.remove("verified");

        let result = converter().from_attributes(&item);
        assert!(matches!(result, Err(ConversionError::Serialization(_))));
    }

    #[test]
    fn test_invalid_number_attribute() {
        let mut item = converter().to_attributes(&sample_reading()).unwrap();
        item.insert("total".to_string(), AttributeValue::N("lots".to_string()));

        let result = converter().from_attributes(&item);
        assert!(matches!(
            result,
            Err(ConversionError::InvalidField { ref field, .. }) if field == "total"
        ));
    }

    #[test]
    fn test_json_value_documents_round_trip() {
        let converter: SerdeConverter<Value> = SerdeConverter::new("pk", "sk");
        let document = serde_json::json!({"pk": "user#1", "sk": "2024", "count": 7});

        let item = converter.to_attributes(&document).unwrap();
        assert_eq!(Key::from_attributes(&item), Some(Key::new("user#1", "2024")));

        let parsed = converter.from_attributes(&item).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_record_field_named_like_key_attribute_is_rejected() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Photo {
            owner: String,
            taken: String,
            range_key: String,
        }

        let converter: SerdeConverter<Photo> = SerdeConverter::new("owner", "taken");
        let photo = Photo {
            owner: "user#1".to_string(),
            taken: "2021".to_string(),
            range_key: "mine".to_string(),
        };

        assert_eq!(
            converter.to_attributes(&photo).unwrap_err(),
            ConversionError::InvalidField {
                field: "range_key".to_string(),
                reason: "name is reserved for the stored key attribute".to_string(),
            }
        );
    }

    #[test]
    fn test_key_field_may_use_key_attribute_name() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Entry {
            partition_key: String,
            range_key: String,
            body: String,
        }

        let converter: SerdeConverter<Entry> = SerdeConverter::new("partition_key", "range_key");
        let entry = Entry {
            partition_key: "user#1".to_string(),
            range_key: "2021".to_string(),
            body: "hello".to_string(),
        };

        let item = converter.to_attributes(&entry).unwrap();
        assert_eq!(converter.from_attributes(&item).unwrap(), entry);
    }

    #[test]
    fn test_strict_records_read_back_without_key_copies() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Strict {
            user: String,
            year: String,
        }

        let converter: SerdeConverter<Strict> = SerdeConverter::new("user", "year");
        let record = Strict {
            user: "user#1".to_string(),
            year: "2021".to_string(),
        };

        let item = converter.to_attributes(&record).unwrap();
        assert_eq!(converter.from_attributes(&item).unwrap(), record);
    }
}
