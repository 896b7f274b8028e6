//! Typed accessors over an [`AttributeMap`].
//!
//! The `get_*` functions report absence and tag mismatches as
//! [`AttributeError`], so converter authors can tell a stored `-1` apart from a
//! missing key. The `*_or_default` functions keep the best-effort behaviour of
//! returning a sentinel (`""`, `-1`, `false`) instead of failing.
//!
//! Every failure is logged at `debug` level.

use super::{AttributeError, AttributeMap, AttributeValue};

/// Value returned by [`int_or_default`] when the attribute cannot be read.
pub const INT_SENTINEL: i64 = -1;

/// Get a required string attribute.
pub fn get_string(item: &AttributeMap, key: &str) -> Result<String, AttributeError> {
    match lookup(item, key)? {
        AttributeValue::S(s) => Ok(s.clone()),
        other => Err(mismatch(key, "S", other)),
    }
}

/// Get a required integer attribute.
///
/// Accepts both number (`N`) and string (`S`) tagged values.
pub fn get_int(item: &AttributeMap, key: &str) -> Result<i64, AttributeError> {
    match lookup(item, key)? {
        AttributeValue::N(raw) | AttributeValue::S(raw) => parse_int(key, raw),
        other => Err(mismatch(key, "N", other)),
    }
}

/// Get a required boolean attribute.
pub fn get_bool(item: &AttributeMap, key: &str) -> Result<bool, AttributeError> {
    match lookup(item, key)? {
        AttributeValue::Bool(b) => Ok(*b),
        other => Err(mismatch(key, "BOOL", other)),
    }
}

/// Get an optional string attribute. Absent and `NULL` both read as `None`.
pub fn get_optional_string(
    item: &AttributeMap,
    key: &str,
) -> Result<Option<String>, AttributeError> {
    optional(item, key, get_string)
}

/// Get an optional integer attribute. Absent and `NULL` both read as `None`.
pub fn get_optional_int(item: &AttributeMap, key: &str) -> Result<Option<i64>, AttributeError> {
    optional(item, key, get_int)
}

/// Get an optional boolean attribute. Absent and `NULL` both read as `None`.
pub fn get_optional_bool(item: &AttributeMap, key: &str) -> Result<Option<bool>, AttributeError> {
    optional(item, key, get_bool)
}

/// Best-effort string read; `""` when missing or mistyped.
pub fn string_or_default(item: &AttributeMap, key: &str) -> String {
    get_string(item, key).unwrap_or_default()
}

/// Best-effort integer read; [`INT_SENTINEL`] when missing, mistyped or unparsable.
pub fn int_or_default(item: &AttributeMap, key: &str) -> i64 {
    get_int(item, key).unwrap_or(INT_SENTINEL)
}

/// Best-effort boolean read; `false` when missing or mistyped.
pub fn bool_or_default(item: &AttributeMap, key: &str) -> bool {
    get_bool(item, key).unwrap_or(false)
}

fn lookup<'a>(item: &'a AttributeMap, key: &str) -> Result<&'a AttributeValue, AttributeError> {
    item.get(key).ok_or_else(|| {
        tracing::debug!(key, "Attribute not found");
        AttributeError::Missing {
            key: key.to_string(),
        }
    })
}

fn mismatch(key: &str, expected: &'static str, found: &AttributeValue) -> AttributeError {
    let found = found.type_name();
    tracing::debug!(key, expected, found, "Attribute has unexpected type");
    AttributeError::TypeMismatch {
        key: key.to_string(),
        expected,
        found,
    }
}

fn parse_int(key: &str, raw: &str) -> Result<i64, AttributeError> {
    raw.parse().map_err(|_| {
        tracing::debug!(key, value = raw, "Could not parse attribute as integer");
        AttributeError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        }
    })
}

fn optional<T>(
    item: &AttributeMap,
    key: &str,
    read: fn(&AttributeMap, &str) -> Result<T, AttributeError>,
) -> Result<Option<T>, AttributeError> {
    match item.get(key) {
        None | Some(AttributeValue::Null) => Ok(None),
        Some(_) => read(item, key).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> AttributeMap {
        let mut item = AttributeMap::new();
        item.insert("name".to_string(), AttributeValue::string("Ada"));
        item.insert("age".to_string(), AttributeValue::number(36));
        item.insert("year".to_string(), AttributeValue::string("1843"));
        item.insert("score".to_string(), AttributeValue::number(-1));
        item.insert("active".to_string(), AttributeValue::Bool(true));
        item.insert("nickname".to_string(), AttributeValue::Null);
        item.insert("notes".to_string(), AttributeValue::string("n/a"));
        item
    }

    #[test]
    fn test_get_string() {
        assert_eq!(get_string(&sample_item(), "name").unwrap(), "Ada");
    }

    #[test]
    fn test_get_string_missing() {
        let result = get_string(&sample_item(), "email");
        assert_eq!(
            result,
            Err(AttributeError::Missing {
                key: "email".to_string()
            })
        );
    }

    #[test]
    fn test_get_string_wrong_type() {
        let result = get_string(&sample_item(), "age");
        assert!(matches!(
            result,
            Err(AttributeError::TypeMismatch {
                expected: "S",
                found: "N",
                ..
            })
        ));
    }

    #[test]
    fn test_get_int_from_number() {
        assert_eq!(get_int(&sample_item(), "age").unwrap(), 36);
    }

    #[test]
    fn test_get_int_from_string_tag() {
        assert_eq!(get_int(&sample_item(), "year").unwrap(), 1843);
    }

    #[test]
    fn test_get_int_unparsable_string() {
        let result = get_int(&sample_item(), "notes");
        assert!(matches!(result, Err(AttributeError::InvalidNumber { .. })));
    }

    #[test]
    fn test_get_int_wrong_type() {
        let result = get_int(&sample_item(), "active");
        assert!(matches!(result, Err(AttributeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_stored_minus_one_is_not_missing() {
        let item = sample_item();
        assert_eq!(get_int(&item, "score"), Ok(-1));
        assert!(get_int(&item, "absent").is_err());
    }

    #[test]
    fn test_get_bool() {
        assert!(get_bool(&sample_item(), "active").unwrap());
        assert!(get_bool(&sample_item(), "name").is_err());
    }

    #[test]
    fn test_optional_accessors() {
        let item = sample_item();

        assert_eq!(get_optional_string(&item, "name").unwrap(), Some("Ada".to_string()));
        assert_eq!(get_optional_string(&item, "email").unwrap(), None);
        assert_eq!(get_optional_string(&item, "nickname").unwrap(), None);
        assert_eq!(get_optional_int(&item, "age").unwrap(), Some(36));
        assert_eq!(get_optional_bool(&item, "active").unwrap(), Some(true));
        assert!(get_optional_int(&item, "name").is_err());
    }

    #[test]
    fn test_best_effort_defaults() {
        let item = sample_item();

        assert_eq!(string_or_default(&item, "name"), "Ada");
        assert_eq!(string_or_default(&item, "age"), "");
        assert_eq!(int_or_default(&item, "age"), 36);
        assert_eq!(int_or_default(&item, "missing"), INT_SENTINEL);
        assert_eq!(int_or_default(&item, "notes"), INT_SENTINEL);
        assert!(bool_or_default(&item, "active"));
        assert!(!bool_or_default(&item, "missing"));
    }
}
