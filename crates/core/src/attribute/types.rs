use std::collections::HashMap;
use std::fmt;

/// A store record in its native representation: attribute name to tagged value.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// A tagged attribute value, as exchanged with the store.
///
/// Numbers travel as decimal text (`N`) so no precision is lost between the
/// converter and the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    N(String),
    Bool(bool),
    Null,
    L(Vec<AttributeValue>),
    M(AttributeMap),
}

impl AttributeValue {
    /// Creates a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Creates a number value from anything that renders as a decimal.
    pub fn number(value: impl fmt::Display) -> Self {
        Self::N(value.to_string())
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::L(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_m(&self) -> Option<&AttributeMap> {
        match self {
            Self::M(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short tag name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::Bool(_) => "BOOL",
            Self::Null => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_only_their_tag() {
        let value = AttributeValue::string("hello");

        assert_eq!(value.as_s(), Some("hello"));
        assert_eq!(value.as_n(), None);
        assert_eq!(value.as_bool(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_number_keeps_decimal_text() {
        assert_eq!(AttributeValue::number(42), AttributeValue::N("42".to_string()));
        assert_eq!(AttributeValue::from(-7_i64).as_n(), Some("-7"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(AttributeValue::Null.type_name(), "NULL");
        assert_eq!(AttributeValue::Bool(true).type_name(), "BOOL");
        assert_eq!(AttributeValue::L(vec![]).type_name(), "L");
        assert_eq!(AttributeValue::M(AttributeMap::new()).type_name(), "M");
    }
}
