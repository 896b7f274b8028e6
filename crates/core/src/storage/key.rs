use crate::attribute::{AttributeMap, AttributeValue};

/// Attribute name holding the partition key of every stored item.
pub const PARTITION_KEY_ATTR: &str = "partition_key";

/// Attribute name holding the range key of every stored item.
pub const RANGE_KEY_ATTR: &str = "range_key";

/// Composite primary key of a stored item.
///
/// `(partition_key, range_key)` is unique within a collection; `partition_key`
/// alone is not. Ordering is partition first, then range key, which is the
/// order a range query walks a partition in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub partition_key: String,
    pub range_key: String,
}

impl Key {
    pub fn new(partition_key: impl Into<String>, range_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            range_key: range_key.into(),
        }
    }

    /// Renders the key as the two string attributes the store addresses items by.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut item = AttributeMap::with_capacity(2);
        item.insert(
            PARTITION_KEY_ATTR.to_string(),
            AttributeValue::S(self.partition_key.clone()),
        );
        item.insert(
            RANGE_KEY_ATTR.to_string(),
            AttributeValue::S(self.range_key.clone()),
        );
        item
    }

    /// Reads the key attributes out of an item.
    ///
    /// Returns `None` unless both attributes are present and string typed.
    pub fn from_attributes(item: &AttributeMap) -> Option<Self> {
        let partition_key = item.get(PARTITION_KEY_ATTR)?.as_s()?;
        let range_key = item.get(RANGE_KEY_ATTR)?.as_s()?;
        Some(Self::new(partition_key, range_key))
    }

    /// Whether both parts are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.partition_key.is_empty() && !self.range_key.is_empty()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.partition_key, self.range_key)
    }
}
