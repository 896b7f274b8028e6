use crate::attribute::AttributeMap;

use super::ConversionError;

/// Maps records of type `T` to and from the store's attribute representation.
///
/// Implementations are pure. [`ModelConverter::to_attributes`] must include the
/// key attributes (`partition_key` and `range_key`) of the record, otherwise the
/// store has nothing to address the item by.
pub trait ModelConverter<T>: Send + Sync {
    /// Converts a record into an item.
    fn to_attributes(&self, record: &T) -> Result<AttributeMap, ConversionError>;

    /// Rebuilds a record from an item read back from the store.
    fn from_attributes(&self, item: &AttributeMap) -> Result<T, ConversionError>;
}
