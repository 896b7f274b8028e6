use std::str::FromStr;

use crate::attribute::AttributeMap;

use super::{Cursor, Key, StoreError};

/// A range query against a single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub partition_key: String,
    /// Maximum number of items to evaluate. Always at least 1.
    pub limit: u32,
    /// Exclusive start: only items strictly after this key are returned.
    pub start_after: Option<Key>,
}

/// One page of raw items returned by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutput {
    /// Items in ascending range key order.
    pub items: Vec<AttributeMap>,
    /// Key of the last evaluated item when more items may remain.
    pub last_key: Option<Key>,
    /// Items the store returned but could not decode, one error per item.
    /// They still count toward the request's limit.
    pub unreadable: Vec<StoreError>,
}

/// What a range scan does with an item the converter rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Log the failure and leave the item out of the page.
    #[default]
    Lenient,
    /// Fail the whole page.
    Strict,
}

impl FromStr for ScanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("Unknown scan policy: {}", s)),
        }
    }
}

/// A page of converted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records in ascending range key order.
    pub items: Vec<T>,
    /// Where the next page starts; `None` once the partition is exhausted.
    pub cursor: Option<Cursor>,
    /// Items dropped because they failed conversion under [`ScanPolicy::Lenient`].
    pub skipped: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, cursor: Option<Cursor>) -> Self {
        Self {
            items,
            cursor,
            skipped: 0,
        }
    }

    /// An empty, final page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Whether another page can be requested with [`Page::cursor`].
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_policy_from_str() {
        assert_eq!("lenient".parse::<ScanPolicy>(), Ok(ScanPolicy::Lenient));
        assert_eq!("STRICT".parse::<ScanPolicy>(), Ok(ScanPolicy::Strict));
        assert!("sometimes".parse::<ScanPolicy>().is_err());
    }

    #[test]
    fn test_scan_policy_defaults_to_lenient() {
        assert_eq!(ScanPolicy::default(), ScanPolicy::Lenient);
    }

    #[test]
    fn test_empty_page_is_final() {
        let page: Page<String> = Page::empty();

        assert!(page.is_empty());
        assert!(!page.has_more());
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn test_page_with_cursor_has_more() {
        let page = Page::new(vec!["a"], Some(Cursor::new("p", "a")));

        assert_eq!(page.len(), 1);
        assert!(page.has_more());
    }
}
