//! An in-process storage area.

use std::collections::BTreeMap;

use crate::{AreaError, StorageArea};

/// An in-process [`StorageArea`] backed by a `BTreeMap`.
///
/// This is the reference implementation and the test double for every higher
/// layer. An optional byte quota mimics the out-of-process size limit real
/// areas enforce: a write that would push the total size of keys plus values
/// past the quota fails with [`AreaError::QuotaExceeded`] and leaves the
/// previous entry in place.
///
/// # Example
///
/// ```rust
/// use stowage_area::{MemoryArea, StorageArea};
///
/// let mut area = MemoryArea::new();
/// area.set_item("count", "3").unwrap();
/// assert_eq!(area.get_item("count").unwrap(), Some("3".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryArea {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryArea {
    /// Create an empty area with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty area that rejects writes past `limit` total bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(limit),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the area holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&mut self, key: &str) -> Result<Option<String>, AreaError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, text: &str) -> Result<(), AreaError> {
        if let Some(limit) = self.quota {
            let prospective = match self.entries.get(key) {
                Some(old) => self.used_bytes() - old.len() + text.len(),
                None => self.used_bytes() + key.len() + text.len(),
            };
            if prospective > limit {
                return Err(AreaError::QuotaExceeded { limit: Some(limit) });
            }
        }
        self.entries.insert(key.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_roundtrip() {
        let mut area = MemoryArea::new();

        area.set_item("name", "\"Alice\"").unwrap();
        assert_eq!(area.get_item("name").unwrap(), Some("\"Alice\"".to_string()));
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn absent_key_reads_none() {
        let mut area = MemoryArea::new();
        assert_eq!(area.get_item("missing").unwrap(), None);
        assert!(area.is_empty());
    }

    #[test]
    fn overwrite_replaces_entry() {
        let mut area = MemoryArea::new();

        area.set_item("k", "1").unwrap();
        area.set_item("k", "2").unwrap();
        assert_eq!(area.get_item("k").unwrap(), Some("2".to_string()));
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let mut area = MemoryArea::with_quota(8);

        area.set_item("k", "123").unwrap();
        let err = area.set_item("other", "123456789").unwrap_err();
        assert!(matches!(err, AreaError::QuotaExceeded { limit: Some(8) }));

        // The failed write left prior state untouched.
        assert_eq!(area.get_item("k").unwrap(), Some("123".to_string()));
        assert_eq!(area.get_item("other").unwrap(), None);
    }

    #[test]
    fn quota_counts_replacement_not_sum() {
        let mut area = MemoryArea::with_quota(8);

        area.set_item("k", "1234567").unwrap();
        // Replacing the entry frees its old bytes first.
        area.set_item("k", "7654321").unwrap();
        assert_eq!(area.get_item("k").unwrap(), Some("7654321".to_string()));
    }
}
