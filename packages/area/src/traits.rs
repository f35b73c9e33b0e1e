//! The storage-area trait.

use crate::AreaError;

/// An origin-scoped synchronous key/text map provided by the execution
/// environment.
///
/// Both operations complete or fail before returning; there is no async
/// variant because the modeled host surface is synchronous. Entries are
/// opaque text at this level - parsing and validation happen above.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn StorageArea>`.
pub trait StorageArea {
    /// Look up the text stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No entry under `key` (not an error condition).
    /// * `Ok(Some(text))` - The stored text.
    /// * `Err(AreaError)` - The host surface failed.
    fn get_item(&mut self, key: &str) -> Result<Option<String>, AreaError>;

    /// Store `text` under `key`, overwriting any previous entry.
    ///
    /// May fail with [`AreaError::QuotaExceeded`] when the host's size limit
    /// is hit; the previous entry is left in place in that case.
    fn set_item(&mut self, key: &str, text: &str) -> Result<(), AreaError>;
}

// Blanket implementations for references and boxes

impl<T: StorageArea + ?Sized> StorageArea for &mut T {
    fn get_item(&mut self, key: &str) -> Result<Option<String>, AreaError> {
        (*self).get_item(key)
    }

    fn set_item(&mut self, key: &str, text: &str) -> Result<(), AreaError> {
        (*self).set_item(key, text)
    }
}

impl<T: StorageArea + ?Sized> StorageArea for Box<T> {
    fn get_item(&mut self, key: &str) -> Result<Option<String>, AreaError> {
        self.as_mut().get_item(key)
    }

    fn set_item(&mut self, key: &str, text: &str) -> Result<(), AreaError> {
        self.as_mut().set_item(key, text)
    }
}
