use inventory_core::{NewProduct, Product};

use crate::error::StorageError;

/// Durable product storage keyed by name.
///
/// Implementations enforce name uniqueness themselves; callers may pre-check
/// with [`find_by_name`](RecordStore::find_by_name) but must treat the
/// store's own [`StorageError::DuplicateKey`] as authoritative.
pub trait RecordStore {
    /// Up to `limit` distinct names starting with `prefix`.
    fn find_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StorageError>;

    fn find_by_name(&self, name: &str) -> Result<Option<Product>, StorageError>;

    /// Persists a new product and returns it with its assigned id.
    fn insert(&mut self, product: &NewProduct) -> Result<Product, StorageError>;

    fn update(&mut self, product: &Product) -> Result<(), StorageError>;

    fn remove(&mut self, product: &Product) -> Result<(), StorageError>;

    /// Re-reads the authoritative state of `product`.
    fn reload(&self, product: &Product) -> Result<Product, StorageError>;

    /// Every product, in insertion order.
    fn list_all(&self) -> Result<Vec<Product>, StorageError>;
}
