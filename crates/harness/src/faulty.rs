use std::time::Duration;

use inventory_core::{NewProduct, Product};
use inventory_storage::{RecordStore, SqliteStore, StorageError};

/// Wraps a store and injects failures.
///
/// Write faults are one-shot: the next matching call fails with the queued
/// error and later calls reach the inner store again.
pub struct FaultyStore<S = SqliteStore> {
    inner: S,
    insert_fault: Option<StorageError>,
    update_fault: Option<StorageError>,
    remove_fault: Option<StorageError>,
    failing_reloads: bool,
    failing_reads: bool,
    blind_name_lookup: bool,
}

impl<S: RecordStore> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            insert_fault: None,
            update_fault: None,
            remove_fault: None,
            failing_reloads: false,
            failing_reads: false,
            blind_name_lookup: false,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Direct access for out-of-band writes, as another client would make.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn fail_next_insert(&mut self, err: StorageError) {
        self.insert_fault = Some(err);
    }

    pub fn fail_next_update(&mut self, err: StorageError) {
        self.update_fault = Some(err);
    }

    pub fn fail_next_remove(&mut self, err: StorageError) {
        self.remove_fault = Some(err);
    }

    /// Makes `reload` time out until turned off.
    pub fn set_failing_reloads(&mut self, failing: bool) {
        self.failing_reloads = failing;
    }

    /// Makes prefix and name lookups time out until turned off.
    pub fn set_failing_reads(&mut self, failing: bool) {
        self.failing_reads = failing;
    }

    /// Makes `find_by_name` report nothing, so a duplicate pre-check passes
    /// and only the store's own constraint can catch the conflict.
    pub fn set_blind_name_lookup(&mut self, blind: bool) {
        self.blind_name_lookup = blind;
    }

    fn read_fault(&self) -> Result<(), StorageError> {
        if self.failing_reads {
            Err(StorageError::Timeout(Duration::from_millis(1)))
        } else {
            Ok(())
        }
    }
}

impl<S: RecordStore> RecordStore for FaultyStore<S> {
    fn find_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StorageError> {
        self.read_fault()?;
        self.inner.find_by_prefix(prefix, limit)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Product>, StorageError> {
        self.read_fault()?;
        if self.blind_name_lookup {
            return Ok(None);
        }
        self.inner.find_by_name(name)
    }

    fn insert(&mut self, product: &NewProduct) -> Result<Product, StorageError> {
        match self.insert_fault.take() {
            Some(err) => Err(err),
            None => self.inner.insert(product),
        }
    }

    fn update(&mut self, product: &Product) -> Result<(), StorageError> {
        match self.update_fault.take() {
            Some(err) => Err(err),
            None => self.inner.update(product),
        }
    }

    fn remove(&mut self, product: &Product) -> Result<(), StorageError> {
        match self.remove_fault.take() {
            Some(err) => Err(err),
            None => self.inner.remove(product),
        }
    }

    fn reload(&self, product: &Product) -> Result<Product, StorageError> {
        if self.failing_reloads {
            return Err(StorageError::Timeout(Duration::from_millis(1)));
        }
        self.inner.reload(product)
    }

    fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        self.inner.list_all()
    }
}
