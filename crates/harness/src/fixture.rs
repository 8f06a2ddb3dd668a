use std::path::{Path, PathBuf};

use inventory_core::{CatalogConfig, NewProduct, ProductId};
use inventory_engine::{Catalog, EngineError};
use inventory_storage::{RecordStore, SqliteStore, StorageError};
use tempfile::TempDir;

use crate::faulty::FaultyStore;
use crate::recording::{EventLog, RecordingNotifier};

/// A catalog over an in-memory store, wired to a recording notifier and an
/// event log.
pub struct TestCatalog {
    pub catalog: Catalog<FaultyStore>,
    pub notices: RecordingNotifier,
    pub events: EventLog,
}

impl TestCatalog {
    pub fn new() -> Result<Self, EngineError> {
        Self::seeded(&[])
    }

    /// Stores `(name, category, quantity)` rows before loading the catalog.
    pub fn seeded(rows: &[(&str, &str, u32)]) -> Result<Self, EngineError> {
        let store = seed(SqliteStore::open_in_memory()?, rows)?;
        Self::with_store(store, CatalogConfig::default())
    }

    pub fn with_store(store: SqliteStore, config: CatalogConfig) -> Result<Self, EngineError> {
        crate::init_tracing();
        let notices = RecordingNotifier::new();
        let events = EventLog::new();
        let mut catalog = Catalog::load(
            FaultyStore::new(store),
            Box::new(notices.clone()),
            config,
        )?;
        catalog.subscribe(events.observer());
        Ok(Self {
            catalog,
            notices,
            events,
        })
    }

    /// Types all three fields, name first.
    pub fn fill(&mut self, name: &str, category: &str, quantity: &str) {
        self.catalog.set_name(name);
        self.catalog.set_category(category);
        self.catalog.set_quantity(quantity);
    }

    pub fn id_of(&self, name: &str) -> Option<ProductId> {
        self.catalog
            .products()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
    }

    /// Selects the product called `name`; returns false if there is none.
    pub fn select_named(&mut self, name: &str) -> bool {
        match self.id_of(name) {
            Some(id) => {
                self.catalog.select(Some(id));
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.catalog.products().iter().map(|p| p.name.clone()).collect()
    }

    pub fn filtered_names(&self) -> Vec<String> {
        self.catalog
            .filtered_products()
            .into_iter()
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn store(&self) -> &SqliteStore {
        self.catalog.store().inner()
    }

    pub fn faults(&mut self) -> &mut FaultyStore {
        self.catalog.store_mut()
    }
}

pub fn seed(
    mut store: SqliteStore,
    rows: &[(&str, &str, u32)],
) -> Result<SqliteStore, StorageError> {
    for (name, category, quantity) in rows {
        store.insert(&NewProduct::trimmed(name, category, *quantity))?;
    }
    Ok(store)
}

/// A database file in a temporary directory, removed on drop.
pub struct TempCatalogDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempCatalogDb {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("inventory.db");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            database_path: Some(self.path.clone()),
            ..CatalogConfig::default()
        }
    }
}
