use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, ErrorCode, ffi};

use inventory_core::{
    CatalogConfig, NewProduct, Product, ProductId, config::DEFAULT_STORE_TIMEOUT_MS,
};

use crate::error::StorageError;
use crate::traits::RecordStore;

const SELECT_PRODUCT: &str = "SELECT product_id, name, category, quantity FROM products";

/// Convert Vec<u8> to fixed-size array with proper error handling.
fn to_array<const N: usize>(v: Vec<u8>, label: &str) -> Result<[u8; N], StorageError> {
    v.try_into()
        .map_err(|_| StorageError::Corrupt(format!("invalid {label} length")))
}

/// Blank text is bound as NULL so the NOT NULL constraints report it.
fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Escapes LIKE wildcards so `prefix` matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn read_product(row: &rusqlite::Row) -> Result<Product, StorageError> {
    let id_bytes: Vec<u8> = row.get(0)?;
    let name: String = row.get(1)?;
    let category: String = row.get(2)?;
    let quantity: i64 = row.get(3)?;

    let id = ProductId::from_bytes(to_array::<16>(id_bytes, "product_id")?);
    let quantity = u32::try_from(quantity).map_err(|_| {
        StorageError::Corrupt(format!("quantity {quantity} out of range for {name}"))
    })?;

    Ok(Product {
        id,
        name,
        category,
        quantity,
    })
}

pub struct SqliteStore {
    conn: Connection,
    timeout: Duration,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn, timeout)?;
        Ok(Self { conn, timeout })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let timeout = Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS);
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn, timeout)?;
        Ok(Self { conn, timeout })
    }

    /// Opens the configured database file, or an in-memory store when none is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, StorageError> {
        match &config.database_path {
            Some(path) => Self::open(path, config.store_timeout()),
            None => {
                let mut store = Self::open_in_memory()?;
                store.timeout = config.store_timeout();
                store.conn.busy_timeout(store.timeout)?;
                Ok(store)
            }
        }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Maps a failed write onto the store's failure kinds.
    fn classify(&self, err: rusqlite::Error) -> StorageError {
        let rusqlite::Error::SqliteFailure(failure, message) = &err else {
            return StorageError::Sqlite(err);
        };
        let detail = message.clone().unwrap_or_else(|| failure.to_string());
        match (failure.code, failure.extended_code) {
            (ErrorCode::ConstraintViolation, code) => match code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    StorageError::DuplicateKey(detail)
                }
                ffi::SQLITE_CONSTRAINT_NOTNULL => StorageError::MissingRequiredField(detail),
                _ => StorageError::ConstraintViolation(detail),
            },
            (ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked, _) => {
                StorageError::Timeout(self.timeout)
            }
            _ => StorageError::Sqlite(err),
        }
    }

    fn query_products(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Product>, StorageError> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| self.classify(e))?;
        let mut rows = stmt.query(params).map_err(|e| self.classify(e))?;
        let mut products = Vec::new();
        while let Some(row) = rows.next().map_err(|e| self.classify(e))? {
            products.push(read_product(row)?);
        }
        Ok(products)
    }
}

impl RecordStore for SqliteStore {
    fn find_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StorageError> {
        if prefix.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM products WHERE name LIKE ?1 ESCAPE '\\'
                 ORDER BY name COLLATE NOCASE, name LIMIT ?2",
            )
            .map_err(|e| self.classify(e))?;
        let names = stmt
            .query_map(
                rusqlite::params![like_prefix(prefix), i64::try_from(limit).unwrap_or(i64::MAX)],
                |row| row.get::<_, String>(0),
            )
            .map_err(|e| self.classify(e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.classify(e))?;

        tracing::debug!(
            target: "inventory.storage",
            op = "find_by_prefix",
            prefix,
            matches = names.len(),
            "prefix lookup completed"
        );
        Ok(names)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Product>, StorageError> {
        let product = self
            .query_products(
                &format!("{SELECT_PRODUCT} WHERE name = ?1"),
                rusqlite::params![name],
            )?
            .into_iter()
            .next();

        tracing::debug!(
            target: "inventory.storage",
            op = "find_by_name",
            name,
            found = product.is_some(),
            "name lookup completed"
        );
        Ok(product)
    }

    fn insert(&mut self, product: &NewProduct) -> Result<Product, StorageError> {
        let id = ProductId::new();
        self.conn
            .execute(
                "INSERT INTO products (product_id, name, category, quantity) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    id.as_bytes().as_slice(),
                    non_blank(&product.name),
                    non_blank(&product.category),
                    i64::from(product.quantity),
                ],
            )
            .map_err(|e| self.classify(e))?;

        tracing::debug!(
            target: "inventory.storage",
            op = "insert",
            product_id = %id,
            name = %product.name,
            "product inserted"
        );
        Ok(product.clone().with_id(id))
    }

    fn update(&mut self, product: &Product) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute(
                "UPDATE products SET name = ?1, category = ?2, quantity = ?3 WHERE product_id = ?4",
                rusqlite::params![
                    non_blank(&product.name),
                    non_blank(&product.category),
                    i64::from(product.quantity),
                    product.id.as_bytes().as_slice(),
                ],
            )
            .map_err(|e| self.classify(e))?;
        if changed == 0 {
            return Err(StorageError::NotFound(product.id.to_string()));
        }

        tracing::debug!(
            target: "inventory.storage",
            op = "update",
            product_id = %product.id,
            "product updated"
        );
        Ok(())
    }

    fn remove(&mut self, product: &Product) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM products WHERE product_id = ?1",
                rusqlite::params![product.id.as_bytes().as_slice()],
            )
            .map_err(|e| self.classify(e))?;
        if changed == 0 {
            return Err(StorageError::NotFound(product.id.to_string()));
        }

        tracing::debug!(
            target: "inventory.storage",
            op = "remove",
            product_id = %product.id,
            "product removed"
        );
        Ok(())
    }

    fn reload(&self, product: &Product) -> Result<Product, StorageError> {
        self.query_products(
            &format!("{SELECT_PRODUCT} WHERE product_id = ?1"),
            rusqlite::params![product.id.as_bytes().as_slice()],
        )?
        .into_iter()
        .next()
        .ok_or_else(|| StorageError::NotFound(product.id.to_string()))
    }

    fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        let products = self.query_products(&format!("{SELECT_PRODUCT} ORDER BY rowid"), [])?;
        tracing::debug!(
            target: "inventory.storage",
            op = "list_all",
            count = products.len(),
            "product listing completed"
        );
        Ok(products)
    }
}
