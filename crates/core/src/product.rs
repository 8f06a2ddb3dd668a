use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Upper bound the store enforces on a product name, independent of the
/// tighter limit the form validation applies.
pub const MAX_STORED_NAME_LEN: usize = 100;

/// A persisted inventory item. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            quantity,
        }
    }
}

/// A product that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: u32,
}

impl NewProduct {
    /// Builds the insert payload from raw form text, trimming both strings.
    pub fn trimmed(name: &str, category: &str, quantity: u32) -> Self {
        Self {
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            quantity,
        }
    }

    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
        }
    }
}
