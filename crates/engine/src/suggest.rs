//! Autocomplete for the name field and auto-population of the other fields
//! from an exact name match.

use inventory_core::{Draft, Field};
use inventory_storage::RecordStore;

/// The suggestion panel: matching names plus whether it is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    names: Vec<String>,
    open: bool,
}

impl Suggestions {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Recomputes from `prefix`. The panel is open whenever the prefix is
    /// non-blank, even with no matches.
    pub(crate) fn refresh<S: RecordStore>(&mut self, store: &S, prefix: &str, limit: usize) {
        self.names.clear();
        if prefix.trim().is_empty() {
            self.open = false;
            return;
        }
        match store.find_by_prefix(prefix, limit) {
            Ok(names) => {
                for name in names {
                    if self.names.len() == limit {
                        break;
                    }
                    if !self.names.contains(&name) {
                        self.names.push(name);
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "inventory.engine",
                    prefix,
                    error = %err,
                    "suggestion lookup failed"
                );
            }
        }
        self.open = true;
    }

    pub(crate) fn hide(&mut self) {
        self.open = false;
    }

    pub(crate) fn reset(&mut self) {
        self.names.clear();
        self.open = false;
    }
}

/// Copies category and quantity from the stored product named exactly
/// `name`. Skipped while the operator has typed their own category or
/// quantity. Returns the fields that were overwritten.
pub(crate) fn auto_populate<S: RecordStore>(
    store: &S,
    draft: &mut Draft,
    name: &str,
) -> Vec<Field> {
    if name.trim().is_empty() {
        return Vec::new();
    }
    if draft.state(Field::Category).has_user_text()
        || draft.state(Field::Quantity).has_user_text()
    {
        tracing::debug!(
            target: "inventory.engine",
            name,
            "auto-populate skipped, fields edited by operator"
        );
        return Vec::new();
    }
    let existing = match store.find_by_name(name) {
        Ok(existing) => existing,
        Err(err) => {
            tracing::warn!(
                target: "inventory.engine",
                name,
                error = %err,
                "auto-populate lookup failed"
            );
            return Vec::new();
        }
    };
    match existing {
        Some(product) => {
            draft.populate(Field::Category, product.category);
            draft.populate(Field::Quantity, product.quantity.to_string());
            vec![Field::Category, Field::Quantity]
        }
        None => Vec::new(),
    }
}
