use inventory_core::{
    CatalogConfig, Draft, Field, NewProduct, Product, ProductId, ValidationError, validate,
    validate_for_commit,
};
use inventory_storage::{FailureKind, RecordStore, StorageError};

use crate::command::{Command, CommandOutcome, Rejection};
use crate::error::EngineError;
use crate::events::{CatalogEvent, CatalogObserver, Observers, SubscriptionId};
use crate::filter::FilteredView;
use crate::notify::{CommitOp, Notice, Notifier};
use crate::suggest::{self, Suggestions};

/// In-memory catalog state over a [`RecordStore`].
///
/// Owns the product set, the draft being edited, the selection, the
/// suggestion panel and the filtered view. All mutation goes through
/// `&mut self`, so a catalog has exactly one writer; move it to a worker
/// thread if store calls must not block the caller.
pub struct Catalog<S: RecordStore> {
    store: S,
    notifier: Box<dyn Notifier>,
    config: CatalogConfig,
    products: Vec<Product>,
    draft: Draft,
    selection: Option<ProductId>,
    suggestions: Suggestions,
    view: FilteredView,
    observers: Observers,
}

impl<S: RecordStore> Catalog<S> {
    /// Loads every stored product and starts with an empty draft and query.
    pub fn load(
        store: S,
        notifier: Box<dyn Notifier>,
        config: CatalogConfig,
    ) -> Result<Self, EngineError> {
        let products = store.list_all()?;
        let mut view = FilteredView::new();
        view.recompute(&products);

        tracing::info!(
            target: "inventory.engine",
            products = products.len(),
            "catalog loaded"
        );

        Ok(Self {
            store,
            notifier,
            config,
            products,
            draft: Draft::new(),
            selection: None,
            suggestions: Suggestions::default(),
            view,
            observers: Observers::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products matching the search query, in catalog order.
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.view.contains(p.id))
            .collect()
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn search_query(&self) -> &str {
        self.view.query()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn selection(&self) -> Option<&Product> {
        self.selection.and_then(|id| self.product(id))
    }

    pub fn suggestions(&self) -> &[String] {
        self.suggestions.names()
    }

    pub fn suggestions_open(&self) -> bool {
        self.suggestions.is_open()
    }

    /// The error to show next to `field`, if any.
    pub fn field_error(&self, field: Field) -> Option<ValidationError> {
        validate(field, &self.draft)
    }

    pub fn subscribe(&mut self, observer: impl CatalogObserver + 'static) -> SubscriptionId {
        self.observers.add(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    // ========================================================================
    // Operator input
    // ========================================================================

    /// Operator typed into the name field.
    pub fn set_name(&mut self, text: impl Into<String>) {
        self.draft.edit(Field::Name, text);
        self.name_changed();
    }

    pub fn set_category(&mut self, text: impl Into<String>) {
        self.draft.edit(Field::Category, text);
        self.emit(CatalogEvent::DraftChanged(Field::Category));
    }

    pub fn set_quantity(&mut self, text: impl Into<String>) {
        self.draft.edit(Field::Quantity, text);
        self.emit(CatalogEvent::DraftChanged(Field::Quantity));
    }

    /// Takes the suggestion at `index` as the name and closes the panel.
    pub fn accept_suggestion(&mut self, index: usize) -> bool {
        let Some(name) = self.suggestions.get(index).map(str::to_string) else {
            return false;
        };
        self.set_name(name);
        self.suggestions.hide();
        self.emit(CatalogEvent::SuggestionsChanged);
        true
    }

    /// Selects a product by id and copies it into the draft. `None`, or an id
    /// not in the catalog, clears the selection and leaves the draft alone.
    pub fn select(&mut self, id: Option<ProductId>) {
        let selected = id.and_then(|id| self.product(id).cloned());
        self.selection = selected.as_ref().map(|p| p.id);

        if let Some(product) = selected {
            self.draft.populate(Field::Name, product.name.clone());
            self.name_changed();
            self.draft.populate(Field::Category, product.category);
            self.draft.populate(Field::Quantity, product.quantity.to_string());
            self.emit(CatalogEvent::DraftChanged(Field::Category));
            self.emit(CatalogEvent::DraftChanged(Field::Quantity));
            self.suggestions.hide();
            self.emit(CatalogEvent::SuggestionsChanged);
        }
        self.emit(CatalogEvent::SelectionChanged(self.selection));
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.set_query(query);
        self.emit(CatalogEvent::QueryChanged);
    }

    fn name_changed(&mut self) {
        self.emit(CatalogEvent::DraftChanged(Field::Name));

        let name = self.draft.text(Field::Name).to_string();
        let limit = self.config.suggestion_limit();
        self.suggestions.refresh(&self.store, &name, limit);
        self.emit(CatalogEvent::SuggestionsChanged);

        for field in suggest::auto_populate(&self.store, &mut self.draft, &name) {
            self.emit(CatalogEvent::DraftChanged(field));
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn can_execute(&self, command: Command) -> bool {
        !command.requires_selection() || self.selection().is_some()
    }

    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        if !self.can_execute(command) {
            return CommandOutcome::Rejected(Rejection::Disabled(command));
        }
        match command {
            Command::Add => self.add(),
            Command::Edit => self.edit(),
            Command::Delete => self.delete(),
            Command::ClearSearch => self.clear_search(),
        }
    }

    /// Persists the draft as a new product. A name already in the store is
    /// reported as a duplicate before the other fields are validated.
    pub fn add(&mut self) -> CommandOutcome {
        let quantity = match self.draft.parsed_quantity() {
            Ok(quantity) => quantity,
            Err(err) => return CommandOutcome::Rejected(self.invalid(err)),
        };
        let new = NewProduct::trimmed(
            self.draft.text(Field::Name),
            self.draft.text(Field::Category),
            quantity,
        );

        // Advisory only: the store's own constraint decides.
        let existing = if new.name.is_empty() {
            Ok(None)
        } else {
            self.store.find_by_name(&new.name)
        };
        match existing {
            Ok(Some(_)) => {
                self.report(Notice::duplicate_entry());
                return CommandOutcome::Rejected(Rejection::Duplicate(new.name));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    target: "inventory.engine",
                    name = %new.name,
                    error = %err,
                    "duplicate pre-check failed"
                );
            }
        }
        if let Err(err) = validate_for_commit(&self.draft) {
            return CommandOutcome::Rejected(self.invalid(err));
        }

        match self.store.insert(&new) {
            Ok(product) => {
                tracing::info!(
                    target: "inventory.engine",
                    op = "add",
                    product_id = %product.id,
                    name = %product.name,
                    "product added"
                );
                self.products.push(product.clone());
                self.emit(CatalogEvent::ProductsChanged);
                self.clear_draft();
                CommandOutcome::Added(product)
            }
            Err(err) => self.store_failed(CommitOp::Add, &err),
        }
    }

    /// Writes the draft onto the selected product, keeping its id.
    pub fn edit(&mut self) -> CommandOutcome {
        let Some(index) = self.selected_index() else {
            self.report(Notice::no_selection());
            return CommandOutcome::Rejected(Rejection::NoSelection);
        };
        let quantity = match self.check_draft() {
            Ok(quantity) => quantity,
            Err(rejection) => return CommandOutcome::Rejected(rejection),
        };
        let current = &self.products[index];
        let updated = NewProduct::trimmed(
            self.draft.text(Field::Name),
            self.draft.text(Field::Category),
            quantity,
        )
        .with_id(current.id);

        match self.store.update(&updated) {
            Ok(()) => {
                tracing::info!(
                    target: "inventory.engine",
                    op = "edit",
                    product_id = %updated.id,
                    name = %updated.name,
                    "product updated"
                );
                self.products[index] = updated.clone();
                self.emit(CatalogEvent::ProductsChanged);
                self.clear_draft();
                CommandOutcome::Updated(updated)
            }
            Err(err) => {
                self.resync(index);
                self.store_failed(CommitOp::Edit, &err)
            }
        }
    }

    /// Removes the selected product from the store and the catalog.
    pub fn delete(&mut self) -> CommandOutcome {
        let Some(index) = self.selected_index() else {
            self.report(Notice::no_selection());
            return CommandOutcome::Rejected(Rejection::NoSelection);
        };
        let product = self.products[index].clone();

        match self.store.remove(&product) {
            Ok(()) => {}
            Err(err) if err.kind() == FailureKind::NotFound => {
                tracing::warn!(
                    target: "inventory.engine",
                    product_id = %product.id,
                    "product already gone from store"
                );
            }
            Err(err) => return self.store_failed(CommitOp::Delete, &err),
        }

        tracing::info!(
            target: "inventory.engine",
            op = "delete",
            product_id = %product.id,
            name = %product.name,
            "product deleted"
        );
        self.products.remove(index);
        self.selection = None;
        self.emit(CatalogEvent::ProductsChanged);
        self.emit(CatalogEvent::SelectionChanged(None));
        self.clear_draft();
        CommandOutcome::Deleted(product)
    }

    pub fn clear_search(&mut self) -> CommandOutcome {
        self.set_search_query(String::new());
        CommandOutcome::SearchCleared
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn selected_index(&self) -> Option<usize> {
        let id = self.selection?;
        self.products.iter().position(|p| p.id == id)
    }

    /// Validates every field and parses the quantity, reporting the first
    /// failure.
    fn check_draft(&self) -> Result<u32, Rejection> {
        validate_for_commit(&self.draft)
            .and_then(|()| self.draft.parsed_quantity())
            .map_err(|err| self.invalid(err))
    }

    fn invalid(&self, err: ValidationError) -> Rejection {
        self.report(Notice::validation(&err));
        Rejection::Invalid(err)
    }

    fn store_failed(&self, op: CommitOp, err: &StorageError) -> CommandOutcome {
        tracing::warn!(
            target: "inventory.engine",
            op = ?op,
            kind = ?err.kind(),
            error = %err,
            "store rejected command"
        );
        self.report(Notice::store_failure(op, err));
        CommandOutcome::Rejected(Rejection::Store(err.kind()))
    }

    /// After a failed write, replaces the in-memory copy at `index` with the
    /// store's authoritative record. The write itself is never retried.
    fn resync(&mut self, index: usize) {
        let stale = self.products[index].clone();
        let changed = match self.store.reload(&stale) {
            Ok(fresh) => {
                self.products[index] = fresh;
                true
            }
            Err(err) if err.kind() == FailureKind::NotFound => {
                tracing::warn!(
                    target: "inventory.engine",
                    product_id = %stale.id,
                    "product vanished from store, dropping it"
                );
                self.products.remove(index);
                self.selection = None;
                true
            }
            Err(err) => {
                tracing::warn!(
                    target: "inventory.engine",
                    product_id = %stale.id,
                    error = %err,
                    "reload after failed write failed"
                );
                false
            }
        };
        if changed {
            self.emit(CatalogEvent::ProductsChanged);
        }
        self.emit(CatalogEvent::SelectionChanged(self.selection));
    }

    fn clear_draft(&mut self) {
        self.draft.clear();
        self.suggestions.reset();
        for field in Field::ALL {
            self.emit(CatalogEvent::DraftChanged(field));
        }
        self.emit(CatalogEvent::SuggestionsChanged);
    }

    fn report(&self, notice: Notice) {
        self.notifier.notify(&notice.message, &notice.title);
    }

    fn emit(&mut self, event: CatalogEvent) {
        self.view.on_event(&event, &self.products);
        self.observers.dispatch(&event);
    }
}
