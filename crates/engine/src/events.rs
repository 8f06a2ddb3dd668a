use inventory_core::{Field, ProductId};

/// Change notifications emitted by [`Catalog`](crate::Catalog) after each
/// state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A product was added, edited, removed, or reloaded.
    ProductsChanged,
    QueryChanged,
    SelectionChanged(Option<ProductId>),
    DraftChanged(Field),
    SuggestionsChanged,
}

pub trait CatalogObserver: Send {
    fn on_event(&mut self, event: &CatalogEvent);
}

impl<F> CatalogObserver for F
where
    F: FnMut(&CatalogEvent) + Send,
{
    fn on_event(&mut self, event: &CatalogEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn CatalogObserver>)>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn CatalogObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Delivers in subscription order.
    pub(crate) fn dispatch(&mut self, event: &CatalogEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_event(event);
        }
    }
}
