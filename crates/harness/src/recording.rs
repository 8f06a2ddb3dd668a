use std::sync::{Arc, Mutex, MutexGuard};

use inventory_engine::{CatalogEvent, CatalogObserver, Notice, Notifier};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Notifier that keeps every notice for later assertions. Clones share
/// the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn last(&self) -> Option<Notice> {
        lock(&self.notices).last().cloned()
    }

    pub fn titles(&self) -> Vec<String> {
        lock(&self.notices).iter().map(|n| n.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.notices).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, title: &str) {
        lock(&self.notices).push(Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Observer that records catalog events in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<CatalogEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observer(&self) -> impl CatalogObserver + 'static {
        let events = Arc::clone(&self.events);
        move |event: &CatalogEvent| lock(&events).push(event.clone())
    }

    pub fn events(&self) -> Vec<CatalogEvent> {
        lock(&self.events).clone()
    }

    pub fn count(&self, event: &CatalogEvent) -> usize {
        lock(&self.events).iter().filter(|e| *e == event).count()
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}
