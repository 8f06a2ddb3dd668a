pub mod catalog;
pub mod command;
pub mod error;
pub mod events;
pub mod filter;
pub mod notify;
pub mod suggest;

pub use catalog::Catalog;
pub use command::{Command, CommandOutcome, Rejection};
pub use error::EngineError;
pub use events::{CatalogEvent, CatalogObserver, SubscriptionId};
pub use filter::FilteredView;
pub use notify::{CommitOp, Notice, Notifier, TracingNotifier};
pub use suggest::Suggestions;
