pub mod error;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use error::{FailureKind, StorageError};
pub use sqlite::SqliteStore;
pub use traits::*;
