pub mod config;
pub mod draft;
pub mod error;
pub mod ids;
pub mod product;
pub mod validation;

pub use config::CatalogConfig;
pub use draft::{Draft, Field, FieldState};
pub use error::CoreError;
pub use ids::ProductId;
pub use product::{NewProduct, Product};
pub use validation::{ValidationError, validate, validate_for_commit};
