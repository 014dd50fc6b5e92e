//! Application services for catalog records.

mod catalog;

pub use catalog::{CatalogService, CatalogServiceError, CatalogServiceResult};
