//! Catalog core: upstream tables, enrichment, assembly and the HTTP API.

pub mod catalog;
pub mod enrich;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod markup;
pub mod models;
pub mod resolver;
pub mod server;
pub mod tables;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
