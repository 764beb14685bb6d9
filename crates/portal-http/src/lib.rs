//! portal-http - HTTP-backed catalog source.

mod catalog;
mod client;
mod endpoints;

pub use catalog::{CatalogConfig, HttpCatalog};
