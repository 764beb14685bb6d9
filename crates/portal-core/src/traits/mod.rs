//! Core traits for catalog access.

mod source;

pub use source::CatalogSource;
