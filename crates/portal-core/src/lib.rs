//! portal-core - Core catalog types and traits.

pub mod character;
pub mod error;
pub mod page;
pub mod traits;
pub mod types;

pub use character::{Character, CharacterId, LocationRef, Status};
pub use error::Error;
pub use page::PageResult;
pub use traits::CatalogSource;
pub use types::{ApiUrl, PageCursor};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
