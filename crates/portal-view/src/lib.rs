//! portal-view - List and detail view logic for the character catalog.
//!
//! A [`ListView`] owns one searchable, paginated listing. It debounces search
//! input, drives a [`CatalogSource`](portal_core::CatalogSource), merges pages
//! without duplicating characters, and publishes immutable
//! [`ListSnapshot`]s for whatever renders the list.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use portal_core::ApiUrl;
//! use portal_http::{CatalogConfig, HttpCatalog};
//! use portal_view::{ListView, Phase, ViewConfig};
//!
//! # async fn example() -> Result<(), portal_core::Error> {
//! let catalog = HttpCatalog::new(CatalogConfig::new(ApiUrl::new(ApiUrl::DEFAULT)?))?;
//! let view = ListView::mount(Arc::new(catalog), ViewConfig::default());
//!
//! let snapshot = view.wait_until(|s| s.phase == Phase::Ready).await;
//! if let Some(snapshot) = snapshot {
//!     for character in &snapshot.items {
//!         println!("{} ({})", character.name, character.status);
//!     }
//! }
//! view.end_reached();
//! # Ok(())
//! # }
//! ```

mod debounce;
mod detail;
mod snapshot;
mod state;
mod view;

pub use debounce::Debouncer;
pub use detail::{CharacterDetail, DetailRow, StatusTone};
pub use snapshot::{EMPTY_MESSAGE, LOADING_MESSAGE, ListSnapshot};
pub use state::{Applied, FetchKind, FetchTicket, ListState, Phase, normalize_query};
pub use view::{ListView, ViewConfig};
