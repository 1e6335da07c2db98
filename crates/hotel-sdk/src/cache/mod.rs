//! Collection reconciliation cache
//!
//! Joins the fetched hotel and category collections, then folds locally
//! originated changes into one shared, replay-one view of the catalogue so
//! screens stay consistent without re-querying the backend.

mod catalog;
mod join;
mod reconcile;

pub use catalog::{CatalogConfig, CatalogEvent, CatalogState, CatalogSubscription, HotelCatalog};
pub use join::enrich;
pub use reconcile::Reconciler;
