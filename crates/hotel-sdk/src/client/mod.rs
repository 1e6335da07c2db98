//! Hotel service over a backend plus the shared catalogue
//!
//! Single-record operations go straight to the backend; the list view is
//! served by the [`HotelCatalog`](crate::cache::HotelCatalog) the service owns.

mod hotel_service;

pub use hotel_service::{HotelService, ServiceConfig};
