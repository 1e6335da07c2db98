//! Rust client for the hotel catalogue REST backend
//!
//! Wraps the `GET /hotels`, `GET|POST /hotels/{id}`, `POST /hotels` and
//! `DELETE /hotels/{id}` endpoints. Categories are static reference data
//! served from configuration, not from the backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use hotel_client::{ClientConfig, HotelBackend, HotelClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HotelClient::new(ClientConfig {
//!     base_url: "http://localhost:4200/api".into(),
//!     ..Default::default()
//! })?;
//!
//! let hotels = client.fetch_hotels().await?;
//! let categories = client.fetch_categories().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

// Re-export main types
pub use backend::HotelBackend;
pub use client::HotelClient;
pub use error::{ClientError, Result};
pub use types::*;
