//! Hotel SDK - edit screen and list cache for the hotel catalogue
//!
//! # Architecture
//!
//! - **Validation**: a declarative rule table turns form validity into one
//!   message per field, recomputed through a debounce that turns off once a
//!   submit was attempted.
//! - **Cache**: hotels and categories are fetched once, joined, and folded
//!   together with local create/update/delete events into a shared view
//!   with replay-one semantics.
//! - **Service / Editor**: explicitly constructed owners of the backend
//!   handle, the catalogue and the form.
//!
//! # Example
//!
//! ```rust,ignore
//! use hotel_sdk::{ClientConfig, HotelEditor, HotelService, CatalogConfig};
//! use std::sync::Arc;
//!
//! let service = Arc::new(HotelService::from_config(
//!     ClientConfig::from_env()?,
//!     CatalogConfig::default(),
//! )?);
//!
//! // List screen
//! let mut list = service.get_all();
//! let hotels = list.next().await.unwrap()?;
//!
//! // Edit screen
//! let mut editor = HotelEditor::new(service.clone());
//! editor.load(0).await?;
//! editor.set_value("hotelName", "Grand Hotel");
//! editor.set_value("price", "120");
//! editor.save().await?;
//!
//! // The list sees the new hotel without a re-fetch
//! let hotels = list.next().await.unwrap()?;
//! ```

// Reconciling catalogue cache
pub mod cache;

// Hotel service
pub mod client;

// Edit workflow
pub mod editor;

// Error types
pub mod error;

// Form model
pub mod form;

// Rule table, error mapper and debounced error stream
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-export cache types
pub use cache::{CatalogConfig, CatalogEvent, CatalogState, CatalogSubscription, HotelCatalog};

// Re-export service and editor
pub use client::{HotelService, ServiceConfig};
pub use editor::{HotelEditor, SaveOutcome};

// Re-export form and validation types
pub use form::HotelForm;
pub use validation::{
    ErrorKind, ErrorMapper, ErrorStream, FieldState, FormErrors, FormSnapshot, ValidationConfig,
    ValidationRules,
};

// Re-export error types
pub use error::{Result, SdkError};

// Re-export from the underlying client
pub use hotel_client::{
    Category, ClientConfig, ClientError, Hotel, HotelBackend, HotelClient, HotelId, HotelInput,
};
