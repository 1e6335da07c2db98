//! Hotel service
//!
//! Explicitly constructed owner of the backend handle and the catalogue.
//! Screens receive it by `Arc` instead of reaching for a global.

use crate::cache::{CatalogConfig, CatalogEvent, CatalogSubscription, HotelCatalog};
use crate::error::Result;
use hotel_client::{
    ClientConfig, Hotel, HotelBackend, HotelClient, HotelId, DEFAULT_PLACEHOLDER_IMAGE,
    NEW_HOTEL_ID,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Image reference set on every created hotel
    pub placeholder_image: String,
    /// Catalogue join settings
    pub catalog: CatalogConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            catalog: CatalogConfig::default(),
        }
    }
}

/// Hotel operations for the list and edit screens
///
/// # Example
///
/// ```rust,ignore
/// use hotel_sdk::{HotelService, ClientConfig};
///
/// let service = HotelService::from_config(ClientConfig::from_env()?, Default::default())?;
///
/// let draft = service.get_by_id(0).await?.unwrap();   // no network call
/// let saved = service.create(&draft).await?;
/// service.publish_local_change(saved)?;
/// ```
pub struct HotelService {
    backend: Arc<dyn HotelBackend>,
    catalog: HotelCatalog,
    config: ServiceConfig,
}

impl HotelService {
    /// Create a service over any backend
    pub fn new(backend: Arc<dyn HotelBackend>, config: ServiceConfig) -> Self {
        let catalog = HotelCatalog::new(backend.clone(), config.catalog.clone());
        Self {
            backend,
            catalog,
            config,
        }
    }

    /// Create a service over the HTTP client
    pub fn from_config(client: ClientConfig, catalog: CatalogConfig) -> Result<Self> {
        let config = ServiceConfig {
            placeholder_image: client.placeholder_image.clone(),
            catalog,
        };
        let client = HotelClient::new(client)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Get the shared catalogue
    pub fn catalog(&self) -> &HotelCatalog {
        &self.catalog
    }

    /// Subscribe to the reconciled hotel list
    pub fn get_all(&self) -> CatalogSubscription {
        self.catalog.subscribe()
    }

    /// Get a hotel by id.
    ///
    /// Id `0` never reaches the backend: it yields a blank new-record
    /// placeholder.
    pub async fn get_by_id(&self, id: HotelId) -> Result<Option<Hotel>> {
        if id == NEW_HOTEL_ID {
            return Ok(Some(Hotel::default()));
        }

        let hotel = self.backend.fetch_hotel(id).await.map_err(|e| {
            error!(hotel_id = id, error = %e, "Failed to fetch hotel");
            e
        })?;

        debug!(hotel_id = id, found = hotel.is_some(), "Fetched hotel");
        Ok(hotel)
    }

    /// Create a hotel. The client id is dropped and the placeholder image set
    /// before sending; the returned hotel carries the backend's id.
    pub async fn create(&self, hotel: &Hotel) -> Result<Hotel> {
        let input = hotel.to_create_input(&self.config.placeholder_image);

        let created = self.backend.create_hotel(&input).await.map_err(|e| {
            error!(error = %e, "Failed to create hotel");
            e
        })?;

        info!(hotel_id = created.id, "Hotel created");
        Ok(created)
    }

    /// Update a hotel addressed by its id
    pub async fn update(&self, hotel: &Hotel) -> Result<Hotel> {
        let updated = self.backend.update_hotel(hotel).await.map_err(|e| {
            error!(hotel_id = hotel.id, error = %e, "Failed to update hotel");
            e
        })?;

        info!(hotel_id = updated.id, "Hotel updated");
        Ok(updated)
    }

    /// Delete a hotel
    pub async fn delete(&self, id: HotelId) -> Result<()> {
        self.backend.delete_hotel(id).await.map_err(|e| {
            error!(hotel_id = id, error = %e, "Failed to delete hotel");
            e
        })?;

        info!(hotel_id = id, "Hotel deleted");
        Ok(())
    }

    /// Fold a saved hotel into the catalogue without a backend call
    pub fn publish_local_change(&self, hotel: Hotel) -> Result<()> {
        self.catalog.publish(CatalogEvent::Upsert(hotel))
    }

    /// Evict a deleted hotel from the catalogue without a backend call
    pub fn publish_local_removal(&self, id: HotelId) -> Result<()> {
        self.catalog.publish(CatalogEvent::Remove(id))
    }
}
