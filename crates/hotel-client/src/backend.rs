//! Backend seam for hotel operations

use crate::error::Result;
use crate::types::{Category, Hotel, HotelId, HotelInput};
use async_trait::async_trait;

/// Operations the hotel service needs from a backend.
///
/// [`HotelClient`](crate::HotelClient) implements this over HTTP. Each call is
/// a single round trip; failures come back as a [`ClientError`](crate::ClientError)
/// value, never as a panic.
#[async_trait]
pub trait HotelBackend: Send + Sync {
    /// Fetch the full hotel collection
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>>;

    /// Fetch the category reference list
    async fn fetch_categories(&self) -> Result<Vec<Category>>;

    /// Fetch a single hotel, `None` when the backend does not know the id
    async fn fetch_hotel(&self, id: HotelId) -> Result<Option<Hotel>>;

    /// Create a hotel; the backend assigns the id
    async fn create_hotel(&self, input: &HotelInput) -> Result<Hotel>;

    /// Update a hotel addressed by its id
    async fn update_hotel(&self, hotel: &Hotel) -> Result<Hotel>;

    /// Delete a hotel
    async fn delete_hotel(&self, id: HotelId) -> Result<()>;
}
