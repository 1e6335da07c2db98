//! HTTP client for the hotel backend

use crate::backend::HotelBackend;
use crate::error::{ClientError, Result};
use crate::types::*;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error};

/// HTTP client for the hotel backend
///
/// # Example
///
/// ```rust,no_run
/// use hotel_client::{ClientConfig, HotelBackend, HotelClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HotelClient::new(ClientConfig::default())?;
///
/// if let Some(hotel) = client.fetch_hotel(3).await? {
///     println!("{}", hotel.hotel_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HotelClient {
    config: ClientConfig,
    client: Client,
}

impl HotelClient {
    /// Create a new hotel client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Helper Methods ====================

    /// Map a response to its body bytes, converting non-2xx into `Backend`
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Backend returned an error status");
            return Err(ClientError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let body = self.read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    let err = ClientError::from(err);
    if err.is_transport() {
        error!(error = %err, "Hotel backend unreachable");
    }
    err
}

#[async_trait]
impl HotelBackend for HotelClient {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>> {
        let url = self.config.collection_url();

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let hotels: Vec<Hotel> = self.handle_response(response).await?;

        debug!(count = hotels.len(), "Fetched hotels");
        Ok(hotels)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        Ok(self.config.categories.clone())
    }

    async fn fetch_hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        let url = self.config.item_url(id);

        let response = self.client.get(&url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(hotel_id = id, "Hotel not found");
            return Ok(None);
        }

        Ok(Some(self.handle_response(response).await?))
    }

    async fn create_hotel(&self, input: &HotelInput) -> Result<Hotel> {
        let url = self.config.collection_url();

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(input)
            .send()
            .await
            .map_err(transport)?;

        let hotel: Hotel = self.handle_response(response).await?;
        debug!(hotel_id = hotel.id, "Created hotel");
        Ok(hotel)
    }

    async fn update_hotel(&self, hotel: &Hotel) -> Result<Hotel> {
        let url = self.config.item_url(hotel.id);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(hotel)
            .send()
            .await
            .map_err(transport)?;

        // Some backends answer an update with 204 and no body
        let body = self.read_body(response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(hotel.clone());
        }

        Ok(serde_json::from_slice(&body)?)
    }

    async fn delete_hotel(&self, id: HotelId) -> Result<()> {
        let url = self.config.item_url(id);

        let response = self.client.delete(&url).send().await.map_err(transport)?;
        self.read_body(response).await?;

        debug!(hotel_id = id, "Deleted hotel");
        Ok(())
    }
}
