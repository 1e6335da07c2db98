//! Types for the hotel backend API

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};

/// Hotel identifier assigned by the backend
pub type HotelId = u64;

/// Category identifier
pub type CategoryId = u32;

/// Sentinel id of a hotel that has not been saved yet
pub const NEW_HOTEL_ID: HotelId = 0;

/// Image reference attached to hotels created from the UI
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "assets/img/hotel-room.jpg";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API (without trailing slash)
    pub base_url: String,
    /// Collection path under the base URL
    pub hotels_path: String,
    /// Image reference set on every created hotel
    pub placeholder_image: String,
    /// Request timeout in seconds. `None` waits for the backend indefinitely.
    pub timeout_secs: Option<u64>,
    /// Static category reference list
    pub categories: Vec<Category>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4200/api".to_string(),
            hotels_path: "hotels".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            timeout_secs: None,
            categories: Category::defaults(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `HOTEL_API_URL` and `HOTEL_API_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HOTEL_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(raw) = std::env::var("HOTEL_API_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|e| {
                ClientError::InvalidConfig(format!("HOTEL_API_TIMEOUT_SECS={}: {}", raw, e))
            })?;
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }

    /// URL of the hotel collection
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.hotels_path)
    }

    /// URL of a single hotel
    pub fn item_url(&self, id: HotelId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

/// Hotel record
///
/// `category` is a display-only field filled in by the catalogue join. It is
/// accepted when present in a payload but never sent back to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: u8,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing)]
    pub category: Option<String>,
}

impl Hotel {
    /// Whether this hotel is a new-record placeholder
    pub fn is_new(&self) -> bool {
        self.id == NEW_HOTEL_ID
    }

    /// Payload for `POST /hotels`: no client id, placeholder image
    pub fn to_create_input(&self, placeholder_image: &str) -> HotelInput {
        HotelInput {
            hotel_name: self.hotel_name.clone(),
            description: self.description.clone(),
            price: self.price,
            rating: self.rating,
            image_url: placeholder_image.to_string(),
            tags: self.tags.clone(),
            category_id: self.category_id,
        }
    }
}

/// Input for creating a hotel; the backend assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInput {
    pub hotel_name: String,
    pub description: String,
    #[serde(deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::rating")]
    pub rating: u8,
    pub image_url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Numeric fields the backend may store either as JSON numbers or as the
/// form's raw strings (`"50"`). Blank strings and `null` read as zero.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(NumberOrText::Number(n)) => Ok(n),
            Some(NumberOrText::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(0.0);
                }
                text.parse::<f64>()
                    .map_err(|_| D::Error::custom(format!("invalid number {:?}", text)))
            }
        }
    }

    pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        number(deserializer)
    }

    pub fn rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = number(deserializer)?;
        if n.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&n) {
            return Err(D::Error::custom(format!("invalid rating {}", n)));
        }
        Ok(n as u8)
    }
}

/// Hotel category (static reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The built-in category list
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new(0, "Motel"),
            Category::new(1, "Auberge"),
            Category::new(2, "Palace"),
            Category::new(3, "Parc"),
            Category::new(4, "Bungalow"),
        ]
    }
}
