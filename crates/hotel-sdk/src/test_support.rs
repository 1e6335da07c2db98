//! In-memory backend used by the unit tests

use async_trait::async_trait;
use hotel_client::{Category, ClientError, Hotel, HotelBackend, HotelId, HotelInput, Result};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Backend fake that records every call
pub struct FakeBackend {
    hotels: Mutex<Vec<Hotel>>,
    categories: Vec<Category>,
    failure: Mutex<Option<ClientError>>,
    next_id: AtomicU64,
    pub last_created: Mutex<Option<HotelInput>>,
    pub hotel_fetches: AtomicUsize,
    pub category_fetches: AtomicUsize,
    pub item_fetches: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FakeBackend {
    pub fn with_hotels(hotels: Vec<Hotel>) -> Self {
        let next_id = hotels.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        Self {
            hotels: Mutex::new(hotels),
            categories: Category::defaults(),
            failure: Mutex::new(None),
            next_id: AtomicU64::new(next_id),
            last_created: Mutex::new(None),
            hotel_fetches: AtomicUsize::new(0),
            category_fetches: AtomicUsize::new(0),
            item_fetches: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ClientError) -> Self {
        let backend = Self::with_hotels(vec![]);
        backend.fail_with(Some(err));
        backend
    }

    /// Make every subsequent call fail (or succeed again with `None`)
    pub fn fail_with(&self, err: Option<ClientError>) {
        *self.failure.lock().unwrap() = err;
    }

    pub fn set_next_id(&self, id: HotelId) {
        self.next_id.store(id, Ordering::SeqCst);
    }

    /// Add a hotel server-side without going through the API
    pub fn insert(&self, hotel: Hotel) {
        self.hotels.lock().unwrap().push(hotel);
    }

    pub fn total_calls(&self) -> usize {
        [
            &self.hotel_fetches,
            &self.category_fetches,
            &self.item_fetches,
            &self.creates,
            &self.updates,
            &self.deletes,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HotelBackend for FakeBackend {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>> {
        self.hotel_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.hotels.lock().unwrap().clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.category_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn fetch_hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        self.item_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let hotels = self.hotels.lock().unwrap();
        Ok(hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn create_hotel(&self, input: &HotelInput) -> Result<Hotel> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.last_created.lock().unwrap() = Some(input.clone());

        let hotel = Hotel {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            hotel_name: input.hotel_name.clone(),
            description: input.description.clone(),
            price: input.price,
            rating: input.rating,
            image_url: input.image_url.clone(),
            tags: input.tags.clone(),
            category_id: input.category_id,
            category: None,
        };
        self.hotels.lock().unwrap().push(hotel.clone());
        Ok(hotel)
    }

    async fn update_hotel(&self, hotel: &Hotel) -> Result<Hotel> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut hotels = self.hotels.lock().unwrap();
        match hotels.iter_mut().find(|h| h.id == hotel.id) {
            Some(existing) => {
                *existing = hotel.clone();
                Ok(hotel.clone())
            }
            None => Err(ClientError::Backend {
                status: 404,
                body: format!("hotel {} not found", hotel.id),
            }),
        }
    }

    async fn delete_hotel(&self, id: HotelId) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.hotels.lock().unwrap().retain(|h| h.id != id);
        Ok(())
    }
}
