//! Shared, replay-one hotel catalogue
//!
//! A single fold task owns the [`Reconciler`]. It seeds it from the joined
//! hotel/category fetch, then drains local change events strictly in arrival
//! order. Every new materialized collection is published on a `watch`
//! channel, so late subscribers see the latest value immediately instead of
//! triggering another fetch.

use super::join::enrich;
use super::reconcile::Reconciler;
use crate::error::{Result, SdkError};
use hotel_client::{Category, ClientError, Hotel, HotelBackend, HotelId};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Catalogue configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Fraction taken off every fetched price at join time (0.15 = 15%)
    pub discount_rate: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.15,
        }
    }
}

/// Event folded into the catalogue
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// Replace the hotel with the same id, or append it
    Upsert(Hotel),
    /// Drop the hotel with this id
    Remove(HotelId),
    /// Re-fetch hotels and re-run the join with the latest categories
    Refresh,
}

/// Latest state of the materialized view
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    /// Nothing fetched yet
    Loading,
    /// Joined collection with local changes folded in
    Ready(Arc<Vec<Hotel>>),
    /// The last fetch failed
    Failed(ClientError),
}

impl CatalogState {
    fn settled(&self) -> Option<std::result::Result<Arc<Vec<Hotel>>, ClientError>> {
        match self {
            CatalogState::Loading => None,
            CatalogState::Ready(items) => Some(Ok(items.clone())),
            CatalogState::Failed(err) => Some(Err(err.clone())),
        }
    }
}

/// Handle on the shared view
///
/// The first [`next`](Self::next) yields the current value when one is
/// already available (replay-one); later calls wait for the next change.
pub struct CatalogSubscription {
    rx: watch::Receiver<CatalogState>,
    primed: bool,
}

impl CatalogSubscription {
    /// Current state without waiting
    pub fn current(&self) -> CatalogState {
        self.rx.borrow().clone()
    }

    /// Wait for the next settled collection. `None` once the catalogue is gone.
    pub async fn next(&mut self) -> Option<std::result::Result<Arc<Vec<Hotel>>, ClientError>> {
        if !self.primed {
            self.primed = true;
            let state = self.rx.borrow_and_update().clone();
            if let Some(settled) = state.settled() {
                return Some(settled);
            }
        }

        loop {
            self.rx.changed().await.ok()?;
            let state = self.rx.borrow_and_update().clone();
            if let Some(settled) = state.settled() {
                return Some(settled);
            }
        }
    }
}

/// Fold task inputs, held until the first subscriber shows up
struct Dormant {
    inbox: mpsc::UnboundedReceiver<CatalogEvent>,
    state_tx: watch::Sender<CatalogState>,
}

/// Hotel catalogue with client-side reconciliation
///
/// The backend is not touched until the first [`subscribe`](Self::subscribe);
/// from then on one fetch feeds every subscriber. Events published before
/// that are queued and folded once the fetch lands.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = HotelCatalog::new(backend, CatalogConfig::default());
///
/// let mut list = catalog.subscribe();
/// let hotels = list.next().await.unwrap()?;
///
/// catalog.publish(CatalogEvent::Upsert(saved))?;
/// let hotels = list.next().await.unwrap()?;
/// ```
pub struct HotelCatalog {
    backend: Arc<dyn HotelBackend>,
    config: CatalogConfig,
    events: mpsc::UnboundedSender<CatalogEvent>,
    state_rx: watch::Receiver<CatalogState>,
    dormant: Mutex<Option<Dormant>>,
}

impl HotelCatalog {
    /// Create a catalogue over the given backend
    pub fn new(backend: Arc<dyn HotelBackend>, config: CatalogConfig) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(CatalogState::Loading);

        Self {
            backend,
            config,
            events,
            state_rx,
            dormant: Mutex::new(Some(Dormant { inbox, state_tx })),
        }
    }

    /// Get the catalogue configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Subscribe to the materialized view.
    ///
    /// The first call starts the fold task and must happen inside a Tokio
    /// runtime.
    pub fn subscribe(&self) -> CatalogSubscription {
        self.start();
        CatalogSubscription {
            rx: self.state_rx.clone(),
            primed: false,
        }
    }

    /// Wait for the current collection
    pub async fn get_all(&self) -> Result<Arc<Vec<Hotel>>> {
        match self.subscribe().next().await {
            Some(result) => Ok(result?),
            None => Err(SdkError::CatalogClosed),
        }
    }

    /// Inject an event into the fold without any backend call
    pub fn publish(&self, event: CatalogEvent) -> Result<()> {
        self.events.send(event).map_err(|_| SdkError::CatalogClosed)
    }

    /// Re-fetch the hotel collection
    pub fn refresh(&self) -> Result<()> {
        self.publish(CatalogEvent::Refresh)
    }

    fn start(&self) {
        let dormant = self
            .dormant
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if let Some(Dormant { inbox, state_tx }) = dormant {
            info!("Starting hotel catalog");
            tokio::spawn(run_fold(
                self.backend.clone(),
                self.config.clone(),
                inbox,
                state_tx,
            ));
        }
    }
}

async fn run_fold(
    backend: Arc<dyn HotelBackend>,
    config: CatalogConfig,
    mut inbox: mpsc::UnboundedReceiver<CatalogEvent>,
    state_tx: watch::Sender<CatalogState>,
) {
    let mut reconciler = Reconciler::new();
    let mut categories: Option<Vec<Category>> = None;

    load(
        &*backend,
        &config,
        &mut categories,
        &mut reconciler,
        &state_tx,
    )
    .await;

    while let Some(event) = inbox.recv().await {
        match event {
            CatalogEvent::Upsert(hotel) => {
                debug!(hotel_id = hotel.id, "Folding local change");
                reconciler.apply(hotel);
            }
            CatalogEvent::Remove(id) => {
                debug!(hotel_id = id, "Folding local removal");
                reconciler.remove(id);
            }
            CatalogEvent::Refresh => {
                load(
                    &*backend,
                    &config,
                    &mut categories,
                    &mut reconciler,
                    &state_tx,
                )
                .await;
                continue;
            }
        }

        publish_items(&reconciler, &state_tx);
    }

    debug!("Hotel catalog event channel closed, fold task stopping");
}

/// Fetch hotels (and categories, once), join, and re-seed the fold
async fn load(
    backend: &dyn HotelBackend,
    config: &CatalogConfig,
    categories: &mut Option<Vec<Category>>,
    reconciler: &mut Reconciler,
    state_tx: &watch::Sender<CatalogState>,
) {
    match fetch_joined(backend, config, categories).await {
        Ok(joined) => {
            info!(count = joined.len(), "Hotel catalog loaded");
            reconciler.seed(joined);
            publish_items(reconciler, state_tx);
        }
        Err(err) => {
            warn!(error = %err, "Hotel catalog fetch failed");
            state_tx.send_replace(CatalogState::Failed(err));
        }
    }
}

async fn fetch_joined(
    backend: &dyn HotelBackend,
    config: &CatalogConfig,
    categories: &mut Option<Vec<Category>>,
) -> std::result::Result<Vec<Hotel>, ClientError> {
    let hotels = if categories.is_some() {
        backend.fetch_hotels().await?
    } else {
        let (hotels, fetched) =
            tokio::try_join!(backend.fetch_hotels(), backend.fetch_categories())?;
        *categories = Some(fetched);
        hotels
    };

    let categories = categories.as_deref().unwrap_or_default();
    Ok(enrich(&hotels, categories, config.discount_rate))
}

fn publish_items(reconciler: &Reconciler, state_tx: &watch::Sender<CatalogState>) {
    if let Some(items) = reconciler.items() {
        state_tx.send_replace(CatalogState::Ready(Arc::new(items.to_vec())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{init_tracing, FakeBackend};
    use std::sync::atomic::Ordering;

    fn hotel(id: u64, name: &str, price: f64, category_id: Option<u32>) -> Hotel {
        Hotel {
            id,
            hotel_name: name.to_string(),
            price,
            category_id,
            ..Default::default()
        }
    }

    fn catalog(backend: &Arc<FakeBackend>) -> HotelCatalog {
        init_tracing();
        HotelCatalog::new(backend.clone(), CatalogConfig::default())
    }

    #[tokio::test]
    async fn test_join_scenario() {
        let stored = vec![hotel(1, "a", 100.0, Some(0))];
        let backend = Arc::new(FakeBackend::with_hotels(stored));
        let catalog = catalog(&backend);

        let hotels = catalog.get_all().await.unwrap();

        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].id, 1);
        assert!((hotels[0].price - 85.0).abs() < 1e-9);
        assert_eq!(hotels[0].category.as_deref(), Some("Motel"));
    }

    #[tokio::test]
    async fn test_lazy_until_first_subscriber() {
        let backend = Arc::new(FakeBackend::with_hotels(vec![hotel(1, "a", 1.0, None)]));
        let catalog = catalog(&backend);

        tokio::task::yield_now().await;
        assert_eq!(backend.hotel_fetches.load(Ordering::SeqCst), 0);

        catalog.get_all().await.unwrap();
        assert_eq!(backend.hotel_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_fetch_shared_by_subscribers() {
        let backend = Arc::new(FakeBackend::with_hotels(vec![hotel(1, "a", 1.0, None)]));
        let catalog = catalog(&backend);

        let mut first = catalog.subscribe();
        let mut second = catalog.subscribe();
        let a = first.next().await.unwrap().unwrap();
        let b = second.next().await.unwrap().unwrap();

        // Late subscriber gets the replayed value
        let late = catalog.get_all().await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a, late);
        assert_eq!(backend.hotel_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(backend.category_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_local_changes_fold_without_fetch() {
        let backend = Arc::new(FakeBackend::with_hotels(vec![
            hotel(1, "a", 100.0, None),
            hotel(2, "b", 100.0, None),
        ]));
        let catalog = catalog(&backend);
        let mut list = catalog.subscribe();
        list.next().await.unwrap().unwrap();

        catalog
            .publish(CatalogEvent::Upsert(hotel(7, "X", 50.0, None)))
            .unwrap();
        let hotels = list.next().await.unwrap().unwrap();
        let ids: Vec<_> = hotels.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);

        catalog
            .publish(CatalogEvent::Upsert(hotel(7, "X", 60.0, None)))
            .unwrap();
        let hotels = list.next().await.unwrap().unwrap();
        let ids: Vec<_> = hotels.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 2, 7]);
        assert_eq!(hotels[2].price, 60.0);

        catalog.publish(CatalogEvent::Remove(1)).unwrap();
        let hotels = list.next().await.unwrap().unwrap();
        let ids: Vec<_> = hotels.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 7]);

        assert_eq!(backend.hotel_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_events_published_before_subscribe_are_kept() {
        let backend = Arc::new(FakeBackend::with_hotels(vec![hotel(1, "a", 100.0, None)]));
        let catalog = catalog(&backend);

        catalog
            .publish(CatalogEvent::Upsert(hotel(1, "edited", 90.0, None)))
            .unwrap();

        let mut list = catalog.subscribe();
        let mut hotels = list.next().await.unwrap().unwrap();
        // The seed may be published before the queued event is folded
        while hotels[0].hotel_name != "edited" {
            hotels = list.next().await.unwrap().unwrap();
        }

        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].price, 90.0);
    }

    #[tokio::test]
    async fn test_fetch_failure_reaches_subscribers() {
        let backend = Arc::new(FakeBackend::failing(ClientError::Backend {
            status: 503,
            body: "maintenance".to_string(),
        }));
        let catalog = catalog(&backend);

        let err = catalog.get_all().await.unwrap_err();
        assert_eq!(
            err,
            SdkError::Client(ClientError::Backend {
                status: 503,
                body: "maintenance".to_string()
            })
        );
        assert!(matches!(catalog.subscribe().current(), CatalogState::Failed(_)));
    }

    #[tokio::test]
    async fn test_refresh_rejoins_with_cached_categories() {
        let stored = vec![hotel(1, "a", 100.0, Some(2))];
        let backend = Arc::new(FakeBackend::with_hotels(stored));
        let catalog = catalog(&backend);
        let mut list = catalog.subscribe();
        list.next().await.unwrap().unwrap();

        backend.insert(hotel(2, "b", 200.0, Some(4)));
        catalog.refresh().unwrap();

        let hotels = list.next().await.unwrap().unwrap();
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[1].category.as_deref(), Some("Bungalow"));
        assert!((hotels[1].price - 170.0).abs() < 1e-9);

        assert_eq!(backend.hotel_fetches.load(Ordering::SeqCst), 2);
        assert_eq!(backend.category_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscription_ends_with_catalog() {
        let backend = Arc::new(FakeBackend::with_hotels(vec![]));
        let catalog = catalog(&backend);
        let mut list = catalog.subscribe();
        list.next().await.unwrap().unwrap();

        drop(catalog);
        assert!(list.next().await.is_none());
    }
}
