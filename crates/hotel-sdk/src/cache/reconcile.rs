//! Fold accumulator for the hotel catalogue

use hotel_client::{Hotel, HotelId};

/// Ordered, id-keyed hotel collection built by folding change events.
///
/// Local changes received before the first seed are held back and applied,
/// in arrival order, once the fetched collection lands.
#[derive(Debug, Default)]
pub struct Reconciler {
    items: Option<Vec<Hotel>>,
    pending: Vec<Change>,
}

#[derive(Debug)]
enum Change {
    Upsert(Hotel),
    Remove(HotelId),
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fetched collection has been seeded
    pub fn is_seeded(&self) -> bool {
        self.items.is_some()
    }

    /// Current materialized collection, `None` until seeded
    pub fn items(&self) -> Option<&[Hotel]> {
        self.items.as_deref()
    }

    /// Replace the base collection with a fresh join result
    pub fn seed(&mut self, hotels: Vec<Hotel>) {
        let mut items = hotels;
        for change in self.pending.drain(..) {
            apply_change(&mut items, change);
        }
        self.items = Some(items);
    }

    /// Fold one hotel: replace in place when the id is known, append otherwise
    pub fn apply(&mut self, hotel: Hotel) {
        self.push(Change::Upsert(hotel));
    }

    /// Evict a hotel by id; unknown ids are ignored
    pub fn remove(&mut self, id: HotelId) {
        self.push(Change::Remove(id));
    }

    fn push(&mut self, change: Change) {
        match self.items.as_mut() {
            Some(items) => apply_change(items, change),
            None => self.pending.push(change),
        }
    }
}

fn apply_change(items: &mut Vec<Hotel>, change: Change) {
    match change {
        Change::Upsert(hotel) => match items.iter().position(|h| h.id == hotel.id) {
            Some(index) => items[index] = hotel,
            None => items.push(hotel),
        },
        Change::Remove(id) => items.retain(|h| h.id != id),
    }
}
