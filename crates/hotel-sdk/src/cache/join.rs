//! Hotel × category join

use hotel_client::{Category, Hotel};
use std::collections::HashMap;

/// Enrich hotels with their category name and the discounted price.
///
/// The category lookup is a left join: a hotel whose category id is missing
/// or unknown keeps `category: None`.
pub fn enrich(hotels: &[Hotel], categories: &[Category], discount_rate: f64) -> Vec<Hotel> {
    let names: HashMap<_, _> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();
    let factor = 1.0 - discount_rate;

    hotels
        .iter()
        .map(|hotel| Hotel {
            price: hotel.price * factor,
            category: hotel
                .category_id
                .and_then(|id| names.get(&id))
                .map(|name| name.to_string()),
            ..hotel.clone()
        })
        .collect()
}
