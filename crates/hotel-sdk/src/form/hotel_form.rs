//! Hotel edit form

use super::control::FormControl;
use super::validators::{integer_pattern, Validator};
use crate::validation::FormSnapshot;
use hotel_client::Hotel;

pub const HOTEL_NAME: &str = "hotelName";
pub const PRICE: &str = "price";
pub const RATING: &str = "rating";
pub const DESCRIPTION: &str = "description";

/// Form backing the hotel edit screen
#[derive(Debug, Clone)]
pub struct HotelForm {
    hotel_name: FormControl,
    price: FormControl,
    rating: FormControl,
    description: FormControl,
    tags: Vec<String>,
    tags_dirty: bool,
}

impl Default for HotelForm {
    fn default() -> Self {
        Self::new()
    }
}

impl HotelForm {
    pub fn new() -> Self {
        Self {
            hotel_name: FormControl::new(vec![Validator::Required, Validator::MinLength(4)]),
            price: FormControl::new(vec![
                Validator::Required,
                Validator::Pattern(integer_pattern().clone()),
            ]),
            rating: FormControl::new(vec![Validator::Range { min: 1.0, max: 5.0 }]),
            description: FormControl::new(Vec::new()),
            tags: Vec::new(),
            tags_dirty: false,
        }
    }

    pub fn control(&self, field: &str) -> Option<&FormControl> {
        match field {
            HOTEL_NAME => Some(&self.hotel_name),
            PRICE => Some(&self.price),
            RATING => Some(&self.rating),
            DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }

    fn control_mut(&mut self, field: &str) -> Option<&mut FormControl> {
        match field {
            HOTEL_NAME => Some(&mut self.hotel_name),
            PRICE => Some(&mut self.price),
            RATING => Some(&mut self.rating),
            DESCRIPTION => Some(&mut self.description),
            _ => None,
        }
    }

    /// User edit of a field. Returns `false` for an unknown field.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.control_mut(field) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Field lost focus. Returns `false` for an unknown field.
    pub fn blur(&mut self, field: &str) -> bool {
        match self.control_mut(field) {
            Some(control) => {
                control.mark_touched();
                true
            }
            None => false,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Append an empty tag
    pub fn add_tag(&mut self) {
        self.tags.push(String::new());
    }

    /// Edit a tag. Returns `false` when out of range.
    pub fn set_tag(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.tags.get_mut(index) {
            Some(tag) => {
                *tag = value.into();
                self.tags_dirty = true;
                true
            }
            None => false,
        }
    }

    /// Remove a tag and mark the tag list dirty. Returns `false` when out of range.
    pub fn delete_tag(&mut self, index: usize) -> bool {
        if index >= self.tags.len() {
            return false;
        }
        self.tags.remove(index);
        self.tags_dirty = true;
        true
    }

    /// Load a hotel into the form without marking anything dirty
    pub fn patch_from(&mut self, hotel: &Hotel) {
        self.hotel_name.patch(hotel.hotel_name.as_str());
        self.price.patch(hotel.price.to_string());
        self.rating.patch(hotel.rating.to_string());
        self.description.patch(hotel.description.as_str());
        self.tags = hotel.tags.clone();
        self.tags_dirty = false;
    }

    /// Overlay the form values on `base`
    pub fn merge_into(&self, base: &Hotel) -> Hotel {
        Hotel {
            hotel_name: self.hotel_name.value().to_string(),
            price: self.price.value().trim().parse().unwrap_or_default(),
            rating: self
                .rating
                .value()
                .trim()
                .parse::<f64>()
                .map(|r| r.round().clamp(0.0, u8::MAX as f64) as u8)
                .unwrap_or_default(),
            description: self.description.value().to_string(),
            tags: self.tags.clone(),
            ..base.clone()
        }
    }

    /// Validity of every validated control
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new()
            .with_field(HOTEL_NAME, self.hotel_name.state())
            .with_field(PRICE, self.price.state())
            .with_field(RATING, self.rating.state())
            .with_field(DESCRIPTION, self.description.state())
    }

    pub fn is_valid(&self) -> bool {
        self.hotel_name.is_valid()
            && self.price.is_valid()
            && self.rating.is_valid()
            && self.description.is_valid()
    }

    pub fn is_dirty(&self) -> bool {
        self.tags_dirty
            || self.hotel_name.is_dirty()
            || self.price.is_dirty()
            || self.rating.is_dirty()
            || self.description.is_dirty()
    }

    /// Clear every value and flag
    pub fn reset(&mut self) {
        self.hotel_name.reset();
        self.price.reset();
        self.rating.reset();
        self.description.reset();
        self.tags.clear();
        self.tags_dirty = false;
    }
}
