//! Hotel edit form model
//!
//! Plain-data controls with the validators of the edit screen. The form
//! produces [`FormSnapshot`](crate::validation::FormSnapshot)s for the error
//! mapper and merges its values back into a [`Hotel`](hotel_client::Hotel).

mod control;
mod hotel_form;
mod validators;

pub use control::FormControl;
pub use hotel_form::{HotelForm, DESCRIPTION, HOTEL_NAME, PRICE, RATING};
pub use validators::{integer_pattern, Validator};
