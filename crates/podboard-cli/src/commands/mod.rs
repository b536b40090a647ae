pub mod check;
pub mod insights;
pub mod pods;
pub mod shell;

use std::path::Path;

use podboard_core::BookingStore;

/// Load a booking list from a JSON file, or start empty when no file is
/// given.
pub fn load_store(path: Option<&Path>) -> Result<BookingStore, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(BookingStore::load_json(path)?),
        None => Ok(BookingStore::new()),
    }
}
