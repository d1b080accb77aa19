//! Bundled sample data.
//!
//! The marketplace has no backend, so the festival catalog and the listing
//! ship inside the binary. Configuration can point at replacement files.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::CatalogError;
use crate::listing::EventListing;
use crate::types::EventId;

const FESTIVAL_TIERS_JSON: &str = include_str!("../fixtures/festival_tiers.json");
const EVENTS_JSON: &str = include_str!("../fixtures/events.json");

/// Listing id of the event the bundled catalog belongs to
pub const FESTIVAL_EVENT_ID: &str = "1";

/// Id of the bundled festival event
#[must_use]
pub fn festival_event_id() -> EventId {
    EventId::new(FESTIVAL_EVENT_ID)
}

/// The bundled three-tier festival catalog
///
/// # Errors
///
/// Returns [`CatalogError`] if the bundled JSON is invalid.
pub fn festival_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json(FESTIVAL_TIERS_JSON)
}

/// The bundled six-event listing
///
/// # Errors
///
/// Returns [`CatalogError`] if the bundled JSON is invalid.
pub fn event_listing() -> Result<EventListing, CatalogError> {
    EventListing::from_json(EVENTS_JSON)
}

/// The catalog file named by `config`, or the bundled one
///
/// # Errors
///
/// Returns [`CatalogError`] if the chosen source cannot be read or parsed.
pub fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => festival_catalog(),
    }
}

/// The listing file named by `config`, or the bundled one
///
/// # Errors
///
/// Returns [`CatalogError`] if the chosen source cannot be read or parsed.
pub fn load_listing(config: &Config) -> Result<EventListing, CatalogError> {
    match &config.events_path {
        Some(path) => EventListing::load(path),
        None => event_listing(),
    }
}
