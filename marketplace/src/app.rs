//! Application coordinator: wires configuration, data and collaborators.
//!
//! One [`Marketplace`] serves many visitors. Each event page and each
//! create-event form gets its own [`Store`], owned by whoever opened it.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::AppError;
use crate::fixtures;
use crate::gateway::{BookingGateway, EventPublisher, LoggingGateway};
use crate::listing::{EventFilter, EventListing, EventSummary};
use crate::reducers::{
    DraftAction, DraftEnvironment, DraftReducer, EventDraft, SelectionAction, SelectionEnvironment,
    SelectionReducer, TicketSelection,
};
use crate::types::EventId;
use eventhive_core::environment::{Clock, IdGenerator, SystemClock};
use eventhive_runtime::Store;
use std::sync::Arc;
use uuid::Uuid;

/// Store driving one event page's booking sidebar
pub type SelectionStore =
    Store<TicketSelection, SelectionAction, SelectionEnvironment, SelectionReducer>;

/// Store driving one create-event form
pub type DraftStore = Store<EventDraft, DraftAction, DraftEnvironment, DraftReducer>;

/// Random v4 UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Collaborators injected into every store the marketplace opens
#[derive(Clone)]
pub struct Services {
    /// Time source
    pub clock: Arc<dyn Clock>,
    /// Identifier source
    pub ids: Arc<dyn IdGenerator>,
    /// Checkout backend
    pub bookings: Arc<dyn BookingGateway>,
    /// Event publishing backend
    pub publisher: Arc<dyn EventPublisher>,
}

impl Services {
    /// System clock, UUIDs and the logging gateway
    #[must_use]
    pub fn logging() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
            bookings: LoggingGateway::shared_booking(),
            publisher: LoggingGateway::shared_publisher(),
        }
    }
}

/// Main marketplace application
pub struct Marketplace {
    config: Config,
    listing: EventListing,
    catalog: Catalog,
    services: Services,
}

impl Marketplace {
    /// Validates configuration and loads catalog and listing data
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the configuration is unusable or the data
    /// cannot be loaded.
    pub fn new(config: Config, services: Services) -> Result<Self, AppError> {
        config.validate()?;

        let listing = fixtures::load_listing(&config)?;
        let catalog = fixtures::load_catalog(&config)?;
        tracing::info!(
            events = listing.len(),
            tiers = catalog.len(),
            "Marketplace initialized"
        );

        Ok(Self {
            config,
            listing,
            catalog,
            services,
        })
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Every listed event
    #[must_use]
    pub const fn listing(&self) -> &EventListing {
        &self.listing
    }

    /// Ticket tiers offered on event pages
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Events matching `filter`, in listing order
    #[must_use]
    pub fn browse(&self, filter: &EventFilter) -> Vec<&EventSummary> {
        self.listing.filter(filter)
    }

    /// Opens a booking sidebar for a listed event
    ///
    /// Every event page offers the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownEvent`] if the listing has no such event.
    pub fn open_event(&self, event_id: &str) -> Result<SelectionStore, AppError> {
        let Some(event) = self.listing.get(event_id) else {
            return Err(AppError::UnknownEvent(EventId::new(event_id)));
        };
        tracing::debug!(event_id = %event.id, title = %event.title, "Opening event page");

        let environment = SelectionEnvironment::new(
            Arc::clone(&self.services.clock),
            Arc::clone(&self.services.bookings),
        );
        Ok(Store::with_config(
            TicketSelection::new(event.id.clone(), self.catalog.clone()),
            SelectionReducer::new(),
            environment,
            self.config.store_config(),
        ))
    }

    /// Opens a blank create-event form
    #[must_use]
    pub fn new_draft(&self) -> DraftStore {
        let environment = DraftEnvironment::new(
            Arc::clone(&self.services.clock),
            Arc::clone(&self.services.ids),
            Arc::clone(&self.services.publisher),
        );
        Store::with_config(
            EventDraft::new(),
            DraftReducer::new(),
            environment,
            self.config.store_config(),
        )
    }
}
