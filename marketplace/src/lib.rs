//! EventHive marketplace - ticket selection and order totals for event pages
//!
//! Visitors browse a listing of events, open one, pick quantities across its
//! ticket tiers and check out. Organizers fill in a create-event form and save
//! or publish it. Both flows run as reducers on the `eventhive-runtime` store.
//!
//! # Architecture
//!
//! ```text
//!  fixtures / override files
//!            │
//!            ▼
//!  ┌──────────────┐   browse    ┌──────────────┐
//!  │ EventListing │ ──────────► │ EventFilter  │
//!  └──────────────┘             └──────────────┘
//!            │ open_event
//!            ▼
//!  ┌──────────────────┐  SetQuantity  ┌────────────────┐
//!  │ SelectionReducer │ ────────────► │ SelectionState │ ──► order totals
//!  └──────────────────┘               └────────────────┘
//!            │ Checkout
//!            ▼
//!  ┌──────────────────┐
//!  │  BookingGateway  │  (logging stand-in, no backend)
//!  └──────────────────┘
//! ```
//!
//! # Quantity rules
//!
//! Every change goes through one operation that clamps the request into
//! `[0, available]` and ignores unknown tiers:
//!
//! ```
//! use eventhive::catalog::{Catalog, TicketTier};
//! use eventhive::order;
//! use eventhive::selection::SelectionState;
//! use eventhive::Money;
//!
//! let catalog = Catalog::new(vec![
//!     TicketTier::new("vip", "VIP Experience", 5000, 200),
//!     TicketTier::new("early-bird", "Early Bird Special", 1999, 50),
//! ])?;
//!
//! let mut selection = SelectionState::new();
//! selection.set_quantity(&catalog, "vip", 2);
//! selection.set_quantity(&catalog, "early-bird", 999);
//!
//! assert_eq!(order::total_ticket_count(&selection), 52);
//! assert_eq!(order::total_price(&catalog, &selection), Money::new(109_950));
//! # Ok::<(), eventhive::error::CatalogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod listing;
pub mod order;
pub mod reducers;
pub mod selection;
pub mod types;

pub use app::{DraftStore, Marketplace, SelectionStore, Services};
pub use catalog::{Catalog, TicketTier};
pub use config::Config;
pub use order::OrderTotals;
pub use reducers::{DraftAction, DraftReducer, EventDraft, SelectionAction, SelectionReducer, TicketSelection};
pub use selection::SelectionState;
pub use types::*;
