//! Reducers driving the marketplace screens.
//!
//! - [`ticket_selection`]: the booking sidebar of an event page
//! - [`event_draft`]: the organizer's create-event form

pub mod event_draft;
pub mod ticket_selection;

pub use event_draft::{DraftAction, DraftEnvironment, DraftReducer, EventDraft};
pub use ticket_selection::{SelectionAction, SelectionEnvironment, SelectionReducer, TicketSelection};
