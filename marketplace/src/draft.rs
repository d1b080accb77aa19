//! Organizer event drafts: the data behind the create-event form.

use crate::error::ValidationError;
use crate::listing::Category;
use crate::types::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Basic information, schedule, location and settings of a draft event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event title (required)
    pub title: String,
    /// Long description
    pub description: String,
    /// Listing category (required)
    pub category: Option<Category>,
    /// Start date (required)
    pub date: Option<NaiveDate>,
    /// Start time as displayed, e.g. "6:00 PM"
    pub time: String,
    /// Last day, for multi-day events
    pub end_date: Option<NaiveDate>,
    /// End time as displayed
    pub end_time: String,
    /// Venue name
    pub venue: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Capacity cap, if any
    pub max_attendees: Option<u32>,
    /// Listed publicly
    pub is_public: bool,
    /// Accept waitlist sign-ups once sold out
    pub allow_waitlist: bool,
    /// Organizer approves each registration
    pub require_approval: bool,
}

impl EventDetails {
    /// Details for a new public event with nothing filled in
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_public: true,
            ..Self::default()
        }
    }

    /// Checks the fields an event cannot be saved without
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingInformation`] naming every missing
    /// field among title, category and date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.date.is_none() {
            missing.push("date");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingInformation(missing))
        }
    }
}

/// A ticket type being configured on a draft
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTicketType {
    /// Draft-local identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price; zero means free
    pub price: Money,
    /// Tickets on sale
    pub quantity: u32,
    /// Short description
    pub description: String,
    /// First day of sales
    pub sale_start: Option<NaiveDate>,
    /// Last day of sales
    pub sale_end: Option<NaiveDate>,
}

impl DraftTicketType {
    /// Identifier of the ticket type every new draft starts with
    pub const DEFAULT_ID: &'static str = "default";

    /// A blank ticket type as added by the "Add Ticket Type" button
    #[must_use]
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            price: Money::ZERO,
            quantity: 50,
            description: String::new(),
            sale_start: None,
            sale_end: None,
        }
    }

    /// The free general admission type every new draft starts with
    #[must_use]
    pub fn general_admission() -> Self {
        Self {
            name: "General Admission".to_string(),
            quantity: 100,
            description: "Standard entry ticket".to_string(),
            ..Self::blank(Self::DEFAULT_ID)
        }
    }

    /// Applies the fields present in a patch
    pub fn apply(&mut self, patch: TicketTypePatch) {
        let TicketTypePatch {
            name,
            price,
            quantity,
            description,
            sale_start,
            sale_end,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if sale_start.is_some() {
            self.sale_start = sale_start;
        }
        if sale_end.is_some() {
            self.sale_end = sale_end;
        }
    }
}

/// Partial update to a [`DraftTicketType`]; `None` leaves a field unchanged
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypePatch {
    /// New name
    pub name: Option<String>,
    /// New price
    pub price: Option<Money>,
    /// New quantity
    pub quantity: Option<u32>,
    /// New description
    pub description: Option<String>,
    /// New first day of sales
    pub sale_start: Option<NaiveDate>,
    /// New last day of sales
    pub sale_end: Option<NaiveDate>,
}

/// Whether a submission is saved privately or goes live
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Saved for later editing
    Draft,
    /// Listed on the marketplace
    Published,
}

impl SubmissionStatus {
    /// Status for the button that was pressed
    #[must_use]
    pub const fn from_publish(publish: bool) -> Self {
        if publish { Self::Published } else { Self::Draft }
    }
}

/// A validated draft handed to the [`EventPublisher`](crate::gateway::EventPublisher)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubmission {
    /// Event details
    pub details: EventDetails,
    /// Configured ticket types
    pub ticket_types: Vec<DraftTicketType>,
    /// Search tags
    pub tags: Vec<String>,
    /// Draft or published
    pub status: SubmissionStatus,
    /// When the organizer pressed save or publish
    pub submitted_at: DateTime<Utc>,
}

/// Publisher acknowledgement of a submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Publisher-assigned reference
    pub reference: String,
    /// Title as submitted
    pub title: String,
    /// Draft or published
    pub status: SubmissionStatus,
}
