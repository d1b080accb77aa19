//! Booking dialog data: who is buying, and what gets handed to the gateway.

use crate::error::ValidationError;
use crate::order::LineItem;
use crate::types::{EventId, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details entered in the booking dialog
///
/// Deserialization goes through [`AttendeeDetails::new`], so decoded values
/// are held to the same checks as typed input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttendeeInput")]
pub struct AttendeeDetails {
    full_name: String,
    email: String,
    phone: String,
}

/// Unchecked attendee fields as they arrive in serialized form
#[derive(Deserialize)]
struct AttendeeInput {
    full_name: String,
    email: String,
    phone: String,
}

impl TryFrom<AttendeeInput> for AttendeeDetails {
    type Error = ValidationError;

    fn try_from(input: AttendeeInput) -> Result<Self, Self::Error> {
        Self::new(input.full_name, input.email, input.phone)
    }
}

impl AttendeeDetails {
    /// Validates and normalizes attendee input
    ///
    /// Name and email are trimmed. The phone number keeps its formatting but
    /// must contain between 7 and 15 digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank name, an email that is not
    /// `local@domain`, or an implausible phone number.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.into().trim().to_string();
        let email = email.into().trim().to_string();
        let phone = phone.into().trim().to_string();

        if full_name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let mut parts = email.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed {
            return Err(ValidationError::InvalidEmail(email));
        }

        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if !(7..=15).contains(&digits) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self {
            full_name,
            email,
            phone,
        })
    }

    /// Attendee's full name
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Attendee's email address
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attendee's phone number as entered
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// A checkout handed to the [`BookingGateway`](crate::gateway::BookingGateway)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Event being booked
    pub event_id: EventId,
    /// Selected tiers with subtotals
    pub lines: Vec<LineItem>,
    /// Tickets across all lines
    pub ticket_count: u64,
    /// Amount due
    pub total: Money,
    /// Buyer
    pub attendee: AttendeeDetails,
    /// When checkout was pressed
    pub requested_at: DateTime<Utc>,
}

/// Gateway acknowledgement of a booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Gateway-assigned booking reference
    pub reference: String,
    /// Event booked
    pub event_id: EventId,
    /// Tickets booked
    pub ticket_count: u64,
    /// Amount charged
    pub total: Money,
    /// When the booking was accepted
    pub confirmed_at: DateTime<Utc>,
}
