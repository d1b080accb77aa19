//! Backend collaborators for bookings and event submissions.
//!
//! The marketplace has no backend. Reducers still describe bookings and
//! publications as calls through these traits, so a real service can be
//! dropped in later without touching the business logic. Until then
//! [`LoggingGateway`] records the call in the log and acknowledges it.

use crate::booking::{BookingReceipt, BookingRequest};
use crate::draft::{EventSubmission, SubmissionReceipt};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// Gateway result
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure reported by a collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend declined the request
    #[error("request rejected: {reason}")]
    Rejected {
        /// Reason given by the backend
        reason: String,
    },

    /// The backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Accepts bookings at checkout
pub trait BookingGateway: Send + Sync {
    /// Submit a booking
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the booking is not accepted.
    fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt>;
}

/// Accepts organizer event drafts and publications
pub trait EventPublisher: Send + Sync {
    /// Save or publish an event
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the submission is not accepted.
    fn save_event(&self, submission: &EventSubmission) -> GatewayResult<SubmissionReceipt>;
}

/// Gateway that only logs, accepting everything
///
/// Stands in for the backend in the demo and in development.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingGateway;

impl LoggingGateway {
    /// Creates a new logging gateway
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped booking gateway for sharing
    #[must_use]
    pub fn shared_booking() -> Arc<dyn BookingGateway> {
        Arc::new(Self::new())
    }

    /// Creates an Arc-wrapped event publisher for sharing
    #[must_use]
    pub fn shared_publisher() -> Arc<dyn EventPublisher> {
        Arc::new(Self::new())
    }
}

impl BookingGateway for LoggingGateway {
    fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt> {
        let reference = Uuid::new_v4().to_string();
        tracing::info!(
            %reference,
            event_id = %request.event_id,
            tickets = request.ticket_count,
            total = request.total.amount(),
            attendee = request.attendee.email(),
            "Booking submitted"
        );
        for line in &request.lines {
            tracing::debug!(
                tier = %line.tier_id,
                quantity = line.quantity,
                subtotal = line.subtotal.amount(),
                "Booking line"
            );
        }

        Ok(BookingReceipt {
            reference,
            event_id: request.event_id.clone(),
            ticket_count: request.ticket_count,
            total: request.total,
            confirmed_at: request.requested_at,
        })
    }
}

impl EventPublisher for LoggingGateway {
    fn save_event(&self, submission: &EventSubmission) -> GatewayResult<SubmissionReceipt> {
        let reference = Uuid::new_v4().to_string();
        tracing::info!(
            %reference,
            title = %submission.details.title,
            status = ?submission.status,
            ticket_types = submission.ticket_types.len(),
            tags = ?submission.tags,
            "Event submitted"
        );

        Ok(SubmissionReceipt {
            reference,
            title: submission.details.title.clone(),
            status: submission.status,
        })
    }
}

/// Gateway that keeps every request in memory
///
/// Used by tests to observe what reducers sent, and to simulate a backend
/// that refuses requests.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    bookings: Mutex<Vec<BookingRequest>>,
    submissions: Mutex<Vec<EventSubmission>>,
    rejection: Mutex<Option<String>>,
}

impl RecordingGateway {
    /// Creates a gateway that accepts everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that rejects everything with `reason`
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let gateway = Self::new();
        gateway.reject_with(Some(reason.into()));
        gateway
    }

    /// Switch rejection on (`Some`) or off (`None`)
    pub fn reject_with(&self, reason: Option<String>) {
        *self.rejection.lock().unwrap_or_else(PoisonError::into_inner) = reason;
    }

    /// Bookings received so far, oldest first
    #[must_use]
    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Event submissions received so far, oldest first
    #[must_use]
    pub fn submissions(&self) -> Vec<EventSubmission> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check_rejection(&self) -> GatewayResult<()> {
        match self
            .rejection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(reason) => Err(GatewayError::Rejected {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl BookingGateway for RecordingGateway {
    fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt> {
        let mut bookings = self.bookings.lock().unwrap_or_else(PoisonError::into_inner);
        bookings.push(request.clone());
        self.check_rejection()?;

        Ok(BookingReceipt {
            reference: format!("booking-{}", bookings.len()),
            event_id: request.event_id.clone(),
            ticket_count: request.ticket_count,
            total: request.total,
            confirmed_at: request.requested_at,
        })
    }
}

impl EventPublisher for RecordingGateway {
    fn save_event(&self, submission: &EventSubmission) -> GatewayResult<SubmissionReceipt> {
        let mut submissions = self
            .submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        submissions.push(submission.clone());
        self.check_rejection()?;

        Ok(SubmissionReceipt {
            reference: format!("event-{}", submissions.len()),
            title: submission.details.title.clone(),
            status: submission.status,
        })
    }
}
