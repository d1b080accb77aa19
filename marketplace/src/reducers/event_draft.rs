//! Organizer create-event form.
//!
//! Editing is local. Only `Submit` produces an effect, and only when the
//! required details are present.

use crate::draft::{
    DraftTicketType, EventDetails, EventSubmission, SubmissionReceipt, SubmissionStatus,
    TicketTypePatch,
};
use crate::gateway::EventPublisher;
use eventhive_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};
use std::sync::Arc;

// ============================================================================
// State
// ============================================================================

/// State of the create-event form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDraft {
    /// Basic info, schedule, location and settings
    pub details: EventDetails,
    /// Ticket types in display order
    pub ticket_types: Vec<DraftTicketType>,
    /// Search tags in insertion order, without duplicates
    pub tags: Vec<String>,
    /// Receipt of the most recent successful save or publish
    pub last_receipt: Option<SubmissionReceipt>,
    /// Why the most recent submit failed
    pub last_error: Option<String>,
}

impl EventDraft {
    /// A blank draft with a single free general admission ticket type
    #[must_use]
    pub fn new() -> Self {
        Self {
            details: EventDetails::new(),
            ticket_types: vec![DraftTicketType::general_admission()],
            tags: Vec::new(),
            last_receipt: None,
            last_error: None,
        }
    }

    /// Looks up a ticket type by id
    #[must_use]
    pub fn ticket_type(&self, id: &str) -> Option<&DraftTicketType> {
        self.ticket_types.iter().find(|t| t.id == id)
    }
}

impl Default for EventDraft {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Inputs to the event draft reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftAction {
    // Commands
    /// Replace the event details
    UpdateDetails(Box<EventDetails>),

    /// Append a blank ticket type
    AddTicketType,

    /// Remove a ticket type; the last remaining one is kept
    RemoveTicketType {
        /// Ticket type to remove
        id: String,
    },

    /// Change some fields of a ticket type
    UpdateTicketType {
        /// Ticket type to change
        id: String,
        /// Fields to overwrite
        patch: TicketTypePatch,
    },

    /// Add a search tag
    AddTag {
        /// Tag text; surrounding whitespace is dropped
        tag: String,
    },

    /// Remove a search tag
    RemoveTag {
        /// Tag to remove
        tag: String,
    },

    /// Save as draft (`publish == false`) or publish
    Submit {
        /// Publish instead of saving privately
        publish: bool,
    },

    // Events
    /// Submit was refused before reaching the publisher
    ValidationFailed {
        /// What was wrong
        error: String,
    },

    /// The publisher accepted the submission
    Submitted {
        /// Publisher receipt
        receipt: SubmissionReceipt,
    },

    /// The publisher refused the submission
    SubmissionRejected {
        /// Reason reported by the publisher
        reason: String,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// Dependencies of the event draft reducer
#[derive(Clone)]
pub struct DraftEnvironment {
    /// Submission timestamps
    pub clock: Arc<dyn Clock>,
    /// Ids for new ticket types
    pub ids: Arc<dyn IdGenerator>,
    /// Where submissions are sent
    pub publisher: Arc<dyn EventPublisher>,
}

impl DraftEnvironment {
    /// Creates a new `DraftEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            clock,
            ids,
            publisher,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the create-event form
#[derive(Clone, Copy, Debug, Default)]
pub struct DraftReducer;

impl DraftReducer {
    /// Creates a new `DraftReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an outcome to state
    fn apply_event(state: &mut EventDraft, action: &DraftAction) {
        match action {
            DraftAction::ValidationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            DraftAction::Submitted { receipt } => {
                state.last_error = None;
                state.last_receipt = Some(receipt.clone());
            },
            DraftAction::SubmissionRejected { reason } => {
                state.last_error = Some(reason.clone());
            },
            _ => {},
        }
    }
}

impl Reducer for DraftReducer {
    type State = EventDraft;
    type Action = DraftAction;
    type Environment = DraftEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            DraftAction::UpdateDetails(details) => {
                state.details = *details;
                SmallVec::new()
            },

            DraftAction::AddTicketType => {
                let id = env.ids.next_id();
                tracing::debug!(%id, "Ticket type added");
                state.ticket_types.push(DraftTicketType::blank(id));
                SmallVec::new()
            },

            DraftAction::RemoveTicketType { id } => {
                if state.ticket_types.len() <= 1 {
                    tracing::debug!(%id, "Ignoring removal of the last ticket type");
                } else {
                    state.ticket_types.retain(|t| t.id != id);
                }
                SmallVec::new()
            },

            DraftAction::UpdateTicketType { id, patch } => {
                match state.ticket_types.iter_mut().find(|t| t.id == id) {
                    Some(ticket) => ticket.apply(patch),
                    None => tracing::debug!(%id, "Ignoring update for unknown ticket type"),
                }
                SmallVec::new()
            },

            DraftAction::AddTag { tag } => {
                let tag = tag.trim();
                if !tag.is_empty() && !state.tags.iter().any(|t| t == tag) {
                    state.tags.push(tag.to_string());
                }
                SmallVec::new()
            },

            DraftAction::RemoveTag { tag } => {
                state.tags.retain(|t| *t != tag);
                SmallVec::new()
            },

            DraftAction::Submit { publish } => {
                if let Err(error) = state.details.validate() {
                    Self::apply_event(
                        state,
                        &DraftAction::ValidationFailed {
                            error: error.to_string(),
                        },
                    );
                    return SmallVec::new();
                }

                state.last_error = None;
                let submission = EventSubmission {
                    details: state.details.clone(),
                    ticket_types: state.ticket_types.clone(),
                    tags: state.tags.clone(),
                    status: SubmissionStatus::from_publish(publish),
                    submitted_at: env.clock.now(),
                };
                let publisher = Arc::clone(&env.publisher);

                smallvec![Effect::task(move || {
                    Some(match publisher.save_event(&submission) {
                        Ok(receipt) => DraftAction::Submitted { receipt },
                        Err(error) => DraftAction::SubmissionRejected {
                            reason: error.to_string(),
                        },
                    })
                })]
            },

            // ========== Events ==========
            event @ (DraftAction::ValidationFailed { .. }
            | DraftAction::Submitted { .. }
            | DraftAction::SubmissionRejected { .. }) => {
                Self::apply_event(state, &event);
                SmallVec::new()
            },
        }
    }
}
