//! Ticket selection for a single event page.
//!
//! Wraps [`SelectionState`] and the order calculator in a reducer so the
//! booking sidebar is driven by actions. Quantity changes are pure state
//! updates. Checkout is the only action that reaches outside, through the
//! injected [`BookingGateway`].

use crate::booking::{AttendeeDetails, BookingReceipt, BookingRequest};
use crate::catalog::Catalog;
use crate::gateway::BookingGateway;
use crate::order::{self, LineItem, OrderTotals};
use crate::selection::SelectionState;
use crate::types::{EventId, Money, TierId};
use eventhive_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

// ============================================================================
// State
// ============================================================================

/// Booking sidebar state for one event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketSelection {
    /// Event whose tiers are on offer
    pub event_id: EventId,
    /// Tiers on offer
    pub catalog: Catalog,
    /// Visitor's current choice
    pub selection: SelectionState,
    /// Receipt of the most recent successful checkout
    pub last_receipt: Option<BookingReceipt>,
    /// Why the most recent checkout failed
    pub last_error: Option<String>,
}

impl TicketSelection {
    /// Fresh state with nothing selected
    #[must_use]
    pub const fn new(event_id: EventId, catalog: Catalog) -> Self {
        Self {
            event_id,
            catalog,
            selection: SelectionState::new(),
            last_receipt: None,
            last_error: None,
        }
    }

    /// Quantity currently requested for a tier
    #[must_use]
    pub fn quantity_of(&self, tier_id: &str) -> u32 {
        self.selection.quantity(tier_id)
    }

    /// Tickets selected across all tiers
    #[must_use]
    pub fn total_ticket_count(&self) -> u64 {
        order::total_ticket_count(&self.selection)
    }

    /// Price of the current selection
    #[must_use]
    pub fn total_price(&self) -> Money {
        order::total_price(&self.catalog, &self.selection)
    }

    /// Whether checkout is enabled
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        order::can_checkout(&self.selection)
    }

    /// All sidebar totals at once
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.catalog, &self.selection)
    }

    /// Booking summary rows
    #[must_use]
    pub fn summary(&self) -> Vec<LineItem> {
        order::booking_summary(&self.catalog, &self.selection)
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Inputs to the ticket selection reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    // Commands
    /// Set a tier's quantity; clamped to `[0, available]`
    SetQuantity {
        /// Tier to change
        tier_id: TierId,
        /// Requested quantity, possibly out of range
        requested: i64,
    },

    /// Book the current selection
    Checkout {
        /// Buyer contact details
        attendee: AttendeeDetails,
    },

    /// Visitor navigated away; selection is discarded
    Leave,

    // Gateway results
    /// The gateway accepted the booking
    BookingConfirmed {
        /// Gateway receipt
        receipt: BookingReceipt,
    },

    /// The gateway refused the booking
    BookingRejected {
        /// Reason reported by the gateway
        reason: String,
    },
}

impl SelectionAction {
    /// Shorthand for [`SelectionAction::SetQuantity`]
    #[must_use]
    pub fn set_quantity(tier_id: impl Into<String>, requested: i64) -> Self {
        Self::SetQuantity {
            tier_id: TierId::new(tier_id),
            requested,
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Dependencies of the ticket selection reducer
#[derive(Clone)]
pub struct SelectionEnvironment {
    /// Timestamps for booking requests
    pub clock: Arc<dyn Clock>,
    /// Where checkouts are sent
    pub gateway: Arc<dyn BookingGateway>,
}

impl SelectionEnvironment {
    /// Creates a new `SelectionEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, gateway: Arc<dyn BookingGateway>) -> Self {
        Self { clock, gateway }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the booking sidebar
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionReducer;

impl SelectionReducer {
    /// Creates a new `SelectionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn booking_request(
        state: &TicketSelection,
        attendee: AttendeeDetails,
        env: &SelectionEnvironment,
    ) -> BookingRequest {
        let totals = state.totals();
        BookingRequest {
            event_id: state.event_id.clone(),
            lines: state.summary(),
            ticket_count: totals.ticket_count,
            total: totals.price,
            attendee,
            requested_at: env.clock.now(),
        }
    }
}

impl Reducer for SelectionReducer {
    type State = TicketSelection;
    type Action = SelectionAction;
    type Environment = SelectionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            SelectionAction::SetQuantity { tier_id, requested } => {
                match state
                    .selection
                    .set_quantity(&state.catalog, tier_id.as_str(), requested)
                {
                    Some(stored) => tracing::debug!(
                        tier = %tier_id,
                        requested,
                        stored,
                        "Quantity updated"
                    ),
                    None => tracing::debug!(tier = %tier_id, "Ignoring unknown tier"),
                }
                SmallVec::new()
            },

            SelectionAction::Checkout { attendee } => {
                if !state.can_checkout() {
                    tracing::debug!(event_id = %state.event_id, "Checkout ignored, nothing selected");
                    return SmallVec::new();
                }

                state.last_error = None;
                let request = Self::booking_request(state, attendee, env);
                let gateway = Arc::clone(&env.gateway);

                smallvec![Effect::task(move || {
                    Some(match gateway.submit_booking(&request) {
                        Ok(receipt) => SelectionAction::BookingConfirmed { receipt },
                        Err(error) => SelectionAction::BookingRejected {
                            reason: error.to_string(),
                        },
                    })
                })]
            },

            SelectionAction::Leave => {
                state.selection.clear();
                state.last_receipt = None;
                state.last_error = None;
                SmallVec::new()
            },

            // ========== Gateway results ==========
            SelectionAction::BookingConfirmed { receipt } => {
                tracing::debug!(reference = %receipt.reference, "Booking confirmed");
                state.selection.clear();
                state.last_error = None;
                state.last_receipt = Some(receipt);
                SmallVec::new()
            },

            SelectionAction::BookingRejected { reason } => {
                tracing::warn!(event_id = %state.event_id, %reason, "Booking rejected");
                state.last_error = Some(reason);
                SmallVec::new()
            },
        }
    }
}
