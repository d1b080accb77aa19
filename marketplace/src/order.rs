//! Order calculator: totals derived from a catalog and a selection.
//!
//! Every function here is total. Selection entries whose tier has disappeared
//! from the catalog contribute nothing, and price arithmetic saturates rather
//! than overflowing.

use crate::catalog::Catalog;
use crate::selection::SelectionState;
use crate::types::{Money, TierId};
use serde::{Deserialize, Serialize};

/// Total number of tickets selected across all tiers
#[must_use]
pub fn total_ticket_count(selection: &SelectionState) -> u64 {
    selection.entries().map(|(_, quantity)| u64::from(quantity)).sum()
}

/// Total price of the selection
///
/// Entries referencing a tier the catalog no longer lists contribute zero.
#[must_use]
pub fn total_price(catalog: &Catalog, selection: &SelectionState) -> Money {
    selection
        .entries()
        .map(|(tier_id, quantity)| {
            catalog
                .get(tier_id.as_str())
                .map_or(Money::ZERO, |tier| tier.unit_price.saturating_multiply(quantity))
        })
        .sum()
}

/// Whether the checkout action should be enabled
#[must_use]
pub fn can_checkout(selection: &SelectionState) -> bool {
    total_ticket_count(selection) > 0
}

/// Everything the booking sidebar shows below the tier list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Tickets across all tiers
    pub ticket_count: u64,
    /// Sum of line subtotals
    pub price: Money,
    /// Whether checkout is enabled
    pub can_checkout: bool,
}

impl OrderTotals {
    /// Computes all totals in one pass over the selection
    #[must_use]
    pub fn compute(catalog: &Catalog, selection: &SelectionState) -> Self {
        let ticket_count = total_ticket_count(selection);
        Self {
            ticket_count,
            price: total_price(catalog, selection),
            can_checkout: ticket_count > 0,
        }
    }
}

/// One row of the booking summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Tier being bought
    pub tier_id: TierId,
    /// Tier display name
    pub name: String,
    /// Tickets of this tier
    pub quantity: u32,
    /// Price of one ticket
    pub unit_price: Money,
    /// `unit_price * quantity`
    pub subtotal: Money,
}

/// Line items for every selected tier the catalog still lists, in catalog order
#[must_use]
pub fn booking_summary(catalog: &Catalog, selection: &SelectionState) -> Vec<LineItem> {
    catalog
        .iter()
        .filter_map(|tier| {
            let quantity = selection.quantity(tier.id.as_str());
            (quantity > 0).then(|| LineItem {
                tier_id: tier.id.clone(),
                name: tier.name.clone(),
                quantity,
                unit_price: tier.unit_price,
                subtotal: tier.unit_price.saturating_multiply(quantity),
            })
        })
        .collect()
}
