//! Per-visitor ticket selection.
//!
//! A [`SelectionState`] maps tier ids to requested quantities. It has a single
//! mutation entry point, [`SelectionState::set_quantity`], which clamps every
//! request into `[0, tier.available]` and ignores tiers the catalog does not
//! list. Increment and decrement are `set_quantity(id, current ± 1)`.
//!
//! Invariants held after every call:
//! - no entry exceeds its tier's `available`
//! - no entry references a tier absent from the catalog it was set against
//! - no entry is zero (absence and zero are the same thing)

use crate::catalog::Catalog;
use crate::types::TierId;
use std::collections::BTreeMap;

/// Clamp a requested quantity into `[0, available]`
///
/// ```
/// use eventhive::selection::clamp_quantity;
///
/// assert_eq!(clamp_quantity(-5, 200), 0);
/// assert_eq!(clamp_quantity(999, 50), 50);
/// assert_eq!(clamp_quantity(2, 200), 2);
/// ```
#[must_use]
pub fn clamp_quantity(requested: i64, available: u32) -> u32 {
    let clamped = requested.clamp(0, i64::from(available));
    u32::try_from(clamped).unwrap_or(available)
}

/// Requested quantity per ticket tier
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    quantities: BTreeMap<TierId, u32>,
}

impl SelectionState {
    /// An empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quantities: BTreeMap::new(),
        }
    }

    /// Quantity requested for a tier; zero when the tier was never touched
    #[must_use]
    pub fn quantity(&self, tier_id: &str) -> u32 {
        self.quantities.get(tier_id).copied().unwrap_or(0)
    }

    /// Set one tier's quantity, clamped to what the catalog has available
    ///
    /// Returns the stored quantity, or `None` when the catalog has no such
    /// tier (in which case nothing changes).
    pub fn set_quantity(&mut self, catalog: &Catalog, tier_id: &str, requested: i64) -> Option<u32> {
        let tier = catalog.get(tier_id)?;
        let quantity = clamp_quantity(requested, tier.available);

        if quantity == 0 {
            self.quantities.remove(tier_id);
        } else {
            self.quantities.insert(tier.id.clone(), quantity);
        }

        Some(quantity)
    }

    /// Owned variant of [`set_quantity`](Self::set_quantity)
    #[must_use]
    pub fn with_quantity(mut self, catalog: &Catalog, tier_id: &str, requested: i64) -> Self {
        let _ = self.set_quantity(catalog, tier_id, requested);
        self
    }

    /// Non-zero entries in tier id order
    pub fn entries(&self) -> impl Iterator<Item = (&TierId, u32)> + '_ {
        self.quantities.iter().map(|(id, quantity)| (id, *quantity))
    }

    /// Number of tiers with a non-zero quantity
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// True when nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Discard every entry
    pub fn clear(&mut self) {
        self.quantities.clear();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::catalog::TicketTier;

    fn catalog() -> Catalog {
        let Ok(catalog) = Catalog::new(vec![
            TicketTier::new("general", "General Admission", 2500, 1500),
            TicketTier::new("vip", "VIP Experience", 5000, 200),
            TicketTier::new("early-bird", "Early Bird Special", 1999, 50),
            TicketTier::new("sold-out", "Sold Out", 100, 0),
        ]) else {
            panic!("fixture catalog must be valid");
        };
        catalog
    }

    #[test]
    fn test_set_within_bounds() {
        let catalog = catalog();
        let mut selection = SelectionState::new();

        assert_eq!(selection.set_quantity(&catalog, "vip", 2), Some(2));
        assert_eq!(selection.quantity("vip"), 2);
        assert_eq!(selection.quantity("general"), 0);
    }

    #[test]
    fn test_over_request_clamps_to_available() {
        let catalog = catalog();
        let mut selection = SelectionState::new();

        assert_eq!(selection.set_quantity(&catalog, "early-bird", 999), Some(50));
        assert_eq!(selection.quantity("early-bird"), 50);
    }

    #[test]
    fn test_negative_request_removes_entry() {
        let catalog = catalog();
        let mut selection = SelectionState::new().with_quantity(&catalog, "vip", 2);

        assert_eq!(selection.set_quantity(&catalog, "vip", -5), Some(0));
        assert_eq!(selection.quantity("vip"), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_unknown_tier_is_ignored() {
        let catalog = catalog();
        let mut selection = SelectionState::new().with_quantity(&catalog, "vip", 1);
        let before = selection.clone();

        assert_eq!(selection.set_quantity(&catalog, "nonexistent", 3), None);
        assert_eq!(selection, before);
        assert_eq!(selection.quantity("nonexistent"), 0);
    }

    #[test]
    fn test_sold_out_tier_stays_empty() {
        let catalog = catalog();
        let mut selection = SelectionState::new();

        assert_eq!(selection.set_quantity(&catalog, "sold-out", 1), Some(0));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_explicit_zero_equals_untouched() {
        let catalog = catalog();
        let touched = SelectionState::new()
            .with_quantity(&catalog, "general", 4)
            .with_quantity(&catalog, "general", 0);

        assert_eq!(touched, SelectionState::new());
    }

    #[test]
    fn test_other_entries_unchanged() {
        let catalog = catalog();
        let mut selection = SelectionState::new()
            .with_quantity(&catalog, "general", 3)
            .with_quantity(&catalog, "vip", 1);

        let _ = selection.set_quantity(&catalog, "vip", 7);

        let entries: Vec<(&str, u32)> = selection.entries().map(|(id, q)| (id.as_str(), q)).collect();
        assert_eq!(entries, vec![("general", 3), ("vip", 7)]);
    }

    #[test]
    fn test_extreme_requests() {
        assert_eq!(clamp_quantity(i64::MIN, 10), 0);
        assert_eq!(clamp_quantity(i64::MAX, 10), 10);
        assert_eq!(clamp_quantity(i64::MAX, u32::MAX), u32::MAX);
        assert_eq!(clamp_quantity(0, 0), 0);
    }
}
