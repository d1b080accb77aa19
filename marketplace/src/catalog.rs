//! Ticket tier catalog for a single event.
//!
//! The catalog is loaded once when a visitor opens an event and stays
//! read-only for the whole selection session. Record shape is checked when
//! the data enters the system (fixtures or an override file); after that the
//! rest of the crate trusts it.

use crate::error::CatalogError;
use crate::types::{Money, TierId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A purchasable category of ticket for one event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketTier {
    /// Stable identifier (`general`, `vip`, ...)
    pub id: TierId,
    /// Display label
    pub name: String,
    /// Short marketing line shown under the name
    #[serde(default)]
    pub description: String,
    /// Price of one ticket; zero means free
    pub unit_price: Money,
    /// Remaining sellable inventory when the catalog was loaded
    pub available: u32,
    /// Display-only perks, in presentation order
    #[serde(default)]
    pub perks: Vec<String>,
}

impl TicketTier {
    /// Creates a tier with no description or perks
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: u64, available: u32) -> Self {
        Self {
            id: TierId::new(id),
            name: name.into(),
            description: String::new(),
            unit_price: Money::new(unit_price),
            available,
            perks: Vec::new(),
        }
    }

    /// Adds a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds perks, in order
    #[must_use]
    pub fn with_perks<I, P>(mut self, perks: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.perks = perks.into_iter().map(Into::into).collect();
        self
    }

    /// True when no tickets of this tier are left
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available == 0
    }
}

/// Ordered, validated list of ticket tiers
///
/// Tier ids are unique and non-empty. Lookup is linear; an event never has
/// more than a handful of tiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    tiers: Vec<TicketTier>,
}

impl Catalog {
    /// Builds a catalog from tiers, checking ids and names
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a tier id is empty or repeated, or a tier
    /// has an empty name.
    pub fn new(tiers: Vec<TicketTier>) -> Result<Self, CatalogError> {
        Self::validate(&tiers)?;
        Ok(Self { tiers })
    }

    fn validate(tiers: &[TicketTier]) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(tiers.len());
        for tier in tiers {
            if tier.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyTierId);
            }
            if tier.name.trim().is_empty() {
                return Err(CatalogError::EmptyTierName(tier.id.clone()));
            }
            if !seen.insert(tier.id.as_str()) {
                return Err(CatalogError::DuplicateTier(tier.id.clone()));
            }
        }
        Ok(())
    }

    /// Parses a JSON array of tier records
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] if the JSON does not match the
    /// tier shape (including negative inventory), or any validation error
    /// from [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tiers: Vec<TicketTier> = serde_json::from_str(json)?;
        Self::new(tiers)
    }

    /// Reads and parses a JSON catalog file
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Catalog::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), tiers = catalog.len(), "Loaded ticket catalog");
        Ok(catalog)
    }

    /// Looks up a tier by id
    #[must_use]
    pub fn get(&self, tier_id: &str) -> Option<&TicketTier> {
        self.tiers.iter().find(|tier| tier.id.as_str() == tier_id)
    }

    /// True if the catalog lists this tier
    #[must_use]
    pub fn contains(&self, tier_id: &str) -> bool {
        self.get(tier_id).is_some()
    }

    /// All tiers, in listing order
    #[must_use]
    pub fn tiers(&self) -> &[TicketTier] {
        &self.tiers
    }

    /// Iterates tiers in listing order
    pub fn iter(&self) -> std::slice::Iter<'_, TicketTier> {
        self.tiers.iter()
    }

    /// Number of tiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// True if no tiers are listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Cheapest unit price, used for "from ₹X" labels
    #[must_use]
    pub fn starting_price(&self) -> Option<Money> {
        self.tiers.iter().map(|tier| tier.unit_price).min()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TicketTier;
    type IntoIter = std::slice::Iter<'a, TicketTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}
