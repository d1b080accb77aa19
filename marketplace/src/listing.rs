//! Event discovery: the listing and its filters.
//!
//! Filtering is a linear scan over a few dozen records; every criterion left
//! unset matches everything.

use crate::error::{CatalogError, ValidationError};
use crate::types::{EventId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Listing category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Concerts and festivals
    Music,
    /// Matches and tournaments
    Sports,
    /// Hands-on sessions
    Workshop,
    /// Conferences and networking
    Business,
    /// Tech talks and meetups
    Technology,
    /// Exhibitions and performances
    Arts,
    /// Tastings and food fairs
    Food,
    /// Wellness and fitness
    Health,
    /// Lectures and courses
    Education,
    /// Shows and everything else
    Entertainment,
}

impl Category {
    /// Every category, in the order the create-event form offers them
    pub const ALL: [Self; 10] = [
        Self::Music,
        Self::Sports,
        Self::Workshop,
        Self::Business,
        Self::Technology,
        Self::Arts,
        Self::Food,
        Self::Health,
        Self::Education,
        Self::Entertainment,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Sports => "Sports",
            Self::Workshop => "Workshop",
            Self::Business => "Business",
            Self::Technology => "Technology",
            Self::Arts => "Arts",
            Self::Food => "Food",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Price filter buckets
///
/// Bucket edges are not symmetric: 500 and 1000 both fall in
/// `From500To1000`, 2000 falls in `From1000To2000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    /// Exactly zero
    Free,
    /// Paid, below 500
    Under500,
    /// 500 to 1000 inclusive
    From500To1000,
    /// Above 1000, up to 2000 inclusive
    From1000To2000,
    /// Above 2000
    Above2000,
}

impl PriceBand {
    /// Every band, cheapest first
    pub const ALL: [Self; 5] = [
        Self::Free,
        Self::Under500,
        Self::From500To1000,
        Self::From1000To2000,
        Self::Above2000,
    ];

    /// True if `price` falls in this band
    #[must_use]
    pub const fn contains(&self, price: Money) -> bool {
        let p = price.amount();
        match self {
            Self::Free => p == 0,
            Self::Under500 => p > 0 && p < 500,
            Self::From500To1000 => p >= 500 && p <= 1000,
            Self::From1000To2000 => p > 1000 && p <= 2000,
            Self::Above2000 => p > 2000,
        }
    }

    /// Short label used in filter menus and on the command line
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Under500 => "under-500",
            Self::From500To1000 => "500-1000",
            Self::From1000To2000 => "1000-2000",
            Self::Above2000 => "above-2000",
        }
    }
}

impl FromStr for PriceBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownPriceBand(s.to_string()))
    }
}

/// One card in the event listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventSummary {
    /// Event identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Teaser text
    pub description: String,
    /// Start date
    pub date: NaiveDate,
    /// Start time as displayed
    pub time: String,
    /// "City, Region"
    pub location: String,
    /// Category
    pub category: Category,
    /// Entry price ("from" price for tiered events)
    pub price: Money,
    /// Registered attendees
    pub attendees: u32,
    /// Capacity
    pub max_attendees: u32,
    /// Shown with a trending badge
    #[serde(default)]
    pub trending: bool,
    /// Shown with a featured badge
    #[serde(default)]
    pub featured: bool,
}

impl EventSummary {
    /// Share of capacity taken, between 0.0 and 1.0
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        if self.max_attendees == 0 {
            return 1.0;
        }
        f64::from(self.attendees) / f64::from(self.max_attendees)
    }

    /// Places still open
    #[must_use]
    pub const fn spots_left(&self) -> u32 {
        self.max_attendees.saturating_sub(self.attendees)
    }

    /// True when entry costs nothing
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// Search and filter criteria for the listing page
///
/// ```
/// use eventhive::listing::{Category, EventFilter, PriceBand};
///
/// let filter = EventFilter::new()
///     .with_query("music")
///     .with_category(Category::Music)
///     .with_price_band(PriceBand::Above2000);
/// assert!(filter.category.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive text matched against title and description
    pub query: String,
    /// Exact category; `None` means all
    pub category: Option<Category>,
    /// Substring of the location; `None` or empty means all
    pub location: Option<String>,
    /// Price bucket; `None` means all
    pub price_band: Option<PriceBand>,
}

impl EventFilter {
    /// A filter that matches every event
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restricts to one category
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to locations containing `location`
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Restricts to one price bucket
    #[must_use]
    pub const fn with_price_band(mut self, band: PriceBand) -> Self {
        self.price_band = Some(band);
        self
    }

    /// True if the event satisfies every criterion that is set
    #[must_use]
    pub fn matches(&self, event: &EventSummary) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = event.title.to_lowercase().contains(&query)
            || event.description.to_lowercase().contains(&query);

        let matches_category = self.category.is_none_or(|category| event.category == category);

        let matches_location = self
            .location
            .as_deref()
            .is_none_or(|location| location.is_empty() || event.location.contains(location));

        let matches_price = self.price_band.is_none_or(|band| band.contains(event.price));

        matches_search && matches_category && matches_location && matches_price
    }
}

/// Validated list of events, in display order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventListing {
    events: Vec<EventSummary>,
}

impl EventListing {
    /// Builds a listing, checking ids and capacity figures
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for an empty or duplicate id, or an event
    /// with more attendees than capacity.
    pub fn new(events: Vec<EventSummary>) -> Result<Self, CatalogError> {
        Self::validate(&events)?;
        Ok(Self { events })
    }

    fn validate(events: &[EventSummary]) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(events.len());
        for event in events {
            if event.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyEventId);
            }
            if !seen.insert(event.id.as_str()) {
                return Err(CatalogError::DuplicateEvent(event.id.clone()));
            }
            if event.attendees > event.max_attendees {
                return Err(CatalogError::OverCapacity {
                    event_id: event.id.clone(),
                    attendees: event.attendees,
                    max_attendees: event.max_attendees,
                });
            }
        }
        Ok(())
    }

    /// Parses a JSON array of event records
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] for shape errors, or any error
    /// from [`EventListing::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let events: Vec<EventSummary> = serde_json::from_str(json)?;
        Self::new(events)
    }

    /// Reads and parses a JSON listing file
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`EventListing::from_json`].
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Events matching `filter`, in listing order
    #[must_use]
    pub fn filter(&self, filter: &EventFilter) -> Vec<&EventSummary> {
        let matched: Vec<&EventSummary> = self.events.iter().filter(|e| filter.matches(e)).collect();
        tracing::debug!(
            total = self.events.len(),
            matched = matched.len(),
            "Filtered event listing"
        );
        matched
    }

    /// Looks up an event by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EventSummary> {
        self.events.iter().find(|event| event.id.as_str() == id)
    }

    /// Events carrying the trending badge
    pub fn trending(&self) -> impl Iterator<Item = &EventSummary> {
        self.events.iter().filter(|event| event.trending)
    }

    /// Events carrying the featured badge
    pub fn featured(&self) -> impl Iterator<Item = &EventSummary> {
        self.events.iter().filter(|event| event.featured)
    }

    /// All events
    #[must_use]
    pub fn events(&self) -> &[EventSummary] {
        &self.events
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing is listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
