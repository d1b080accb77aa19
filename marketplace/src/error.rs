//! Errors raised at the boundaries of the marketplace.
//!
//! Selection and pricing never fail. Only data loading, form validation and
//! collaborator calls can produce an error.

use crate::types::{EventId, TierId};
use std::path::PathBuf;
use thiserror::Error;

/// Fixture or override data failed to load or did not describe a valid catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The JSON did not match the expected record shape
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An override file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A ticket tier has an empty id
    #[error("ticket tier id must not be empty")]
    EmptyTierId,

    /// Two tiers share an id
    #[error("duplicate ticket tier id '{0}'")]
    DuplicateTier(TierId),

    /// A tier has no display name
    #[error("ticket tier '{0}' has an empty name")]
    EmptyTierName(TierId),

    /// An event has an empty id
    #[error("event id must not be empty")]
    EmptyEventId,

    /// Two events share an id
    #[error("duplicate event id '{0}'")]
    DuplicateEvent(EventId),

    /// An event claims more attendees than it can hold
    #[error("event '{event_id}' has {attendees} attendees but capacity {max_attendees}")]
    OverCapacity {
        /// Offending event
        event_id: EventId,
        /// Reported attendees
        attendees: u32,
        /// Reported capacity
        max_attendees: u32,
    },
}

/// User-entered form data was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Attendee name is blank
    #[error("full name is required")]
    MissingName,

    /// Email address is not of the form `local@domain`
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// Phone number does not contain a plausible number of digits
    #[error("invalid phone number '{0}'")]
    InvalidPhone(String),

    /// Required event draft fields are missing
    #[error("missing information: {}", .0.join(", "))]
    MissingInformation(Vec<&'static str>),

    /// Category name is not one the marketplace lists
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Price band name is not one the marketplace offers
    #[error("unknown price range '{0}'")]
    UnknownPriceBand(String),
}

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog or listing data could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No listed event has this id
    #[error("Unknown event '{0}'")]
    UnknownEvent(EventId),
}

/// Configuration values that cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The store must be allowed at least one feedback generation
    #[error("EVENTHIVE_MAX_FEEDBACK_DEPTH must be at least 1")]
    ZeroFeedbackDepth,

    /// Prices cannot be shown without a currency symbol
    #[error("EVENTHIVE_CURRENCY_SYMBOL must not be empty")]
    EmptyCurrencySymbol,

    /// An override file does not exist
    #[error("{variable} points at missing file {path}")]
    MissingFile {
        /// Environment variable that named the file
        variable: &'static str,
        /// Path that was given
        path: PathBuf,
    },
}
