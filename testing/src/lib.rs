//! # EventHive Testing
//!
//! Testing utilities and helpers for EventHive reducers.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - The Given-When-Then [`ReducerTest`] builder
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use eventhive_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(SelectionReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TicketSelection::new(event_id, catalog))
//!     .when_action(SelectionAction::set_quantity("vip", 2))
//!     .then_state(|state| assert_eq!(state.total_ticket_count(), 2))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use eventhive_core::environment::{Clock, IdGenerator};

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventhive_testing::mocks::FixedClock;
    /// use eventhive_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `{prefix}-1`, `{prefix}-2`, ...
    ///
    /// ```
    /// use eventhive_testing::mocks::SequentialIdGenerator;
    /// use eventhive_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new("ticket");
    /// assert_eq!(ids.next_id(), "ticket-1");
    /// assert_eq!(ids.next_id(), "ticket-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `{prefix}-1`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{}-{n}", self.prefix)
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
