//! # EventHive Runtime
//!
//! Runtime implementation for the EventHive reducers.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Feedback Loop**: Manages the action → reducer → effects → action cycle
//!
//! The store is single-owner and synchronous. `send` takes `&mut self`, runs
//! the reducer, executes every effect inline and only returns once the whole
//! feedback chain has drained. There is no lock and no executor: a session
//! owns its store outright.
//!
//! ## Example
//!
//! ```ignore
//! use eventhive_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use eventhive_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept producing follow-up actions past the configured depth
        ///
        /// The remaining chain is dropped. State changes made before the
        /// limit was hit are kept.
        #[error("Effect feedback exceeded maximum depth of {max_depth}")]
        FeedbackLimitExceeded {
            /// Configured maximum depth
            max_depth: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use eventhive_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_depth(8);
/// assert_eq!(config.max_feedback_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many generations of effect-produced actions a single `send` may
    /// process before giving up
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Default bound on effect feedback generations
    pub const DEFAULT_MAX_FEEDBACK_DEPTH: usize = 32;

    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_depth: usize) -> Self {
        Self { max_feedback_depth }
    }

    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_FEEDBACK_DEPTH)
    }
}

/// Summary of the work performed by one `send`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Actions reduced, including the one passed to `send`
    pub actions_processed: usize,
    /// Task effects executed
    pub tasks_executed: usize,
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{Effect, Reducer, SendReport, StoreConfig, StoreError, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned directly)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// The action is reduced, its effects are executed in order, and any
        /// actions those effects produce are reduced in turn until nothing is
        /// left.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if effects keep
        /// producing actions past `max_feedback_depth` generations.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<SendReport, StoreError> {
            let mut report = SendReport::default();
            let mut queue: VecDeque<(A, usize)> = VecDeque::new();
            queue.push_back((action, 0));

            while let Some((action, depth)) = queue.pop_front() {
                if depth > self.config.max_feedback_depth {
                    tracing::warn!(
                        max_depth = self.config.max_feedback_depth,
                        dropped = queue.len() + 1,
                        "Effect feedback limit exceeded"
                    );
                    return Err(StoreError::FeedbackLimitExceeded {
                        max_depth: self.config.max_feedback_depth,
                    });
                }

                let effects = {
                    let span = tracing::debug_span!("reducer_execution", depth);
                    let _enter = span.enter();
                    self.reducer.reduce(&mut self.state, action, &self.environment)
                };
                report.actions_processed += 1;
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    Self::execute_effect(effect, depth, &mut queue, &mut report);
                }
            }

            tracing::debug!(
                actions = report.actions_processed,
                tasks = report.tasks_executed,
                "Action processing completed"
            );
            Ok(report)
        }

        /// Execute one effect, queueing any action it produces
        ///
        /// `Parallel` children have no ordering guarantee, so running them in
        /// declaration order is as valid as any other order.
        fn execute_effect(
            effect: Effect<A>,
            depth: usize,
            queue: &mut VecDeque<(A, usize)>,
            report: &mut SendReport,
        ) {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        Self::execute_effect(effect, depth, queue, report);
                    }
                },
                Effect::Task(task) => {
                    report.tasks_executed += 1;
                    if let Some(action) = task() {
                        queue.push_back((action, depth + 1));
                    }
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let total = store.state(|s| s.total_ticket_count());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the injected environment
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The configuration this store was built with
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Consume the store and return its final state
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

pub use store::Store;
