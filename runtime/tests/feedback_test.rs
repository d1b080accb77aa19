//! Integration tests for effect feedback in the Store runtime
//!
//! Validates that task results are fed back to the reducer in order, that
//! the environment reaches every task, and that runaway feedback is cut off.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use eventhive_core::environment::Clock;
use eventhive_core::{DateTime, SmallVec, Utc, effect::Effect, reducer::Reducer, smallvec};
use eventhive_runtime::{SendReport, Store, StoreConfig, StoreError};
use eventhive_testing::test_clock;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("eventhive_runtime=trace")
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug, Default, PartialEq)]
struct HoldState {
    held: u32,
    stamps: Vec<DateTime<Utc>>,
    rearmed: u32,
}

#[derive(Clone, Debug, PartialEq)]
enum HoldAction {
    /// Hold `count` seats, one task per seat
    HoldMany { count: u32 },
    /// A single seat hold came back from the backend
    SeatHeld { at: DateTime<Utc> },
    /// Keep re-arming a timer forever
    Rearm,
}

struct HoldEnvironment {
    clock: Arc<dyn Clock>,
}

struct HoldReducer;

impl Reducer for HoldReducer {
    type State = HoldState;
    type Action = HoldAction;
    type Environment = HoldEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            HoldAction::HoldMany { count } => {
                let tasks = (0..count)
                    .map(|_| {
                        let clock = Arc::clone(&env.clock);
                        Effect::task(move || Some(HoldAction::SeatHeld { at: clock.now() }))
                    })
                    .collect();
                smallvec![Effect::chain(tasks)]
            },
            HoldAction::SeatHeld { at } => {
                state.held += 1;
                state.stamps.push(at);
                SmallVec::new()
            },
            HoldAction::Rearm => {
                state.rearmed += 1;
                smallvec![Effect::task(|| Some(HoldAction::Rearm))]
            },
        }
    }
}

fn store(config: StoreConfig) -> Store<HoldState, HoldAction, HoldEnvironment, HoldReducer> {
    Store::with_config(
        HoldState::default(),
        HoldReducer,
        HoldEnvironment {
            clock: Arc::new(test_clock()),
        },
        config,
    )
}

#[test]
fn test_every_task_result_is_reduced() {
    init_tracing();
    let mut store = store(StoreConfig::default());

    let report = store
        .send(HoldAction::HoldMany { count: 3 })
        .expect("one feedback generation");

    assert_eq!(
        report,
        SendReport {
            actions_processed: 4,
            tasks_executed: 3,
        }
    );
    let state = store.into_state();
    assert_eq!(state.held, 3);
    assert!(state.stamps.iter().all(|at| *at == test_clock().now()));
}

#[test]
fn test_zero_tasks_is_a_single_action() {
    let mut store = store(StoreConfig::default());

    let report = store
        .send(HoldAction::HoldMany { count: 0 })
        .expect("nothing to feed back");

    assert_eq!(report.actions_processed, 1);
    assert_eq!(report.tasks_executed, 0);
}

#[test]
fn test_runaway_feedback_is_cut_off() {
    init_tracing();
    let mut store = store(StoreConfig::default().with_max_feedback_depth(5));

    let result = store.send(HoldAction::Rearm);

    assert_eq!(result, Err(StoreError::FeedbackLimitExceeded { max_depth: 5 }));
    // The sent action plus five generations were reduced
    assert_eq!(store.state(|s| s.rearmed), 6);
}

#[test]
fn test_store_is_reusable_after_limit() {
    let mut store = store(StoreConfig::new(2));

    assert!(store.send(HoldAction::Rearm).is_err());
    let report = store
        .send(HoldAction::HoldMany { count: 1 })
        .expect("bounded chain completes");

    assert_eq!(report.actions_processed, 2);
    assert_eq!(store.state(|s| s.held), 1);
}
