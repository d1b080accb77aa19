//! Given-When-Then harness for driving a reducer without a `Store`
//!
//! A test names the starting state, any setup actions, the action under test
//! and then checks the state and the effects that action produced.

#![allow(clippy::module_name_repetitions)]

use eventhive_core::{effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;

type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// One reducer step under test
///
/// Setup actions from [`given_actions`](Self::given_actions) are reduced
/// first and whatever effects they return are dropped. Effect checks only
/// ever see the effects of the [`when_action`](Self::when_action) step.
///
/// # Example
///
/// ```ignore
/// use eventhive_testing::ReducerTest;
///
/// ReducerTest::new(SelectionReducer::new())
///     .with_env(test_environment())
///     .given_state(TicketSelection::new(event_id, catalog))
///     .given_actions(vec![SelectionAction::set_quantity("vip", 2)])
///     .when_action(SelectionAction::set_quantity("vip", -5))
///     .then_state(|state| {
///         assert_eq!(state.quantity_of("vip"), 0);
///     })
///     .then_effects(|effects| {
///         assertions::assert_no_effects(effects);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    env: Option<E>,
    start: Option<S>,
    setup: Vec<A>,
    step: Option<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Starts a test around `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            env: None,
            start: None,
            setup: Vec::new(),
            step: None,
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Environment handed to every reduce call
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.env = Some(env);
        self
    }

    /// State before any action is reduced
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.start = Some(state);
        self
    }

    /// Actions reduced in order before the step under test
    #[must_use]
    pub fn given_actions(mut self, actions: Vec<A>) -> Self {
        self.setup = actions;
        self
    }

    /// The action whose outcome is checked
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.step = Some(action);
        self
    }

    /// Queues a check on the state after the step
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Queues a check on the effects the step returned
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduces setup and step, then runs the queued checks
    ///
    /// # Panics
    ///
    /// Panics when the state, environment or step was never supplied, and
    /// whenever a queued check fails.
    #[allow(clippy::panic)]
    #[allow(clippy::expect_used)]
    pub fn run(self) {
        let env = self.env.expect("ReducerTest needs with_env(..) before run()");
        let mut state = self
            .start
            .expect("ReducerTest needs given_state(..) before run()");
        let step = self
            .step
            .expect("ReducerTest needs when_action(..) before run()");

        for action in self.setup {
            drop(self.reducer.reduce(&mut state, action, &env));
        }

        let effects = self.reducer.reduce(&mut state, step, &env);

        self.state_checks.into_iter().for_each(|check| check(&state));
        self.effect_checks.into_iter().for_each(|check| check(&effects));
    }
}

/// Checks over a reducer's returned effects
pub mod assertions {
    use eventhive_core::effect::Effect;

    /// Every effect is a no-op
    ///
    /// # Panics
    ///
    /// Panics if any effect would run a task.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_noop),
            "reducer returned work it should not have: {effects:?}"
        );
    }

    /// Exactly `expected` effects were returned
    ///
    /// # Panics
    ///
    /// Panics on any other count.
    #[allow(clippy::panic)]
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected effect count in {effects:?}");
    }

    /// At least one effect carries a task
    ///
    /// # Panics
    ///
    /// Panics if every effect is a no-op.
    #[allow(clippy::panic)]
    pub fn assert_has_task_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| !e.is_noop()),
            "reducer returned no task: {effects:?}"
        );
    }

    /// Execute every task in `effects` and collect the actions they return
    ///
    /// Lets a test follow an effect through to the action it would feed back
    /// into the reducer, without a `Store`.
    #[must_use]
    pub fn run_tasks<A>(effects: Vec<Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                Effect::None => {},
                Effect::Parallel(inner) | Effect::Sequential(inner) => {
                    actions.extend(run_tasks(inner));
                },
                Effect::Task(task) => actions.extend(task()),
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhive_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

    #[derive(Clone, Debug)]
    struct SeatCounter {
        held: u32,
        limit: u32,
    }

    #[derive(Clone, Debug)]
    enum SeatAction {
        Hold,
        Release,
        Announce,
        Announced,
    }

    struct SeatReducer;

    struct NoEnv;

    impl Reducer for SeatReducer {
        type State = SeatCounter;
        type Action = SeatAction;
        type Environment = NoEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SeatAction::Hold => {
                    state.held = (state.held + 1).min(state.limit);
                    smallvec![Effect::None]
                },
                SeatAction::Release => {
                    state.held = state.held.saturating_sub(1);
                    smallvec![Effect::None]
                },
                SeatAction::Announce => {
                    smallvec![Effect::task(|| Some(SeatAction::Announced))]
                },
                SeatAction::Announced => SmallVec::new(),
            }
        }
    }

    #[test]
    fn test_hold_respects_limit() {
        ReducerTest::new(SeatReducer)
            .with_env(NoEnv)
            .given_state(SeatCounter { held: 0, limit: 2 })
            .given_actions(vec![SeatAction::Hold, SeatAction::Hold])
            .when_action(SeatAction::Hold)
            .then_state(|state| {
                assert_eq!(state.held, 2);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_release_from_empty() {
        ReducerTest::new(SeatReducer)
            .with_env(NoEnv)
            .given_state(SeatCounter { held: 0, limit: 2 })
            .when_action(SeatAction::Release)
            .then_state(|state| {
                assert_eq!(state.held, 0);
            })
            .run();
    }

    #[test]
    fn test_task_effects_are_detected_and_run() {
        let mut state = SeatCounter { held: 0, limit: 1 };
        let effects = SeatReducer.reduce(&mut state, SeatAction::Announce, &NoEnv);

        assertions::assert_effects_count(&effects, 1);
        assertions::assert_has_task_effect(&effects);

        let actions = assertions::run_tasks(effects.into_vec());
        assert!(matches!(actions.as_slice(), [SeatAction::Announced]));
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<SeatAction>(&[Effect::None]);
        assertions::assert_no_effects::<SeatAction>(&[]);
    }
}
