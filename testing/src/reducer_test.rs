//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use tagger_core::reducer::Reducer;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Actions are applied in the order they were added.
///
/// # Example
///
/// ```ignore
/// use tagger_testing::ReducerTest;
///
/// ReducerTest::new(AppReducer::new())
///     .given_state(AppState::default())
///     .when_action(AppAction::LoadProjectSuccess(project.clone()))
///     .when_action(AppAction::CloseProjectSuccess)
///     .then_state(|state| {
///         assert!(state.current_project.is_none());
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A>
where
    R: Reducer<State = S, Action = A>,
{
    reducer: R,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
}

impl<R, S, A> ReducerTest<R, S, A>
where
    R: Reducer<State = S, Action = A>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
        }
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to apply (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the initial state or no action is set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        for action in &self.actions {
            self.reducer.reduce(&mut state, action);
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagger_core::AppAction;

    /// Action types seen so far
    #[derive(Debug, Default)]
    struct Seen(Vec<&'static str>);

    struct SeenReducer;

    impl Reducer for SeenReducer {
        type State = Seen;
        type Action = AppAction;

        fn reduce(&self, state: &mut Seen, action: &AppAction) {
            state.0.push(action.action_type().as_str());
        }
    }

    #[test]
    fn test_single_action() {
        ReducerTest::new(SeenReducer)
            .given_state(Seen::default())
            .when_action(AppAction::CloseProjectSuccess)
            .then_state(|seen| assert_eq!(seen.0, vec!["CLOSE_PROJECT_SUCCESS"]))
            .run();
    }

    #[test]
    fn test_actions_apply_in_order() {
        ReducerTest::new(SeenReducer)
            .given_state(Seen(vec!["INITIAL"]))
            .when_action(AppAction::LoadProjectAssetsSuccess(Vec::new()))
            .when_action(AppAction::CloseProjectSuccess)
            .then_state(|seen| assert_eq!(seen.0.len(), 3))
            .then_state(|seen| {
                assert_eq!(
                    seen.0[1..],
                    ["LOAD_PROJECT_ASSETS_SUCCESS", "CLOSE_PROJECT_SUCCESS"]
                );
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "At least one action")]
    fn test_requires_action() {
        ReducerTest::new(SeenReducer)
            .given_state(Seen::default())
            .run();
    }
}
