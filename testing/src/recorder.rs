//! A dispatch sink that records every action it receives.
//!
//! Stands in for the store in action tests: hand it to an operation as the
//! dispatch function, then assert on [`ActionRecorder::actions`].

use crate::lock;
use std::sync::{Arc, Mutex};
use tagger_core::dispatch::Dispatch;

/// Records dispatched actions in arrival order.
///
/// Clones share the same log.
///
/// # Example
///
/// ```
/// use tagger_core::{AppAction, Dispatch};
/// use tagger_testing::ActionRecorder;
///
/// let recorder = ActionRecorder::new();
/// recorder.dispatch(AppAction::CloseProjectSuccess);
///
/// assert_eq!(recorder.actions(), vec![AppAction::CloseProjectSuccess]);
/// ```
#[derive(Debug)]
pub struct ActionRecorder<A> {
    actions: Arc<Mutex<Vec<A>>>,
}

impl<A: Clone> ActionRecorder<A> {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the recorded actions, oldest first
    #[must_use]
    pub fn actions(&self) -> Vec<A> {
        lock(&self.actions).clone()
    }

    /// Most recent action
    #[must_use]
    pub fn last(&self) -> Option<A> {
        lock(&self.actions).last().cloned()
    }

    /// Number of recorded actions
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.actions).len()
    }

    /// Whether nothing was dispatched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.actions).is_empty()
    }

    /// Forget recorded actions
    pub fn clear(&self) {
        lock(&self.actions).clear();
    }
}

impl<A: Clone> Default for ActionRecorder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for ActionRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<A> Dispatch<A> for ActionRecorder<A> {
    fn dispatch(&self, action: A) {
        lock(&self.actions).push(action);
    }
}

/// Helper assertions for recorded actions
pub mod assertions {
    use super::ActionRecorder;

    /// Assert that exactly one action was dispatched and that it equals `expected`
    ///
    /// # Panics
    ///
    /// Panics if the recorder holds zero or several actions, or a different one.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_single_action<A>(recorder: &ActionRecorder<A>, expected: &A)
    where
        A: Clone + PartialEq + std::fmt::Debug,
    {
        let actions = recorder.actions();
        assert_eq!(
            actions.len(),
            1,
            "Expected exactly one dispatched action, but found {}: {:?}",
            actions.len(),
            actions
        );
        assert_eq!(&actions[0], expected);
    }

    /// Assert that nothing was dispatched
    ///
    /// # Panics
    ///
    /// Panics if the recorder is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_actions<A>(recorder: &ActionRecorder<A>)
    where
        A: Clone + std::fmt::Debug,
    {
        assert!(
            recorder.is_empty(),
            "Expected no dispatched actions, but found {:?}",
            recorder.actions()
        );
    }
}
