//! # Asset Tagger Runtime
//!
//! Store runtime for the asset tagger.
//!
//! The store is the sink the project actions dispatch into. It owns the
//! application state, folds each dispatched action through a reducer and
//! fans the action out to observers.
//!
//! ## Core Components
//!
//! - **Store**: State behind a lock, a reducer, a bounded action history
//! - **Action broadcast**: Observers subscribe to dispatched actions
//! - **`wait_for_action`**: Await a matching action on a subscription
//!
//! ## Example
//!
//! ```ignore
//! use tagger_runtime::Store;
//! use tagger_core::Dispatch;
//!
//! let store = Store::new(AppState::default(), AppReducer::new());
//!
//! // Dispatch an action
//! store.dispatch(AppAction::CloseProjectSuccess);
//!
//! // Read state
//! let is_open = store.state(|s| s.current_project.is_some());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tagger_core::{action::TaggedAction, reducer::Reducer};
use tokio::sync::broadcast;

/// Store metrics recorded through the `metrics` facade
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur while observing the Store
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Timeout waiting for a matching action
        ///
        /// Returned by `wait_for_action` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// Every store handle was dropped, so no further actions can arrive.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Default number of dispatched actions retained by the store
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default capacity of the action broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Largest action broadcast capacity; larger values are clamped
pub const MAX_BROADCAST_CAPACITY: usize = 4096;

/// Store configuration
///
/// # Example
///
/// ```
/// use tagger_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_history_capacity(500)
///     .with_broadcast_capacity(64);
/// assert_eq!(config.history_capacity, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions kept in the history (0 disables history)
    pub history_capacity: usize,
    /// Number of actions buffered for slow subscribers
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

/// Store runtime holding application state.
pub mod store {
    use super::{
        Arc, Mutex, PoisonError, Reducer, RwLock, StoreConfig, TaggedAction, VecDeque, broadcast,
    };
    use tagger_core::dispatch::{Dispatch, GetState};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (state transitions)
    /// 3. History of dispatched actions, in completion order
    /// 4. Action broadcast to observers
    ///
    /// Dispatch is synchronous: the reducer runs, the action is recorded and
    /// broadcast, and `dispatch` returns. Concurrent dispatches serialize on
    /// the state lock, so history order equals reduction order.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        history: Arc<Mutex<VecDeque<A>>>,
        history_capacity: usize,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, R> Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        A: Clone + TaggedAction,
    {
        /// Create a new store with initial state and reducer
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R) -> Self {
            Self::with_config(initial_state, reducer, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// The broadcast capacity is clamped to `1..=MAX_BROADCAST_CAPACITY`.
        /// History storage grows on demand up to the configured capacity.
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, config: StoreConfig) -> Self {
            let capacity = config.broadcast_capacity.clamp(1, super::MAX_BROADCAST_CAPACITY);
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                history: Arc::new(Mutex::new(VecDeque::new())),
                history_capacity: config.history_capacity,
                action_broadcast,
            }
        }

        /// Dispatch an action into the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action)
        /// 3. Appends the action to the history, evicting the oldest entry
        ///    when full
        /// 4. Broadcasts the action to subscribers
        ///
        /// A poisoned lock is recovered; the reducer is expected not to
        /// panic.
        #[tracing::instrument(skip(self, action), fields(action_type = action.tag()))]
        pub fn dispatch(&self, action: A) {
            let action_type = action.tag();

            let history_len = {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                self.reducer.reduce(&mut state, &action);

                let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
                if self.history_capacity > 0 {
                    if history.len() == self.history_capacity {
                        history.pop_front();
                    }
                    history.push_back(action.clone());
                }

                // No subscribers is not an error
                let _ = self.action_broadcast.send(action);
                history.len()
            };

            tracing::debug!(history_len, "Action dispatched");
            super::metrics::record_dispatch(action_type, history_len);
        }

        /// Read state via a closure
        ///
        /// # Example
        ///
        /// ```ignore
        /// let name = store.state(|s| s.current_project.as_ref().map(|p| p.name.clone()));
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            f(&state)
        }

        /// Actions dispatched so far, oldest first
        #[must_use]
        pub fn history(&self) -> Vec<A> {
            self.history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .cloned()
                .collect()
        }

        /// Drop all retained actions
        pub fn clear_history(&self) {
            self.history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }

        /// Subscribe to dispatched actions
        ///
        /// Only actions dispatched after subscribing are received. Slow
        /// receivers may observe `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }
    }

    impl<S, A, R> Dispatch<A> for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        A: Clone + TaggedAction,
    {
        fn dispatch(&self, action: A) {
            Store::dispatch(self, action);
        }
    }

    impl<S, A, R> GetState<S> for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        A: Clone + TaggedAction,
        S: Clone,
    {
        fn get_state(&self) -> S {
            self.state(Clone::clone)
        }
    }

    impl<S, A, R> Clone for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                history: Arc::clone(&self.history),
                history_capacity: self.history_capacity,
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

/// Wait on a subscription for the first action matching `predicate`
///
/// Subscribe with [`Store::subscribe_actions`] *before* triggering the work
/// whose action you wait for. Lagged receivers keep waiting; the timeout
/// bounds the wait.
///
/// # Errors
///
/// - [`StoreError::Timeout`]: No matching action before `timeout`
/// - [`StoreError::ChannelClosed`]: Every store handle was dropped
pub async fn wait_for_action<A, P>(
    receiver: &mut broadcast::Receiver<A>,
    predicate: P,
    timeout: Duration,
) -> Result<A, StoreError>
where
    A: Clone,
    P: Fn(&A) -> bool,
{
    let wait = async {
        loop {
            match receiver.recv().await {
                Ok(action) if predicate(&action) => return Ok(action),
                Ok(_) => {},
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Action subscriber lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return Err(StoreError::ChannelClosed),
            }
        }
    };

    tokio::time::timeout(timeout, wait)
        .await
        .map_err(|_| StoreError::Timeout)?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use tagger_core::dispatch::{Dispatch, GetState};
    use tagger_core::{AppAction, ProjectId};
    use tagger_testing::fixtures::{mock_assets, mock_project};

    #[derive(Clone, Debug, Default)]
    struct TestState {
        loaded: Vec<ProjectId>,
        assets: usize,
        closed: u32,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = AppAction;

        fn reduce(&self, state: &mut TestState, action: &AppAction) {
            match action {
                AppAction::LoadProjectSuccess(project) => state.loaded.push(project.id.clone()),
                AppAction::LoadProjectAssetsSuccess(assets) => state.assets += assets.len(),
                AppAction::CloseProjectSuccess => state.closed += 1,
                _ => {},
            }
        }
    }

    fn store() -> Store<TestState, AppAction, TestReducer> {
        Store::new(TestState::default(), TestReducer)
    }

    #[test]
    fn test_huge_capacities_do_not_preallocate() {
        let config = StoreConfig::default()
            .with_history_capacity(usize::MAX)
            .with_broadcast_capacity(usize::MAX);
        let store = Store::with_config(TestState::default(), TestReducer, config);
        let mut receiver = store.subscribe_actions();

        store.dispatch(AppAction::CloseProjectSuccess);

        assert_eq!(store.history(), vec![AppAction::CloseProjectSuccess]);
        assert_eq!(receiver.try_recv().unwrap(), AppAction::CloseProjectSuccess);
    }

    #[test]
    fn test_dispatch_runs_reducer() {
        let store = store();
        let project = mock_project("TestProject");

        store.dispatch(AppAction::LoadProjectSuccess(project.clone()));
        store.dispatch(AppAction::LoadProjectAssetsSuccess(mock_assets(3)));

        assert_eq!(store.state(|s| s.loaded.clone()), vec![project.id]);
        assert_eq!(store.state(|s| s.assets), 3);
    }

    #[test]
    fn test_history_keeps_dispatch_order() {
        let store = store();
        let project = mock_project("TestProject");

        store.dispatch(AppAction::LoadProjectSuccess(project.clone()));
        store.dispatch(AppAction::CloseProjectSuccess);

        assert_eq!(
            store.history(),
            vec![AppAction::LoadProjectSuccess(project), AppAction::CloseProjectSuccess]
        );

        store.clear_history();
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_history_evicts_oldest() {
        let store = Store::with_config(
            TestState::default(),
            TestReducer,
            StoreConfig::default().with_history_capacity(2),
        );

        store.dispatch(AppAction::LoadProjectSuccess(mock_project("a")));
        store.dispatch(AppAction::CloseProjectSuccess);
        store.dispatch(AppAction::LoadProjectAssetsSuccess(Vec::new()));

        let types: Vec<_> = store.history().iter().map(AppAction::action_type).collect();
        assert_eq!(
            types,
            vec![
                tagger_core::ActionType::CloseProjectSuccess,
                tagger_core::ActionType::LoadProjectAssetsSuccess,
            ]
        );
        // Reducer still saw every action
        assert_eq!(store.state(|s| s.loaded.len()), 1);
    }

    #[test]
    fn test_zero_history_capacity_disables_history() {
        let store = Store::with_config(
            TestState::default(),
            TestReducer,
            StoreConfig::default()
                .with_history_capacity(0)
                .with_broadcast_capacity(0),
        );

        store.dispatch(AppAction::CloseProjectSuccess);

        assert!(store.history().is_empty());
        assert_eq!(store.state(|s| s.closed), 1);
    }

    #[test]
    fn test_store_as_dispatch_and_get_state() {
        fn run<D: Dispatch<AppAction> + GetState<TestState>>(sink: &D) -> TestState {
            sink.dispatch(AppAction::CloseProjectSuccess);
            sink.get_state()
        }

        let store = store();
        assert_eq!(run(&store).closed, 1);
    }

    #[tokio::test]
    async fn test_subscribers_receive_dispatched_actions() {
        let store = store();
        let mut receiver = store.subscribe_actions();

        store.dispatch(AppAction::CloseProjectSuccess);

        assert_eq!(receiver.recv().await.unwrap(), AppAction::CloseProjectSuccess);
    }

    #[tokio::test]
    async fn test_wait_for_action_skips_non_matching() {
        let store = store();
        let mut receiver = store.subscribe_actions();
        let project = mock_project("Exported");

        store.dispatch(AppAction::CloseProjectSuccess);
        store.dispatch(AppAction::ExportProjectSuccess(project.clone()));

        let action = wait_for_action(
            &mut receiver,
            |a| matches!(a, AppAction::ExportProjectSuccess(_)),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(action, Ok(AppAction::ExportProjectSuccess(project)));
    }

    #[tokio::test]
    async fn test_wait_for_action_times_out() {
        let store = store();
        let mut receiver = store.subscribe_actions();

        let result = wait_for_action(&mut receiver, |_| true, Duration::from_millis(20)).await;

        assert_eq!(result, Err(StoreError::Timeout));
    }

    #[tokio::test]
    async fn test_wait_for_action_reports_closed_channel() {
        let store = store();
        let mut receiver = store.subscribe_actions();
        drop(store);

        let result = wait_for_action(&mut receiver, |_| true, Duration::from_secs(1)).await;

        assert_eq!(result, Err(StoreError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_concurrent_dispatch() {
        let store = store();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.dispatch(AppAction::CloseProjectSuccess);
                })
            })
            .collect();

        for result in futures::future::join_all(handles).await {
            result.unwrap();
        }

        assert_eq!(store.state(|s| s.closed), 10);
        assert_eq!(store.history().len(), 10);
    }
}
