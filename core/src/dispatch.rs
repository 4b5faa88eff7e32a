//! Store access handed to project actions.
//!
//! Actions never reach for a global store. The dispatch function and, where
//! needed, a state accessor are passed in explicitly so tests can substitute a
//! recorder or a closure.

/// Synchronous sink for actions.
///
/// Implemented by the runtime `Store` and, through the blanket impl, by any
/// `Fn(A)` closure.
///
/// # Example
///
/// ```
/// use std::sync::Mutex;
/// use tagger_core::dispatch::Dispatch;
///
/// let seen = Mutex::new(Vec::new());
/// let dispatch = |action: u32| seen.lock().map(|mut v| v.push(action)).unwrap_or(());
///
/// dispatch.dispatch(7);
/// assert_eq!(seen.lock().map(|v| v.clone()).unwrap_or_default(), vec![7]);
/// ```
pub trait Dispatch<A> {
    /// Deliver an action to the store
    fn dispatch(&self, action: A);
}

impl<A, F> Dispatch<A> for F
where
    F: Fn(A),
{
    fn dispatch(&self, action: A) {
        self(action);
    }
}

/// Read access to a snapshot of the store state.
pub trait GetState<S> {
    /// Returns the current state
    fn get_state(&self) -> S;
}

impl<S, F> GetState<S> for F
where
    F: Fn() -> S,
{
    fn get_state(&self) -> S {
        self()
    }
}
