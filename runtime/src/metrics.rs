//! Store metrics.
//!
//! Metrics are recorded through the `metrics` facade. They are no-ops until
//! the embedding application installs a recorder.

use metrics::{describe_counter, describe_gauge};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge};

/// Counter of dispatched actions, labelled by `action_type`
pub const ACTIONS_TOTAL: &str = "tagger_store_actions_total";

/// Gauge of actions currently retained in the store history
pub const HISTORY_LEN: &str = "tagger_store_history_len";

/// Register metric descriptions with the installed recorder.
///
/// Call once after installing a recorder; harmless when none is installed.
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions dispatched into the store");
    describe_gauge!(HISTORY_LEN, "Number of actions retained in the store history");
}

/// Record one dispatched action
pub(crate) fn record_dispatch(action_type: &'static str, history_len: usize) {
    counter!(ACTIONS_TOTAL, "action_type" => action_type).increment(1);
    #[allow(clippy::cast_precision_loss)] // History is bounded well below 2^52
    let history_len = history_len as f64;
    gauge!(HISTORY_LEN).set(history_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        register_metrics();
        record_dispatch("LOAD_PROJECT_SUCCESS", 1);
    }
}
