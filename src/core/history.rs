//! Alarm transition history.
//!
//! Every committed status change is recorded as an immutable
//! [`StateTransition`]. The history is bounded: once `limit` entries are
//! held, recording drops the oldest.

use super::event::AlarmEvent;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single committed status change.
///
/// # Example
///
/// ```rust
/// use catpoint::core::{AlarmEvent, AlarmStatus, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: AlarmStatus::NoAlarm,
///     to: AlarmStatus::PendingAlarm,
///     event: AlarmEvent::SensorActivated,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, AlarmStatus::PendingAlarm);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The status being left
    pub from: S,
    /// The status being entered
    pub to: S,
    /// The classified event that caused the change
    pub event: AlarmEvent,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of status changes.
///
/// `record` returns a new history rather than mutating in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding up to `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left unchanged. When the limit is reached, the oldest
    /// entry is dropped from the returned history.
    ///
    /// ```rust
    /// use catpoint::core::{AlarmEvent, AlarmStatus, StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let updated = history.record(StateTransition {
    ///     from: AlarmStatus::NoAlarm,
    ///     to: AlarmStatus::PendingAlarm,
    ///     event: AlarmEvent::SensorActivated,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(updated.len(), 1);
    /// assert!(history.is_empty());
    /// ```
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        if transitions.len() == self.limit {
            transitions.pop_front();
        }
        transitions.push_back(transition);
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// The statuses traversed: the first `from`, then each `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AlarmStatus;

    fn transition(from: AlarmStatus, to: AlarmStatus) -> StateTransition<AlarmStatus> {
        StateTransition {
            from,
            to,
            event: AlarmEvent::SensorActivated,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<AlarmStatus> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let updated = history.record(transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm));

        assert_eq!(history.len(), 0);
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn get_path_returns_status_sequence() {
        let history = StateHistory::new()
            .record(transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm))
            .record(transition(AlarmStatus::PendingAlarm, AlarmStatus::Alarm));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &AlarmStatus::NoAlarm,
                &AlarmStatus::PendingAlarm,
                &AlarmStatus::Alarm
            ]
        );
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let history = StateHistory::with_limit(2)
            .record(transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm))
            .record(transition(AlarmStatus::PendingAlarm, AlarmStatus::Alarm))
            .record(transition(AlarmStatus::Alarm, AlarmStatus::NoAlarm));

        assert_eq!(history.len(), 2);
        let first = history.transitions().next().unwrap();
        assert_eq!(first.from, AlarmStatus::PendingAlarm);
        assert_eq!(history.last().unwrap().to, AlarmStatus::NoAlarm);
    }

    #[test]
    fn zero_limit_is_clamped() {
        let history = StateHistory::with_limit(0)
            .record(transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm));
        assert_eq!(history.limit(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let mut first = transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm);
        first.timestamp = start;
        let mut second = transition(AlarmStatus::PendingAlarm, AlarmStatus::Alarm);
        second.timestamp = start + chrono::Duration::seconds(3);

        let history = StateHistory::new().record(first).record(second);
        assert_eq!(history.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::with_limit(8)
            .record(transition(AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<AlarmStatus> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), 8);
    }
}
