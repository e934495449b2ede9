//! The alarm transition table.
//!
//! Rules are plain data: `(current status pattern, event) -> new status`.
//! Lookup is first-match in declaration order, and any `(status, event)`
//! pair with no matching rule is the identity transition.
//!
//! The standard table:
//!
//! | Current        | Event                     | Next          |
//! |----------------|---------------------------|---------------|
//! | NoAlarm        | SensorActivated           | PendingAlarm  |
//! | PendingAlarm   | SensorActivated           | Alarm         |
//! | PendingAlarm   | SensorReactivated         | Alarm         |
//! | PendingAlarm   | LastSensorDeactivated     | NoAlarm       |
//! | Alarm          | LastSensorDeactivated     | PendingAlarm  |
//! | Alarm          | SensorDeactivated         | PendingAlarm  |
//! | any            | CatDetectedArmedHome      | Alarm         |
//! | any            | NoCatSensorsIdle          | NoAlarm       |
//! | any            | Disarmed                  | NoAlarm       |
//! | any            | ArmedHomeWithCat          | Alarm         |

use serde::{Deserialize, Serialize};

use super::event::AlarmEvent;
use super::state::AlarmStatus;

/// Which current statuses a rule applies to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StatusMatch {
    Any,
    Is(AlarmStatus),
}

impl StatusMatch {
    /// Check whether `status` satisfies this pattern (pure).
    pub fn matches(self, status: AlarmStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => expected == status,
        }
    }
}

/// One row of the transition table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRule {
    pub from: StatusMatch,
    pub event: AlarmEvent,
    pub to: AlarmStatus,
}

impl TransitionRule {
    /// Rule that applies only when the current status is `from`.
    pub const fn when(from: AlarmStatus, event: AlarmEvent, to: AlarmStatus) -> Self {
        Self {
            from: StatusMatch::Is(from),
            event,
            to,
        }
    }

    /// Rule that applies regardless of the current status.
    pub const fn always(event: AlarmEvent, to: AlarmStatus) -> Self {
        Self {
            from: StatusMatch::Any,
            event,
            to,
        }
    }

    /// Check if this rule fires for the given status and event (pure).
    pub fn applies(&self, current: AlarmStatus, event: AlarmEvent) -> bool {
        self.event == event && self.from.matches(current)
    }
}

const STANDARD_RULES: &[TransitionRule] = {
    use super::event::AlarmEvent as E;
    use super::state::AlarmStatus::{Alarm, NoAlarm, PendingAlarm};
    &[
        TransitionRule::when(NoAlarm, E::SensorActivated, PendingAlarm),
        TransitionRule::when(PendingAlarm, E::SensorActivated, Alarm),
        TransitionRule::when(PendingAlarm, E::SensorReactivated, Alarm),
        TransitionRule::when(PendingAlarm, E::LastSensorDeactivated, NoAlarm),
        TransitionRule::when(Alarm, E::LastSensorDeactivated, PendingAlarm),
        TransitionRule::when(Alarm, E::SensorDeactivated, PendingAlarm),
        TransitionRule::always(E::CatDetectedArmedHome, Alarm),
        TransitionRule::always(E::NoCatSensorsIdle, NoAlarm),
        TransitionRule::always(E::Disarmed, NoAlarm),
        TransitionRule::always(E::ArmedHomeWithCat, Alarm),
    ]
};

/// Ordered set of transition rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    rules: Vec<TransitionRule>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransitionTable {
    /// The home-security rule set.
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    /// Build a table from explicit rules. Earlier rules take precedence.
    pub fn new(rules: Vec<TransitionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// The status after `event`, or `current` when no rule matches (pure).
    pub fn resolve(&self, current: AlarmStatus, event: AlarmEvent) -> AlarmStatus {
        self.rules
            .iter()
            .find(|rule| rule.applies(current, event))
            .map_or(current, |rule| rule.to)
    }

    /// The new status if `event` changes it, `None` for identity transitions.
    pub fn next(&self, current: AlarmStatus, event: AlarmEvent) -> Option<AlarmStatus> {
        let next = self.resolve(current, event);
        (next != current).then_some(next)
    }
}
