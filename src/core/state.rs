//! Status values held by the store and the `State` trait they implement.
//!
//! Exactly one [`AlarmStatus`] and one [`ArmingStatus`] exist at any time.
//! Both are plain `Copy` values; the store owns them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for status values tracked by the state machine.
///
/// All methods are pure. Statuses are immutable values describing the
/// current position of the system.
///
/// # Required Traits
///
/// - `Clone`: statuses are recorded in history
/// - `PartialEq`: statuses are compared by the transition table
/// - `Debug`: statuses are logged
/// - `Serialize` + `Deserialize`: statuses are persisted by snapshots
///
/// Implementations are usually generated with
/// [`status_enum!`](crate::status_enum).
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The variant name, for logging.
    fn name(&self) -> &'static str;

    /// Human-readable description, for display.
    fn description(&self) -> &'static str;
}

crate::status_enum! {
    /// The system's threat-level output.
    ///
    /// Initial value is [`AlarmStatus::NoAlarm`]. There is no terminal status;
    /// every value can be re-entered.
    #[derive(Default)]
    pub enum AlarmStatus {
        #[default]
        NoAlarm => "Cool and Good",
        PendingAlarm => "I'm in Danger...",
        Alarm => "Awooga!",
    }
}

crate::status_enum! {
    /// User-selected arming mode.
    #[derive(Default)]
    pub enum ArmingStatus {
        #[default]
        Disarmed => "Disarmed",
        ArmedHome => "Armed - At Home",
        ArmedAway => "Armed - Away",
    }
}

impl ArmingStatus {
    /// Whether sensor or camera triggers can raise an alarm in this mode.
    pub fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}
