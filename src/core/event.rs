//! Classified inputs to the alarm transition table.
//!
//! Every external event (sensor toggle, image processed, arming change) is
//! reduced to one [`AlarmEvent`] before the table is consulted. The
//! classification functions here are pure: they take the facts the service
//! has read from the store and detector and return the event kind.

use serde::{Deserialize, Serialize};

use super::state::ArmingStatus;

/// The event kinds the transition table is keyed by.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AlarmEvent {
    /// A sensor went from inactive to active.
    SensorActivated,
    /// An already-active sensor was activated again.
    SensorReactivated,
    /// A sensor went from active to inactive and no other sensor is active.
    LastSensorDeactivated,
    /// A sensor went from active to inactive while others remain active.
    SensorDeactivated,
    /// An already-inactive sensor was deactivated again.
    InactiveSensorDeactivated,
    /// The camera saw a cat while armed home.
    CatDetectedArmedHome,
    /// The camera saw a cat in any other arming mode.
    CatDetectedNotArmedHome,
    /// The camera saw no cat and no sensor is active.
    NoCatSensorsIdle,
    /// The camera saw no cat but some sensor is active.
    NoCatSensorsActive,
    /// The system was disarmed.
    Disarmed,
    /// The system was armed home while the last image showed a cat.
    ArmedHomeWithCat,
    /// The system was armed with no cat in view, or armed away.
    Armed,
}

impl AlarmEvent {
    /// Classify a sensor activation change.
    ///
    /// `others_active` is whether any sensor other than the subject is active
    /// in the store.
    pub fn for_sensor(was_active: bool, now_active: bool, others_active: bool) -> Self {
        match (was_active, now_active) {
            (false, true) => Self::SensorActivated,
            (true, true) => Self::SensorReactivated,
            (true, false) if others_active => Self::SensorDeactivated,
            (true, false) => Self::LastSensorDeactivated,
            (false, false) => Self::InactiveSensorDeactivated,
        }
    }

    /// Classify a detector result.
    pub fn for_image(cat_detected: bool, arming: ArmingStatus, any_sensor_active: bool) -> Self {
        match (cat_detected, arming) {
            (true, ArmingStatus::ArmedHome) => Self::CatDetectedArmedHome,
            (true, _) => Self::CatDetectedNotArmedHome,
            (false, _) if any_sensor_active => Self::NoCatSensorsActive,
            (false, _) => Self::NoCatSensorsIdle,
        }
    }

    /// Classify an arming change, given the cached cat detection result.
    pub fn for_arming(arming: ArmingStatus, cat_in_view: bool) -> Self {
        match arming {
            ArmingStatus::Disarmed => Self::Disarmed,
            ArmingStatus::ArmedHome if cat_in_view => Self::ArmedHomeWithCat,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => Self::Armed,
        }
    }

    /// Whether this event originates from a sensor toggle.
    pub fn is_sensor_event(self) -> bool {
        matches!(
            self,
            Self::SensorActivated
                | Self::SensorReactivated
                | Self::LastSensorDeactivated
                | Self::SensorDeactivated
                | Self::InactiveSensorDeactivated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_transitions_are_classified_by_edge() {
        assert_eq!(
            AlarmEvent::for_sensor(false, true, false),
            AlarmEvent::SensorActivated
        );
        assert_eq!(
            AlarmEvent::for_sensor(true, true, true),
            AlarmEvent::SensorReactivated
        );
        assert_eq!(
            AlarmEvent::for_sensor(true, false, false),
            AlarmEvent::LastSensorDeactivated
        );
        assert_eq!(
            AlarmEvent::for_sensor(true, false, true),
            AlarmEvent::SensorDeactivated
        );
        assert_eq!(
            AlarmEvent::for_sensor(false, false, true),
            AlarmEvent::InactiveSensorDeactivated
        );
    }

    #[test]
    fn cat_only_counts_when_armed_home() {
        assert_eq!(
            AlarmEvent::for_image(true, ArmingStatus::ArmedHome, false),
            AlarmEvent::CatDetectedArmedHome
        );
        assert_eq!(
            AlarmEvent::for_image(true, ArmingStatus::ArmedAway, false),
            AlarmEvent::CatDetectedNotArmedHome
        );
        assert_eq!(
            AlarmEvent::for_image(true, ArmingStatus::Disarmed, true),
            AlarmEvent::CatDetectedNotArmedHome
        );
    }

    #[test]
    fn no_cat_depends_on_sensor_activity() {
        assert_eq!(
            AlarmEvent::for_image(false, ArmingStatus::ArmedHome, false),
            AlarmEvent::NoCatSensorsIdle
        );
        assert_eq!(
            AlarmEvent::for_image(false, ArmingStatus::ArmedHome, true),
            AlarmEvent::NoCatSensorsActive
        );
    }

    #[test]
    fn arming_uses_cached_cat_only_for_armed_home() {
        assert_eq!(
            AlarmEvent::for_arming(ArmingStatus::Disarmed, true),
            AlarmEvent::Disarmed
        );
        assert_eq!(
            AlarmEvent::for_arming(ArmingStatus::ArmedHome, true),
            AlarmEvent::ArmedHomeWithCat
        );
        assert_eq!(
            AlarmEvent::for_arming(ArmingStatus::ArmedAway, true),
            AlarmEvent::Armed
        );
        assert_eq!(
            AlarmEvent::for_arming(ArmingStatus::ArmedHome, false),
            AlarmEvent::Armed
        );
    }

    #[test]
    fn sensor_events_are_flagged() {
        assert!(AlarmEvent::SensorActivated.is_sensor_event());
        assert!(AlarmEvent::InactiveSensorDeactivated.is_sensor_event());
        assert!(!AlarmEvent::Disarmed.is_sensor_event());
        assert!(!AlarmEvent::CatDetectedArmedHome.is_sensor_event());
    }
}
