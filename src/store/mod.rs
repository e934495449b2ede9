//! The sensor store: durable owner of sensors and both status values.
//!
//! The state machine never holds status as ambient state; it reads and writes
//! through [`SensorStore`]. Swapping the implementation (for a fake in tests
//! or a database-backed store) does not touch the rules.

mod snapshot;

pub use snapshot::{SnapshotError, StoreSnapshot, SNAPSHOT_VERSION};

use crate::core::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be reached
    #[error("Sensor store unavailable: {0}")]
    Unavailable(String),

    /// A write was rejected by the backing storage
    #[error("Sensor store write failed: {0}")]
    WriteFailed(String),
}

/// Get/set contract for sensors, alarm status, and arming status.
pub trait SensorStore {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError>;

    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError>;

    /// All sensors, ordered by identity.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;

    /// Add a sensor. Adding an identity that is already present is a no-op.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError>;

    /// Remove the sensor with this identity, if present.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;

    /// Persist the sensor's activation flag, inserting it if unknown.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError>;
}

/// Process-local store. Never fails.
#[derive(Clone, Debug, Default)]
pub struct InMemorySensorStore {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeSet<Sensor>,
}

impl InMemorySensorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(
            self.alarm_status,
            self.arming_status,
            self.sensors.iter().cloned().collect(),
        )
    }

    /// Rebuild a store from a snapshot.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        Ok(Self {
            alarm_status: snapshot.alarm_status,
            arming_status: snapshot.arming_status,
            sensors: snapshot.sensors.into_iter().collect(),
        })
    }
}

impl SensorStore for InMemorySensorStore {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.sensors.iter().cloned().collect())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.sensors.insert(sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.sensors.remove(sensor);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.sensors.replace(sensor.clone());
        Ok(())
    }
}
