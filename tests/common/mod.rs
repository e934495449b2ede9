//! Shared fakes for integration tests.

#![allow(dead_code)]

use catpoint::core::{AlarmStatus, ArmingStatus};
use catpoint::detector::{CameraImage, CatDetector, DetectorError};
use catpoint::listener::{ListenerError, StatusListener};
use catpoint::sensor::{Sensor, SensorType};
use catpoint::store::{InMemorySensorStore, SensorStore, StoreError};
use catpoint::SecurityService;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Detector whose answer can be flipped after it is handed to a service.
#[derive(Clone, Default)]
pub struct CatSwitch {
    cat: Arc<AtomicBool>,
    thresholds: Arc<Mutex<Vec<f32>>>,
}

impl CatSwitch {
    pub fn set(&self, cat: bool) {
        self.cat.store(cat, Ordering::SeqCst);
    }

    pub fn thresholds(&self) -> Vec<f32> {
        self.thresholds.lock().clone()
    }
}

impl CatDetector for CatSwitch {
    fn contains_cat(&self, _image: &CameraImage, threshold: f32) -> Result<bool, DetectorError> {
        self.thresholds.lock().push(threshold);
        Ok(self.cat.load(Ordering::SeqCst))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Alarm(AlarmStatus),
    Cat(bool),
    SensorsChanged,
}

/// Listener that records everything it is told.
#[derive(Default)]
pub struct RecordingListener {
    received: Mutex<Vec<Notification>>,
}

impl RecordingListener {
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    pub fn alarms(&self) -> Vec<AlarmStatus> {
        self.received()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Alarm(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl StatusListener for RecordingListener {
    fn notify(&self, status: AlarmStatus) -> Result<(), ListenerError> {
        self.received.lock().push(Notification::Alarm(status));
        Ok(())
    }

    fn cat_detected(&self, detected: bool) -> Result<(), ListenerError> {
        self.received.lock().push(Notification::Cat(detected));
        Ok(())
    }

    fn sensor_status_changed(&self) -> Result<(), ListenerError> {
        self.received.lock().push(Notification::SensorsChanged);
        Ok(())
    }
}

/// Listener that always fails.
pub struct BrokenListener;

impl StatusListener for BrokenListener {
    fn notify(&self, _status: AlarmStatus) -> Result<(), ListenerError> {
        Err(ListenerError::new("screen unplugged"))
    }

    fn sensor_status_changed(&self) -> Result<(), ListenerError> {
        panic!("sensor panel crashed")
    }
}

/// Store that refuses every call.
#[derive(Default)]
pub struct UnreachableStore;

impl SensorStore for UnreachableStore {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn set_alarm_status(&mut self, _status: AlarmStatus) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("database offline".to_string()))
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn set_arming_status(&mut self, _status: ArmingStatus) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("database offline".to_string()))
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn add_sensor(&mut self, _sensor: Sensor) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("database offline".to_string()))
    }

    fn remove_sensor(&mut self, _sensor: &Sensor) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("database offline".to_string()))
    }

    fn update_sensor(&mut self, _sensor: &Sensor) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("database offline".to_string()))
    }
}

/// In-memory store whose sensor updates always fail.
#[derive(Default)]
pub struct StuckSensorsStore {
    inner: InMemorySensorStore,
}

impl SensorStore for StuckSensorsStore {
    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StoreError> {
        self.inner.set_alarm_status(status)
    }

    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        self.inner.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StoreError> {
        self.inner.set_arming_status(status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        self.inner.sensors()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), StoreError> {
        self.inner.add_sensor(sensor)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), StoreError> {
        self.inner.remove_sensor(sensor)
    }

    fn update_sensor(&mut self, _sensor: &Sensor) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed("sensor table locked".to_string()))
    }
}

pub type TestService = SecurityService<InMemorySensorStore, CatSwitch>;

pub fn image() -> CameraImage {
    CameraImage::new(2, 2, vec![0; 4])
}

pub fn door() -> Sensor {
    Sensor::new("Front door", SensorType::Door)
}

pub fn window() -> Sensor {
    Sensor::new("Back window", SensorType::Window)
}

pub fn motion() -> Sensor {
    Sensor::new("Hallway", SensorType::Motion)
}

/// Service over an empty in-memory store with the given initial statuses.
pub fn service_with(alarm: AlarmStatus, arming: ArmingStatus) -> (TestService, CatSwitch) {
    let mut store = InMemorySensorStore::new();
    store.set_alarm_status(alarm).unwrap();
    store.set_arming_status(arming).unwrap();
    let detector = CatSwitch::default();
    (SecurityService::new(store, detector.clone()), detector)
}
