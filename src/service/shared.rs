//! Thread-safe handle to a [`SecurityService`].
//!
//! Every operation takes the lock for its whole read-decide-write-notify
//! sequence, so concurrent events never interleave mid-decision. Listeners
//! run while the lock is held and must not call back into the handle.

use crate::core::{AlarmStatus, ArmingStatus};
use crate::detector::{CameraImage, CatDetector};
use crate::error::SecurityError;
use crate::listener::StatusListener;
use crate::sensor::Sensor;
use crate::service::SecurityService;
use crate::store::SensorStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, mutex-serialized service handle.
pub struct SharedSecurityService<St, D> {
    inner: Arc<Mutex<SecurityService<St, D>>>,
}

impl<St, D> Clone for SharedSecurityService<St, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<St: SensorStore, D: CatDetector> SharedSecurityService<St, D> {
    pub fn new(service: SecurityService<St, D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn change_sensor_activation_status(
        &self,
        sensor: &Sensor,
        active: bool,
    ) -> Result<AlarmStatus, SecurityError> {
        self.inner
            .lock()
            .change_sensor_activation_status(sensor, active)
    }

    pub fn process_image(&self, image: &CameraImage) -> Result<AlarmStatus, SecurityError> {
        self.inner.lock().process_image(image)
    }

    pub fn set_arming_status(&self, arming: ArmingStatus) -> Result<AlarmStatus, SecurityError> {
        self.inner.lock().set_arming_status(arming)
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<(), SecurityError> {
        self.inner.lock().add_sensor(sensor)
    }

    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<(), SecurityError> {
        self.inner.lock().remove_sensor(sensor)
    }

    pub fn add_status_listener(&self, listener: Arc<dyn StatusListener>) {
        self.inner.lock().add_status_listener(listener);
    }

    pub fn remove_status_listener(&self, listener: &Arc<dyn StatusListener>) {
        self.inner.lock().remove_status_listener(listener);
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus, SecurityError> {
        self.inner.lock().alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus, SecurityError> {
        self.inner.lock().arming_status()
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>, SecurityError> {
        self.inner.lock().sensors()
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut SecurityService<St, D>) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}
