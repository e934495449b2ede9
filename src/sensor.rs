//! Sensors: binary contact/presence detectors with identity and an
//! activation flag.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Kind of physical sensor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Door => "Door",
            Self::Window => "Window",
            Self::Motion => "Motion",
        };
        f.write_str(name)
    }
}

/// A sensor registered with the store.
///
/// Identity is `(name, sensor_type)`: equality, ordering, and hashing ignore
/// both the activation flag and the generated `id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sensor {
    id: Uuid,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create an inactive sensor with a fresh id.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// Same sensor with the activation flag set.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sensor_type == other.sensor_type
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}
