//! Catpoint: the alarm-status state machine of a home security monitor.
//!
//! Catpoint combines sensor activation events, arming-mode changes, and
//! camera-based cat detection into a single alarm status, following the
//! "pure core, imperative shell" split:
//!
//! - **Core** ([`core`]): status values, event classification, the transition
//!   table as data, and immutable history. No I/O.
//! - **Shell** ([`service`]): reads the [`store`], runs the [`detector`],
//!   consults the core, commits changes, and notifies [`listener`]s.
//!
//! # Example
//!
//! ```rust
//! use catpoint::core::{AlarmStatus, ArmingStatus};
//! use catpoint::detector::{CameraImage, DetectorError};
//! use catpoint::sensor::{Sensor, SensorType};
//! use catpoint::service::SecurityService;
//! use catpoint::store::InMemorySensorStore;
//!
//! let detector = |_: &CameraImage, _: f32| -> Result<bool, DetectorError> { Ok(false) };
//! let mut service = SecurityService::new(InMemorySensorStore::new(), detector);
//!
//! let door = Sensor::new("Front door", SensorType::Door);
//! service.add_sensor(door.clone())?;
//! service.set_arming_status(ArmingStatus::ArmedAway)?;
//!
//! service.change_sensor_activation_status(&door, true)?;
//! assert_eq!(service.alarm_status()?, AlarmStatus::PendingAlarm);
//!
//! service.set_arming_status(ArmingStatus::Disarmed)?;
//! assert_eq!(service.alarm_status()?, AlarmStatus::NoAlarm);
//! # Ok::<(), catpoint::SecurityError>(())
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod detector;
pub mod error;
pub mod listener;
pub mod sensor;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::SecurityConfig;
pub use crate::core::{AlarmStatus, ArmingStatus, State};
pub use error::SecurityError;
pub use listener::StatusListener;
pub use sensor::{Sensor, SensorType};
pub use service::{SecurityService, SharedSecurityService};
pub use store::{InMemorySensorStore, SensorStore};
