//! The alarm state machine: imperative shell around the pure core.
//!
//! Each operation reads the current statuses from the store, classifies the
//! input into an [`AlarmEvent`], asks the [`TransitionTable`] for the outcome,
//! and commits only real changes: write the store, record history, notify
//! listeners.
//!
//! ```text
//!  sensor toggle ─┐                       ┌──▶ SensorStore
//!  camera image ──┼─▶ classify ─▶ table ──┼──▶ StateHistory
//!  arming change ─┘                       └──▶ ListenerRegistry
//! ```

mod builder;
mod shared;

pub use builder::{BuildError, SecurityServiceBuilder};
pub use shared::SharedSecurityService;

use crate::config::SecurityConfig;
use crate::core::{
    AlarmEvent, AlarmStatus, ArmingStatus, State, StateHistory, StateTransition, TransitionTable,
};
use crate::detector::{CameraImage, CatDetector};
use crate::error::SecurityError;
use crate::listener::{ListenerRegistry, StatusListener};
use crate::sensor::Sensor;
use crate::store::SensorStore;
use chrono::Utc;
use std::sync::Arc;

/// Alarm state machine over a sensor store and a cat detector.
///
/// The service holds no alarm or arming status of its own; the store is the
/// single owner. The one piece of local state is the result of the most
/// recent [`process_image`](Self::process_image) call, consulted when the
/// system is later armed home.
pub struct SecurityService<St, D> {
    store: St,
    detector: D,
    listeners: ListenerRegistry,
    table: TransitionTable,
    config: SecurityConfig,
    cat_in_view: bool,
    history: StateHistory<AlarmStatus>,
}

impl<St: SensorStore, D: CatDetector> SecurityService<St, D> {
    /// Create a service with default configuration and the standard table.
    pub fn new(store: St, detector: D) -> Self {
        Self::from_parts(
            store,
            detector,
            SecurityConfig::default(),
            TransitionTable::standard(),
        )
    }

    pub fn builder() -> SecurityServiceBuilder<St, D> {
        SecurityServiceBuilder::new()
    }

    pub(crate) fn from_parts(
        store: St,
        detector: D,
        config: SecurityConfig,
        table: TransitionTable,
    ) -> Self {
        Self {
            store,
            detector,
            listeners: ListenerRegistry::new(),
            table,
            history: StateHistory::with_limit(config.history_limit),
            config,
            cat_in_view: false,
        }
    }

    /// Register a listener. Registering the same `Arc` again is a no-op.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        self.listeners.add(listener);
    }

    /// Unregister a listener. It receives nothing further.
    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.remove(listener);
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus, SecurityError> {
        Ok(self.store.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus, SecurityError> {
        Ok(self.store.arming_status()?)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>, SecurityError> {
        Ok(self.store.sensors()?)
    }

    /// Whether the most recently processed image contained a cat.
    pub fn cat_in_view(&self) -> bool {
        self.cat_in_view
    }

    /// Committed alarm status changes, oldest first.
    pub fn history(&self) -> &StateHistory<AlarmStatus> {
        &self.history
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Add a sensor to the store. Does not re-evaluate the alarm status.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), SecurityError> {
        tracing::debug!(sensor = %sensor, "Adding sensor");
        self.store.add_sensor(sensor)?;
        Ok(())
    }

    /// Remove a sensor from the store. Does not re-evaluate the alarm status.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), SecurityError> {
        tracing::debug!(sensor = %sensor, "Removing sensor");
        self.store.remove_sensor(sensor)?;
        Ok(())
    }

    /// Set a sensor's activation flag and re-evaluate the alarm status.
    ///
    /// The store's copy of the sensor (or `sensor` itself when the store
    /// does not know it) supplies the previous flag and is what gets
    /// persisted, so its id survives the update. The new flag is persisted
    /// before the alarm status is re-evaluated, whether or not it changes.
    ///
    /// Returns the alarm status after the event.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &Sensor,
        active: bool,
    ) -> Result<AlarmStatus, SecurityError> {
        let sensors = self.store.sensors()?;
        let subject = sensors
            .iter()
            .find(|stored| *stored == sensor)
            .cloned()
            .unwrap_or_else(|| sensor.clone());
        let was_active = subject.is_active();
        let others_active = sensors
            .iter()
            .any(|stored| stored != sensor && stored.is_active());

        // Flag first: a failed write must not leave the status ahead of it.
        self.store.update_sensor(&subject.with_active(active))?;
        tracing::debug!(sensor = %sensor, active, "Sensor activation persisted");

        let event = AlarmEvent::for_sensor(was_active, active, others_active);
        let status = self.apply(event)?;
        self.listeners.sensor_status_changed();

        Ok(status)
    }

    /// Run the detector on `image` and re-evaluate the alarm status.
    ///
    /// The detection result is cached for a later
    /// [`set_arming_status`](Self::set_arming_status) call. Listeners are
    /// told the detection result on every call.
    pub fn process_image(&mut self, image: &CameraImage) -> Result<AlarmStatus, SecurityError> {
        let detected = self
            .detector
            .contains_cat(image, self.config.confidence_threshold)?;
        self.cat_in_view = detected;

        let arming = self.store.arming_status()?;
        let any_active = self.store.sensors()?.iter().any(Sensor::is_active);

        let event = AlarmEvent::for_image(detected, arming, any_active);
        let status = self.apply(event)?;
        self.listeners.cat_detected(detected);

        Ok(status)
    }

    /// Persist a new arming status and apply its side effects.
    ///
    /// Arming (home or away) deactivates every sensor without running those
    /// resets through the activation rules. This happens on every call, even
    /// when the arming status is unchanged. Disarming forces `NoAlarm`;
    /// arming home while the cached detection shows a cat forces `Alarm`.
    pub fn set_arming_status(&mut self, arming: ArmingStatus) -> Result<AlarmStatus, SecurityError> {
        self.store.set_arming_status(arming)?;
        tracing::info!(arming = arming.name(), "Arming status set");

        if arming.is_armed() {
            self.reset_sensors()?;
        }

        let event = AlarmEvent::for_arming(arming, self.cat_in_view);
        self.apply(event)
    }

    fn reset_sensors(&mut self) -> Result<(), SecurityError> {
        let sensors = self.store.sensors()?;
        if sensors.is_empty() {
            return Ok(());
        }

        for sensor in sensors {
            self.store.update_sensor(&sensor.with_active(false))?;
        }
        tracing::debug!("All sensors reset to inactive");
        self.listeners.sensor_status_changed();
        Ok(())
    }

    /// Consult the table and commit the outcome if it changes the status.
    fn apply(&mut self, event: AlarmEvent) -> Result<AlarmStatus, SecurityError> {
        let current = self.store.alarm_status()?;
        let Some(next) = self.table.next(current, event) else {
            tracing::debug!(current = current.name(), ?event, "Alarm status unchanged");
            return Ok(current);
        };

        self.store.set_alarm_status(next)?;
        self.history = self.history.record(StateTransition {
            from: current,
            to: next,
            event,
            timestamp: Utc::now(),
        });
        tracing::info!(
            from = current.name(),
            to = next.name(),
            ?event,
            "Alarm status changed"
        );
        self.listeners.alarm_status_changed(next);

        Ok(next)
    }
}

impl<St, D> std::fmt::Debug for SecurityService<St, D>
where
    St: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityService")
            .field("store", &self.store)
            .field("listeners", &self.listeners)
            .field("config", &self.config)
            .field("cat_in_view", &self.cat_in_view)
            .finish_non_exhaustive()
    }
}
