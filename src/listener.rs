//! Status listeners and their registry.
//!
//! Listeners are notified synchronously, in registration order, after each
//! committed change. Notification is fire-and-forget: a listener that returns
//! an error or panics is logged and skipped, and the rest still run.

use crate::core::AlarmStatus;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a listener.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Listener failed: {message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Observer of alarm, camera, and sensor changes.
pub trait StatusListener: Send + Sync {
    /// The alarm status changed to `status`.
    fn notify(&self, status: AlarmStatus) -> Result<(), ListenerError>;

    /// An image was processed.
    fn cat_detected(&self, _detected: bool) -> Result<(), ListenerError> {
        Ok(())
    }

    /// One or more sensors changed activation.
    fn sensor_status_changed(&self) -> Result<(), ListenerError>;
}

/// Ordered collection of listeners, unique by `Arc` identity.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Arc<dyn StatusListener>>,
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.listeners.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Registering the same `Arc` twice is a no-op.
    pub fn add(&mut self, listener: Arc<dyn StatusListener>) {
        if !self.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Unregister a listener. Removing an unknown listener is a no-op.
    pub fn remove(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners
            .retain(|registered| !same_listener(registered, listener));
    }

    pub fn contains(&self, listener: &Arc<dyn StatusListener>) -> bool {
        self.listeners
            .iter()
            .any(|registered| same_listener(registered, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn alarm_status_changed(&self, status: AlarmStatus) {
        self.broadcast("notify", |listener| listener.notify(status));
    }

    pub fn cat_detected(&self, detected: bool) {
        self.broadcast("cat_detected", |listener| listener.cat_detected(detected));
    }

    pub fn sensor_status_changed(&self) {
        self.broadcast("sensor_status_changed", |listener| {
            listener.sensor_status_changed()
        });
    }

    /// Invoke `call` on every listener, logging and skipping failures.
    fn broadcast<F>(&self, kind: &'static str, call: F)
    where
        F: Fn(&dyn StatusListener) -> Result<(), ListenerError>,
    {
        for (index, listener) in self.listeners.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| call(listener.as_ref()))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::warn!(listener = index, kind, error = %error, "Listener returned an error");
                }
                Err(_) => {
                    tracing::warn!(listener = index, kind, "Listener panicked");
                }
            }
        }
    }
}

fn same_listener(a: &Arc<dyn StatusListener>, b: &Arc<dyn StatusListener>) -> bool {
    ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
