//! Pure decision core of the alarm state machine.
//!
//! This module contains no I/O:
//! - Status values via the `State` trait
//! - Event classification
//! - The transition table as data
//! - Immutable transition history
//!
//! The [`service`](crate::service) module is the imperative shell that reads
//! the store, consults this core, and commits the outcome.

mod event;
mod history;
mod state;
mod table;

pub use event::AlarmEvent;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::{AlarmStatus, ArmingStatus, State};
pub use table::{StatusMatch, TransitionRule, TransitionTable};
