//! Failure Reporters
//!
//! Production reporter emitting the `PortClaim` warning event as a
//! structured log line, and a recording double for asserting on emitted
//! events in tests. Open failures only; close failures never produce
//! events.

use crate::domain::ServiceRef;
use crate::ports::FailureReporter;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Event reason attached to every claim-failure warning.
pub const PORT_CLAIM_EVENT_REASON: &str = "PortClaim";

/// A warning event attached to the owning Service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortClaimEvent {
    /// Service the event is attached to.
    pub owner: ServiceRef,
    /// Port that could not be opened.
    pub port: i32,
    /// Event reason; always [`PORT_CLAIM_EVENT_REASON`].
    pub reason: &'static str,
    /// Human-readable message including the underlying error.
    pub message: String,
}

impl PortClaimEvent {
    fn new(owner: &ServiceRef, port: i32, error: &dyn fmt::Display) -> Self {
        Self {
            owner: owner.clone(),
            port,
            reason: PORT_CLAIM_EVENT_REASON,
            message: format!(
                "Service: {owner} requires port: {port} to be opened on node, \
                 but port cannot be opened, err: {error}"
            ),
        }
    }
}

/// Production reporter: warning-severity structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureReporter;

impl TracingFailureReporter {
    /// Create the reporter.
    pub fn new() -> Self {
        Self
    }
}

impl FailureReporter for TracingFailureReporter {
    fn report_open_failure(&self, owner: &ServiceRef, port: i32, error: &dyn fmt::Display) {
        let event = PortClaimEvent::new(owner, port, error);
        warn!(
            service = %event.owner,
            port = event.port,
            reason = event.reason,
            "{}",
            event.message
        );
    }
}

/// Recording reporter for tests: captures every emitted event.
#[derive(Debug, Default)]
pub struct RecordingFailureReporter {
    events: Mutex<Vec<PortClaimEvent>>,
}

impl RecordingFailureReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far.
    pub fn events(&self) -> Vec<PortClaimEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FailureReporter for RecordingFailureReporter {
    fn report_open_failure(&self, owner: &ServiceRef, port: i32, error: &dyn fmt::Display) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(PortClaimEvent::new(owner, port, error));
    }
}
