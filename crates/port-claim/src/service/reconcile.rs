//! Reconciliation Driver
//!
//! Turns Service lifecycle events into batches of ledger open/close calls.
//! Batches never short-circuit: every claim is attempted and every failure
//! is collected, so one bad port cannot stop the others.

use crate::domain::{claims_for_service, validate_claim, ClaimError, Service};
use crate::ports::LocalPortHandler;
use std::sync::Arc;
use tracing::debug;

/// Which direction a reconciliation batch drives the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClaimOp {
    Open,
    Close,
}

/// Drives the port claim ledger from Service lifecycle events.
///
/// Constructed once at startup with its handler injected, then handed by
/// reference to the watch registration; there is no process-wide mutable
/// instance.
#[derive(Clone)]
pub struct PortClaimManager {
    handler: Arc<dyn LocalPortHandler>,
}

impl PortClaimManager {
    /// Create a driver over the given open/close handler.
    pub fn new(handler: Arc<dyn LocalPortHandler>) -> Self {
        Self { handler }
    }

    /// Reconcile a Service addition: open every claim it requires.
    ///
    /// Returns every per-claim failure; an empty vector means the whole
    /// batch succeeded.
    pub fn service_added(&self, svc: &Service) -> Vec<ClaimError> {
        self.reconcile(svc, ClaimOp::Open)
    }

    /// Reconcile a Service deletion: close every claim it required.
    pub fn service_deleted(&self, svc: &Service) -> Vec<ClaimError> {
        self.reconcile(svc, ClaimOp::Close)
    }

    /// Reconcile a Service update.
    ///
    /// When `ports` and `externalIPs` are structurally equal between the
    /// two specs nothing happens at all. Any difference triggers a full
    /// close of every old-spec claim followed by a full open of every
    /// new-spec claim - including claims unchanged between the two. No
    /// incremental diff is attempted; the transient window without a held
    /// reservation for unchanged claims is accepted.
    pub fn service_updated(&self, old: &Service, new: &Service) -> Vec<ClaimError> {
        if old.spec.ports == new.spec.ports && old.spec.external_ips == new.spec.external_ips {
            return Vec::new();
        }
        let mut errors = self.service_deleted(old);
        errors.extend(self.service_added(new));
        errors
    }

    fn reconcile(&self, svc: &Service, op: ClaimOp) -> Vec<ClaimError> {
        let mut errors = Vec::new();
        for claim in claims_for_service(svc) {
            debug!(
                service = %claim.owner,
                description = %claim.description,
                port = claim.port,
                op = ?op,
                "Handling port claim"
            );
            if let Err(err) = validate_claim(&claim) {
                errors.push(err);
                continue;
            }
            let result = match op {
                ClaimOp::Open => self.handler.open(&claim),
                ClaimOp::Close => self.handler.close(&claim),
            };
            if let Err(err) = result {
                errors.push(err);
            }
        }
        errors
    }
}
