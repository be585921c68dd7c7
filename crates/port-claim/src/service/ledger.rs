//! Port Claim Ledger
//!
//! The authoritative in-memory map from claim identity to live OS socket
//! reservation, guarded by a single mutex held for the full duration of
//! each open/close call, including the underlying syscall. That lock
//! linearizes all claim operations globally regardless of which Service
//! triggered them - a deliberate trade of throughput for a simple,
//! verifiable mutual-exclusion discipline.

use crate::domain::{ClaimError, ClaimIdentity, LocalAddressSet, PortClaim, Protocol};
use crate::ports::{FailureReporter, LocalPortHandler, PortOpener, PortReservation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Concurrency-safe store of live port reservations.
///
/// Invariants:
/// - every identity in the map holds exactly one live reservation, opened
///   by exactly one successful `open` not yet matched by a successful
///   `close`;
/// - `open` of a held identity fails without touching existing state;
/// - `close` of an absent identity fails rather than succeeding silently;
/// - SCTP claims and claims for non-local addresses never enter the map.
pub struct PortClaimLedger {
    /// Node addresses snapshot; filters which ExternalIP claims apply here.
    local_addrs: LocalAddressSet,
    /// OS-level open primitive.
    opener: Arc<dyn PortOpener>,
    /// Sink for open-failure warning events.
    reporter: Arc<dyn FailureReporter>,
    /// Identity -> live reservation. The sole shared mutable state; every
    /// access goes through this one lock.
    active: Mutex<HashMap<ClaimIdentity, Box<dyn PortReservation>>>,
}

impl PortClaimLedger {
    /// Create a ledger with its collaborators injected explicitly.
    pub fn new(
        local_addrs: LocalAddressSet,
        opener: Arc<dyn PortOpener>,
        reporter: Arc<dyn FailureReporter>,
    ) -> Self {
        Self {
            local_addrs,
            opener,
            reporter,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Number of reservations currently held.
    pub fn active_claim_count(&self) -> usize {
        self.lock_active().len()
    }

    /// Identities of all currently held reservations, sorted.
    pub fn active_claims(&self) -> Vec<ClaimIdentity> {
        let mut claims: Vec<ClaimIdentity> = self.lock_active().keys().cloned().collect();
        claims.sort();
        claims
    }

    /// Whether a claim for a non-wildcard address concerns this node.
    fn is_local(&self, claim: &PortClaim) -> bool {
        claim.address.is_empty() || self.local_addrs.contains(&claim.address)
    }

    fn lock_active(&self) -> MutexGuard<'_, HashMap<ClaimIdentity, Box<dyn PortReservation>>> {
        // A panicked holder leaves the map consistent: entries are only
        // inserted/removed after the corresponding syscall completed.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocalPortHandler for PortClaimLedger {
    fn open(&self, claim: &PortClaim) -> Result<(), ClaimError> {
        debug!(
            service = %claim.owner,
            port = claim.port,
            protocol = %claim.protocol,
            "Opening socket for service"
        );

        // SCTP reservations are never materialized: platform SCTP support
        // lacks the needed socket primitives.
        if claim.protocol == Protocol::Sctp {
            return Ok(());
        }
        if !self.is_local(claim) {
            debug!(
                address = %claim.address,
                "Address is not one of the node's local addresses, skipping claim"
            );
            return Ok(());
        }
        if let Protocol::Unknown(protocol) = &claim.protocol {
            let err = ClaimError::UnsupportedProtocol {
                owner: claim.owner.clone(),
                protocol: protocol.clone(),
            };
            self.reporter
                .report_open_failure(&claim.owner, claim.port, &err);
            return Err(err);
        }

        let identity = claim.identity();
        let mut active = self.lock_active();
        if active.contains_key(&identity) {
            return Err(ClaimError::DuplicateClaim {
                owner: claim.owner.clone(),
                port: claim.port,
            });
        }
        // The bind/listen syscall runs under the lock; per the concurrency
        // model the whole ledger waits on it.
        match self.opener.open_port(claim) {
            Ok(reservation) => {
                debug!(
                    description = %claim.description,
                    address = %claim.address,
                    port = claim.port,
                    protocol = %claim.protocol,
                    "Socket reserved"
                );
                active.insert(identity, reservation);
                Ok(())
            }
            Err(err) => {
                self.reporter
                    .report_open_failure(&claim.owner, claim.port, &err);
                Err(ClaimError::ReservationUnavailable {
                    owner: claim.owner.clone(),
                    port: claim.port,
                    reason: err.to_string(),
                })
            }
        }
    }

    fn close(&self, claim: &PortClaim) -> Result<(), ClaimError> {
        debug!(
            service = %claim.owner,
            port = claim.port,
            protocol = %claim.protocol,
            "Closing socket claimed for service"
        );

        // Symmetric no-op for SCTP and any other non-openable protocol.
        if !claim.protocol.is_openable() {
            return Ok(());
        }
        if !self.is_local(claim) {
            debug!(
                address = %claim.address,
                "Address is not one of the node's local addresses, skipping release"
            );
            return Ok(());
        }

        let identity = claim.identity();
        let mut active = self.lock_active();
        match active.get_mut(&identity) {
            None => Err(ClaimError::UntrackedRelease {
                owner: claim.owner.clone(),
                port: claim.port,
            }),
            Some(reservation) => {
                if let Err(err) = reservation.close() {
                    // Entry intentionally retained: the reservation may
                    // still hold the socket, and a later close can retry.
                    return Err(ClaimError::ReleaseFailure {
                        owner: claim.owner.clone(),
                        port: claim.port,
                        reason: err.to_string(),
                    });
                }
                active.remove(&identity);
                Ok(())
            }
        }
    }
}
