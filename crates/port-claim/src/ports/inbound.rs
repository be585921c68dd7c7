//! # Driving Port (Inbound API)
//!
//! The capability the reconciliation driver consumes: open or close one
//! port claim. The production implementation is the ledger
//! (`service::PortClaimLedger`); tests inject doubles. The handler is an
//! explicit injected value - there is no ambient process-wide instance to
//! swap.

use crate::domain::{ClaimError, PortClaim};

/// Open/close capability over local port claims.
///
/// # Thread Safety
///
/// Watch callbacks for distinct Services may run concurrently, so
/// implementations must be `Send + Sync`. Implementations linearize their
/// own state; callers hold no lock.
///
/// # Semantics
///
/// Both methods are strict about bookkeeping:
/// - `open` of an identity already held fails with
///   [`ClaimError::DuplicateClaim`] and leaves the held reservation
///   untouched (not idempotent).
/// - `close` of an identity not held fails with
///   [`ClaimError::UntrackedRelease`] rather than succeeding silently.
///
/// SCTP claims and claims for addresses that are not local to this node
/// are successful no-ops in both directions.
pub trait LocalPortHandler: Send + Sync {
    /// Reserve the claim's port, recording a live reservation.
    fn open(&self, claim: &PortClaim) -> Result<(), ClaimError>;

    /// Release the claim's reservation, if tracked.
    fn close(&self, claim: &PortClaim) -> Result<(), ClaimError>;
}
