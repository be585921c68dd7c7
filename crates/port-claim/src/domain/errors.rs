//! Claim Error Taxonomy
//!
//! Every per-claim failure is one of these kinds. Batches never
//! short-circuit on them: the reconciliation driver collects every error
//! and hands the complete list back to its caller. None of them is fatal
//! to the process.

use crate::domain::entities::{Protocol, ServiceRef};
use thiserror::Error;

/// A failure affecting a single port claim.
///
/// OS error text is carried as a plain string so the enum stays
/// `Clone + PartialEq` for batch assertions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// The declared port fails range validation; the claim is skipped and
    /// the rest of the batch continues.
    #[error("invalid service port for svc: {owner}, err: port {port}/{protocol} out of range 1-65535")]
    InvalidPort {
        /// Owning Service.
        owner: ServiceRef,
        /// Declared port value.
        port: i32,
        /// Declared protocol.
        protocol: Protocol,
    },

    /// The protocol is none of TCP, UDP, or SCTP; nothing is opened.
    #[error("unknown protocol {protocol:?} for svc: {owner}")]
    UnsupportedProtocol {
        /// Owning Service.
        owner: ServiceRef,
        /// The unrecognized protocol string.
        protocol: String,
    },

    /// `open` was called for an identity the ledger already holds; the
    /// existing reservation is untouched.
    #[error("error try to open socket for svc: {owner} on port: {port} again")]
    DuplicateClaim {
        /// Owning Service.
        owner: ServiceRef,
        /// Requested port.
        port: i32,
    },

    /// The OS refused the bind (port in use, permission); no reservation
    /// was recorded.
    #[error("error opening socket for svc: {owner} on port: {port}, err: {reason}")]
    ReservationUnavailable {
        /// Owning Service.
        owner: ServiceRef,
        /// Requested port.
        port: i32,
        /// Underlying OS error text.
        reason: String,
    },

    /// `close` was called for an identity the ledger does not hold; this
    /// signals a tracking inconsistency rather than succeeding silently.
    #[error("error closing socket for svc: {owner} on port: {port}, port was never opened...?")]
    UntrackedRelease {
        /// Owning Service.
        owner: ServiceRef,
        /// Requested port.
        port: i32,
    },

    /// The OS-level close failed. The ledger entry is intentionally
    /// retained so the release can be retried by a later event; until
    /// then a re-open of the same identity reports `DuplicateClaim`.
    #[error("error closing socket for svc: {owner} on port: {port}, err: {reason}")]
    ReleaseFailure {
        /// Owning Service.
        owner: ServiceRef,
        /// Requested port.
        port: i32,
        /// Underlying OS error text.
        reason: String,
    },
}

impl ClaimError {
    /// The Service this failure is attributed to.
    pub fn owner(&self) -> &ServiceRef {
        match self {
            Self::InvalidPort { owner, .. }
            | Self::UnsupportedProtocol { owner, .. }
            | Self::DuplicateClaim { owner, .. }
            | Self::ReservationUnavailable { owner, .. }
            | Self::UntrackedRelease { owner, .. }
            | Self::ReleaseFailure { owner, .. } => owner,
        }
    }
}
