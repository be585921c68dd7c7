//! Service Layer - The port claim ledger and the reconciliation driver
//!
//! `PortClaimLedger` owns the identity-to-reservation map and the OS
//! socket handles; `PortClaimManager` turns Service lifecycle events into
//! batches of ledger calls.

pub mod ledger;
pub mod reconcile;

pub use ledger::PortClaimLedger;
pub use reconcile::PortClaimManager;
