//! Domain Layer - Pure claim logic with no I/O
//!
//! This module contains the core port-claim model:
//! - Wire-shaped Service types (ports, external IPs, protocol)
//! - Claim extraction (Service spec -> ordered list of `PortClaim`)
//! - Claim identity used for duplicate detection in the ledger
//! - The immutable local address catalog
//! - The claim error taxonomy

pub mod claims;
pub mod entities;
pub mod errors;

pub use claims::*;
pub use entities::*;
pub use errors::*;
