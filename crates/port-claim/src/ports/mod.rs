//! Ports Layer - Trait seams between the claim logic and the host
//!
//! - `inbound`: the two-method open/close capability the reconciliation
//!   driver is written against.
//! - `outbound`: what this subsystem requires from the host - the OS
//!   socket primitive and the failure event sink.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
