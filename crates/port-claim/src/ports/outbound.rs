//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this subsystem **requires** the host to
//! implement: the OS socket primitive and the failure event sink.

use crate::domain::{PortClaim, ServiceRef};
use std::fmt;
use std::io;

/// A live OS-level reservation: a bound/listening socket held open solely
/// so nothing else on the host can bind the same port.
///
/// Exclusively owned by the ledger entry that created it; released exactly
/// once by a successful [`close`](PortReservation::close), or reclaimed by
/// the OS at process termination if abandoned.
pub trait PortReservation: Send + fmt::Debug {
    /// Release the underlying socket.
    ///
    /// On failure the caller keeps the reservation and may retry later.
    fn close(&mut self) -> io::Result<()>;
}

/// Abstract interface for the OS-level open primitive.
///
/// The production implementation binds real sockets
/// (`adapters::SocketPortOpener`); tests use the in-memory double
/// (`adapters::InMemoryPortOpener`).
///
/// # Blocking
///
/// `open_port` is synchronous and is called with the ledger lock held, so
/// a stuck syscall stalls every claim, not just this one. No timeout is
/// imposed here.
pub trait PortOpener: Send + Sync {
    /// Bind the claim's (address, port, protocol) and hand back the live
    /// reservation.
    ///
    /// Only called for TCP and UDP claims; an empty claim address means
    /// all interfaces.
    fn open_port(&self, claim: &PortClaim) -> io::Result<Box<dyn PortReservation>>;
}

/// Abstract interface for surfacing claim failures to the cluster.
///
/// Invoked for failed opens only - failed closes are returned as errors
/// but emit no event, an asymmetry inherited from the source behavior.
pub trait FailureReporter: Send + Sync {
    /// Emit a warning event attached to the owning Service, plus a log
    /// line, for a port that could not be opened.
    fn report_open_failure(&self, owner: &ServiceRef, port: i32, error: &dyn fmt::Display);
}
