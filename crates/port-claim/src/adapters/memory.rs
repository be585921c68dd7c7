//! In-Memory Port Opener
//!
//! Test double for the OS socket primitive. Models the OS-level contention
//! key (address, port, protocol): a slot can be bound once, a second bind
//! fails like the OS would reject it. Open and close failures can be
//! injected per slot.

use crate::domain::{PortClaim, Protocol};
use crate::ports::{PortOpener, PortReservation};
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

/// What the OS would contend on, independent of claim descriptions.
type SlotKey = (String, i32, Protocol);

#[derive(Debug, Default)]
struct MemoryState {
    bound: HashSet<SlotKey>,
    open_failures: HashSet<SlotKey>,
    close_failures: HashSet<SlotKey>,
}

/// In-memory implementation of [`PortOpener`].
///
/// Cloning shares the underlying state, so a test can keep a handle for
/// inspection while the ledger owns another.
#[derive(Clone, Default)]
pub struct InMemoryPortOpener {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryPortOpener {
    /// Create an opener with no bound slots and no injected failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next open of this slot fail as if the OS refused the bind.
    pub fn fail_open(&self, address: &str, port: i32, protocol: Protocol) {
        self.lock()
            .open_failures
            .insert((address.to_string(), port, protocol));
    }

    /// Make closes of this slot's reservation fail.
    pub fn fail_close(&self, address: &str, port: i32, protocol: Protocol) {
        self.lock()
            .close_failures
            .insert((address.to_string(), port, protocol));
    }

    /// Stop failing closes of this slot's reservation.
    pub fn heal_close(&self, address: &str, port: i32, protocol: Protocol) {
        self.lock()
            .close_failures
            .remove(&(address.to_string(), port, protocol));
    }

    /// Whether the slot currently holds a bound reservation.
    pub fn is_bound(&self, address: &str, port: i32, protocol: &Protocol) -> bool {
        self.lock()
            .bound
            .contains(&(address.to_string(), port, protocol.clone()))
    }

    /// Number of currently bound slots.
    pub fn bound_count(&self) -> usize {
        self.lock().bound.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PortOpener for InMemoryPortOpener {
    fn open_port(&self, claim: &PortClaim) -> io::Result<Box<dyn PortReservation>> {
        let key: SlotKey = (claim.address.clone(), claim.port, claim.protocol.clone());
        let mut state = self.lock();
        if state.open_failures.contains(&key) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected open failure",
            ));
        }
        if !state.bound.insert(key.clone()) {
            return Err(io::Error::new(
                io::ErrorKind::AddrInUse,
                "address already in use",
            ));
        }
        Ok(Box::new(MemoryReservation {
            key,
            state: Arc::clone(&self.state),
        }))
    }
}

/// Reservation handed out by [`InMemoryPortOpener`]; releases its slot on
/// a successful close.
#[derive(Debug)]
struct MemoryReservation {
    key: SlotKey,
    state: Arc<Mutex<MemoryState>>,
}

impl PortReservation for MemoryReservation {
    fn close(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.close_failures.contains(&self.key) {
            return Err(io::Error::other("injected close failure"));
        }
        state.bound.remove(&self.key);
        Ok(())
    }
}
