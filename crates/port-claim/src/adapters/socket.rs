//! Socket Port Opener
//!
//! Production implementation of the OS-level open primitive. Reservations
//! are plain `std::net` sockets held open and never read from: their only
//! job is to make the port unavailable to everything else on the host.
//!
//! Binding is synchronous on purpose - the ledger calls this under its
//! lock, so an async socket type would buy nothing here.

use crate::domain::{PortClaim, Protocol};
use crate::ports::{PortOpener, PortReservation};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener, UdpSocket};
use tracing::debug;

/// Opens real OS sockets for TCP and UDP claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketPortOpener;

impl SocketPortOpener {
    /// Create the opener.
    pub fn new() -> Self {
        Self
    }
}

impl PortOpener for SocketPortOpener {
    fn open_port(&self, claim: &PortClaim) -> io::Result<Box<dyn PortReservation>> {
        let ip: IpAddr = if claim.address.is_empty() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            claim.address.parse().map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid bind address {:?}: {}", claim.address, err),
                )
            })?
        };
        let port = u16::try_from(claim.port).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("port {} out of range", claim.port),
            )
        })?;
        let addr = SocketAddr::new(ip, port);

        let socket = match claim.protocol {
            Protocol::Tcp => BoundSocket::Tcp(TcpListener::bind(addr)?),
            Protocol::Udp => BoundSocket::Udp(UdpSocket::bind(addr)?),
            ref other => {
                // The ledger filters SCTP and unknown protocols before the
                // opener; reaching this arm is a caller bug.
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("cannot reserve a {} socket", other),
                ));
            }
        };
        debug!(address = %addr, protocol = %claim.protocol, "Bound reservation socket");
        Ok(Box::new(SocketReservation {
            socket: Some(socket),
        }))
    }
}

#[derive(Debug)]
enum BoundSocket {
    Tcp(TcpListener),
    Udp(UdpSocket),
}

/// A held-open socket; dropping it releases the port.
#[derive(Debug)]
struct SocketReservation {
    socket: Option<BoundSocket>,
}

impl PortReservation for SocketReservation {
    fn close(&mut self) -> io::Result<()> {
        // std sockets release on drop and cannot report close errors.
        if let Some(socket) = self.socket.take() {
            let addr = match &socket {
                BoundSocket::Tcp(listener) => listener.local_addr(),
                BoundSocket::Udp(socket) => socket.local_addr(),
            };
            if let Ok(addr) = addr {
                debug!(address = %addr, "Released reservation socket");
            }
        }
        Ok(())
    }
}
