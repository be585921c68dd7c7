//! # Port Claim Subsystem
//!
//! Node-local reconciliation between a cluster's declared intent to expose
//! Service ports (NodePort, ExternalIP) and real, held-open listening
//! sockets on this host. Holding the sockets keeps every other process -
//! including the cluster's own dataplane - from binding those ports out
//! from under the Service.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - **Domain Layer:** wire-shaped Service types, pure claim extraction,
//!   claim identity, the local address catalog, the error taxonomy
//! - **Ports Layer:** trait seams - the open/close capability consumed by
//!   the driver, and the OS socket / event sink interfaces the host provides
//! - **Service Layer:** the claim ledger and the reconciliation driver
//! - **Adapters Layer:** real sockets, the in-memory double, failure
//!   reporters, the watch-event bridge, the JSON status report
//!
//! ```text
//! watch layer ──> PortClaimManager ──> claims_for_service
//!                        │                    │ (filtered by LocalAddressSet)
//!                        └──> PortClaimLedger ┴──> PortOpener ──> OS socket
//!                                    │
//!                                    └──> FailureReporter (open failures only)
//! ```
//!
//! ## Ledger rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | One reservation per identity | `open` inserts exactly one live socket per claim identity |
//! | No silent replace | `open` of a held identity fails, existing reservation untouched |
//! | No silent release | `close` of an absent identity fails (tracking inconsistency) |
//! | SCTP | never reserved; open/close succeed without touching the ledger |
//! | Non-local address | open/close succeed without touching the ledger |
//! | Failed OS close | error returned, ledger entry retained for a later retry |
//!
//! All open/close calls are linearized by one mutex held across the
//! underlying syscall. There is no periodic reconciliation against actual
//! OS socket state: if another process force-closes a reserved socket, the
//! divergence goes unnoticed until restart.
//!
//! ## Example
//!
//! ```rust
//! use port_claim::{
//!     claims_for_service, InMemoryPortOpener, LocalAddressSet, LocalPortHandler,
//!     PortClaimLedger, PortClaimManager, Protocol, Service, ServicePort, ServiceType,
//!     TracingFailureReporter,
//! };
//! use std::sync::Arc;
//!
//! let ledger = Arc::new(PortClaimLedger::new(
//!     LocalAddressSet::new(["10.0.0.4"]),
//!     Arc::new(InMemoryPortOpener::new()),
//!     Arc::new(TracingFailureReporter::new()),
//! ));
//! let manager = PortClaimManager::new(ledger.clone() as Arc<dyn LocalPortHandler>);
//!
//! let mut svc = Service::default();
//! svc.namespace = "ns1".to_string();
//! svc.name = "svcA".to_string();
//! svc.spec.service_type = ServiceType::NodePort;
//! svc.spec.ports = vec![ServicePort {
//!     name: String::new(),
//!     port: 8080,
//!     node_port: 30080,
//!     protocol: Protocol::Tcp,
//! }];
//!
//! assert!(manager.service_added(&svc).is_empty());
//! assert_eq!(ledger.active_claim_count(), 1);
//! assert!(manager.service_deleted(&svc).is_empty());
//! assert_eq!(ledger.active_claim_count(), 0);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Domain types
pub use domain::{
    claims_for_service, validate_claim, ClaimError, ClaimIdentity, LocalAddressSet, PortClaim,
    Protocol, Service, ServiceEvent, ServicePort, ServiceRef, ServiceSpec, ServiceType,
    EXTERNAL_IP_DESCRIPTION, NODE_PORT_DESCRIPTION,
};

// Port traits
pub use ports::{FailureReporter, LocalPortHandler, PortOpener, PortReservation};

// Service layer
pub use service::{PortClaimLedger, PortClaimManager};

// Adapters
pub use adapters::{
    claim_report_json, run_service_watch, ClaimReport, ClaimStatusEntry, InMemoryPortOpener,
    PortClaimEvent, RecordingFailureReporter, SocketPortOpener, TracingFailureReporter,
};
