//! Cross-component reconciliation scenarios.

pub mod lifecycle;
pub mod watch;

use port_claim::{
    FailureReporter, InMemoryPortOpener, LocalAddressSet, LocalPortHandler, PortClaimLedger,
    PortClaimManager, PortOpener, Protocol, RecordingFailureReporter, Service, ServicePort,
    ServiceType,
};
use std::sync::Arc;

/// Everything a scenario needs: the driver plus handles for inspection.
pub struct Harness {
    pub manager: PortClaimManager,
    pub ledger: Arc<PortClaimLedger>,
    pub opener: InMemoryPortOpener,
    pub reporter: Arc<RecordingFailureReporter>,
}

/// Wire a full stack over the in-memory opener and recording reporter.
pub fn harness(local_addrs: &[&str]) -> Harness {
    let opener = InMemoryPortOpener::new();
    let reporter = Arc::new(RecordingFailureReporter::new());
    let ledger = Arc::new(PortClaimLedger::new(
        LocalAddressSet::new(local_addrs.iter().copied()),
        Arc::new(opener.clone()) as Arc<dyn PortOpener>,
        Arc::clone(&reporter) as Arc<dyn FailureReporter>,
    ));
    let manager = PortClaimManager::new(Arc::clone(&ledger) as Arc<dyn LocalPortHandler>);
    Harness {
        manager,
        ledger,
        opener,
        reporter,
    }
}

/// A Service with one unnamed TCP port.
pub fn service(
    namespace: &str,
    name: &str,
    service_type: ServiceType,
    port: i32,
    node_port: i32,
) -> Service {
    let mut svc = Service::default();
    svc.namespace = namespace.to_string();
    svc.name = name.to_string();
    svc.spec.service_type = service_type;
    svc.spec.ports = vec![ServicePort {
        name: String::new(),
        port,
        node_port,
        protocol: Protocol::Tcp,
    }];
    svc
}
