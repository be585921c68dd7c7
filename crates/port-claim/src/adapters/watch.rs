//! Watch Bridge
//!
//! Connects the out-of-scope watch/informer layer to the reconciliation
//! driver: Service lifecycle events arrive on a channel, each one drives a
//! reconciliation batch, and every collected error is logged
//! independently. No error stops the loop; the only exit is the watch
//! side closing the channel.

use crate::domain::{ClaimError, ServiceEvent, ServiceRef};
use crate::service::PortClaimManager;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Drain Service events, driving the port claim manager until the sender
/// side of the channel is dropped.
///
/// Callbacks for distinct Services may be spread across channels/tasks by
/// the caller; a single loop like this one preserves per-object ordering
/// from the source API.
pub async fn run_service_watch(manager: PortClaimManager, mut events: mpsc::Receiver<ServiceEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            ServiceEvent::Added(svc) => {
                let errors = manager.service_added(&svc);
                log_batch_errors("claiming ports", &svc.reference(), &errors);
            }
            ServiceEvent::Updated { old, new } => {
                let errors = manager.service_updated(&old, &new);
                log_batch_errors("updating port claims", &old.reference(), &errors);
            }
            ServiceEvent::Deleted(svc) => {
                let errors = manager.service_deleted(&svc);
                log_batch_errors("removing port claims", &svc.reference(), &errors);
            }
        }
    }
    debug!("Service event channel closed, stopping port claim watch");
}

fn log_batch_errors(action: &str, service: &ServiceRef, errors: &[ClaimError]) {
    for err in errors {
        error!(service = %service, error = %err, "Error {action} for service");
    }
}
