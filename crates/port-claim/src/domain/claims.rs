//! Claim Extraction
//!
//! Pure mapping from a Service spec to the ordered list of port claims it
//! requires, plus per-claim validation. No I/O and no ledger access here;
//! the reconciliation driver decides what to do with the claims.

use crate::domain::entities::{PortClaim, Service};
use crate::domain::errors::ClaimError;

/// Description prefix for claims originating from a node port.
pub const NODE_PORT_DESCRIPTION: &str = "nodePort for";

/// Description prefix for claims originating from an external IP.
pub const EXTERNAL_IP_DESCRIPTION: &str = "externalIP for";

/// Derive the claims a Service requires, in declaration order.
///
/// A Service without NodePort exposure and without external IPs requires
/// nothing. For each declared port:
/// - NodePort exposure yields one all-interfaces claim on the node port;
/// - each external IP yields one claim on the container-facing port,
///   bound to that specific address.
///
/// Claims are returned unvalidated; see [`validate_claim`].
pub fn claims_for_service(svc: &Service) -> Vec<PortClaim> {
    let mut claims = Vec::new();
    if !svc.has_node_port() && svc.spec.external_ips.is_empty() {
        return claims;
    }

    let owner = svc.reference();
    for svc_port in &svc.spec.ports {
        if svc.has_node_port() {
            claims.push(PortClaim {
                description: describe(NODE_PORT_DESCRIPTION, svc, &svc_port.name),
                address: String::new(),
                port: svc_port.node_port,
                protocol: svc_port.protocol.clone(),
                owner: owner.clone(),
            });
        }
        for external_ip in &svc.spec.external_ips {
            claims.push(PortClaim {
                description: describe(EXTERNAL_IP_DESCRIPTION, svc, &svc_port.name),
                address: external_ip.clone(),
                port: svc_port.port,
                protocol: svc_port.protocol.clone(),
                owner: owner.clone(),
            });
        }
    }
    claims
}

/// Check a claim before it is committed to the ledger.
///
/// Ports must be in 1-65535. Protocol checks happen later, at the ledger,
/// because SCTP and non-local addresses are valid no-ops rather than
/// validation failures.
pub fn validate_claim(claim: &PortClaim) -> Result<(), ClaimError> {
    if claim.port < 1 || claim.port > 65535 {
        return Err(ClaimError::InvalidPort {
            owner: claim.owner.clone(),
            port: claim.port,
            protocol: claim.protocol.clone(),
        });
    }
    Ok(())
}

/// Format a claim description.
///
/// The port name is appended only when non-empty, disambiguating
/// multi-port Services: `"nodePort for ns/name[:portName]"`.
fn describe(prefix: &str, svc: &Service, port_name: &str) -> String {
    if port_name.is_empty() {
        format!("{} {}/{}", prefix, svc.namespace, svc.name)
    } else {
        format!("{} {}/{}:{}", prefix, svc.namespace, svc.name, port_name)
    }
}
