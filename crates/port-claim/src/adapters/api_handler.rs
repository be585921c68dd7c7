//! Claim Status Report
//!
//! Read-only JSON view of the ledger for operator queries: which claim
//! identities currently hold a live reservation on this node.

use crate::domain::ClaimIdentity;
use crate::service::PortClaimLedger;
use serde::Serialize;

/// One held claim, as reported to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimStatusEntry {
    /// Claim description (origin and owning Service).
    pub description: String,
    /// Bind address; empty means all interfaces.
    pub address: String,
    /// Reserved port.
    pub port: i32,
    /// Transport protocol wire string.
    pub protocol: String,
}

impl From<ClaimIdentity> for ClaimStatusEntry {
    fn from(identity: ClaimIdentity) -> Self {
        Self {
            description: identity.description,
            address: identity.address,
            port: identity.port,
            protocol: identity.protocol.as_str().to_string(),
        }
    }
}

/// Snapshot of every reservation the ledger currently holds.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimReport {
    /// Held claims in sorted order.
    pub active_claims: Vec<ClaimStatusEntry>,
}

impl ClaimReport {
    /// Take a snapshot of the ledger.
    pub fn snapshot(ledger: &PortClaimLedger) -> Self {
        Self {
            active_claims: ledger
                .active_claims()
                .into_iter()
                .map(ClaimStatusEntry::from)
                .collect(),
        }
    }
}

/// Serialize a ledger snapshot for a status query response.
pub fn claim_report_json(ledger: &PortClaimLedger) -> serde_json::Result<String> {
    serde_json::to_string(&ClaimReport::snapshot(ledger))
}
