//! Core Domain Entities for Port Claiming
//!
//! These types mirror the wire shape of a cluster Service closely enough
//! that a watch layer can deserialize straight into them, while staying
//! plain values the rest of the crate can reason about without I/O.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifies the Service that owns a claim.
///
/// Copied from the triggering Service object and carried on every claim so
/// errors and warning events can be attributed to the right Service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceRef {
    /// Namespace of the owning Service.
    pub namespace: String,
    /// Name of the owning Service.
    pub name: String,
}

impl ServiceRef {
    /// Create a reference from namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Transport protocol of a Service port.
///
/// The API carries protocols as free-form strings, so unrecognized values
/// must stay representable: they flow through extraction and surface as
/// `UnsupportedProtocol` at open time instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    /// TCP - reserved with a listening socket.
    Tcp,
    /// UDP - reserved with a bound socket.
    Udp,
    /// SCTP - never reserved; the platform lacks the needed socket
    /// primitives, so SCTP claims are accepted and skipped.
    Sctp,
    /// Any protocol string this agent does not recognize.
    Unknown(String),
}

impl Protocol {
    /// The wire string for this protocol.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
            Self::Unknown(other) => other,
        }
    }

    /// Whether this protocol can be materialized as an OS socket.
    ///
    /// Only TCP and UDP reservations are ever opened; everything else is
    /// either skipped (SCTP) or rejected (unknown).
    pub fn is_openable(&self) -> bool {
        matches!(self, Self::Tcp | Self::Udp)
    }
}

impl From<&str> for Protocol {
    fn from(value: &str) -> Self {
        match value {
            "TCP" => Self::Tcp,
            "UDP" => Self::Udp,
            "SCTP" => Self::Sctp,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Protocol {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Protocol> for String {
    fn from(value: Protocol) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::Tcp
    }
}

/// Service exposure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    /// Cluster-internal virtual IP only.
    #[serde(rename = "ClusterIP")]
    ClusterIp,
    /// Exposed on a cluster-wide port of every node.
    NodePort,
    /// NodePort plus an external load balancer.
    LoadBalancer,
    /// DNS alias, no ports of its own.
    ExternalName,
}

impl ServiceType {
    /// Whether Services of this type allocate node ports.
    pub fn has_node_port(&self) -> bool {
        matches!(self, Self::NodePort | Self::LoadBalancer)
    }
}

impl Default for ServiceType {
    fn default() -> Self {
        Self::ClusterIp
    }
}

/// A single declared port of a Service spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePort {
    /// Port name; empty unless the Service declares multiple named ports.
    pub name: String,
    /// Container-facing port, claimed for each external IP.
    pub port: i32,
    /// Cluster-wide node port, claimed on all interfaces.
    ///
    /// Ports are `i32` as on the wire: out-of-range values must be
    /// representable so validation can report them as `InvalidPort`.
    pub node_port: i32,
    /// Declared transport protocol.
    pub protocol: Protocol,
}

/// The port-relevant slice of a Service spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    /// Exposure type of the Service.
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    /// Declared ports, in declaration order.
    pub ports: Vec<ServicePort>,
    /// Addresses outside the cluster network that should serve this
    /// Service; only those local to this node are acted on.
    #[serde(rename = "externalIPs")]
    pub external_ips: Vec<String>,
}

/// A Service object as delivered by the watch layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Namespace of the Service.
    pub namespace: String,
    /// Name of the Service.
    pub name: String,
    /// Port-relevant spec fields.
    pub spec: ServiceSpec,
}

impl Service {
    /// Reference to this Service for claim ownership.
    pub fn reference(&self) -> ServiceRef {
        ServiceRef::new(self.namespace.clone(), self.name.clone())
    }

    /// Whether this Service allocates node ports.
    pub fn has_node_port(&self) -> bool {
        self.spec.service_type.has_node_port()
    }
}

/// Logical intent to reserve one (address, port, protocol) for a Service.
///
/// Derived fresh from a Service object on every event; never persisted
/// independently of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortClaim {
    /// Human label distinguishing NodePort from ExternalIP origin and,
    /// for multi-port Services, which named port.
    pub description: String,
    /// Bind address; empty means all interfaces.
    pub address: String,
    /// Port to reserve.
    pub port: i32,
    /// Transport protocol.
    pub protocol: Protocol,
    /// Service this claim belongs to.
    pub owner: ServiceRef,
}

impl PortClaim {
    /// The ledger key for this claim.
    pub fn identity(&self) -> ClaimIdentity {
        ClaimIdentity {
            description: self.description.clone(),
            address: self.address.clone(),
            port: self.port,
            protocol: self.protocol.clone(),
        }
    }
}

/// Ledger key used for duplicate detection.
///
/// The description participates in identity: two claims that are identical
/// at the OS level but differently described are distinct ledger entries,
/// and the second one fails at bind time rather than at duplicate
/// detection. Collapsing identity to (address, port, protocol) would be a
/// behavior change and is deliberately not made here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimIdentity {
    /// Claim description (part of the key, see above).
    pub description: String,
    /// Bind address; empty means all interfaces.
    pub address: String,
    /// Reserved port.
    pub port: i32,
    /// Transport protocol.
    pub protocol: Protocol,
}

/// Read-only catalog of the node's own IP addresses.
///
/// Built once at startup from the out-of-scope address enumeration
/// collaborator. Addresses added to the node later are invisible here for
/// the remainder of the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct LocalAddressSet {
    addrs: HashSet<String>,
}

impl LocalAddressSet {
    /// Build the catalog from an address enumeration snapshot.
    pub fn new<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addrs: addrs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the given IP string is one of this node's addresses.
    pub fn contains(&self, address: &str) -> bool {
        self.addrs.contains(address)
    }

    /// Number of catalogued addresses.
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }
}

/// Service lifecycle event delivered by the watch layer.
///
/// Per-object ordering is assumed from the source API; no ordering is
/// guaranteed across distinct Services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    /// A Service appeared (including informer resync re-deliveries).
    Added(Service),
    /// A Service spec changed.
    Updated {
        /// Spec before the change.
        old: Service,
        /// Spec after the change.
        new: Service,
    },
    /// A Service was removed.
    Deleted(Service),
}
