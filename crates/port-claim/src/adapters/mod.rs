//! Adapters Layer - Concrete implementations of the port traits
//!
//! - `socket`: production opener binding real OS sockets
//! - `memory`: in-memory opener double with failure injection
//! - `reporter`: tracing-backed and recording failure reporters
//! - `watch`: async bridge from a Service event channel to the manager
//! - `api_handler`: JSON snapshot of currently held claims

pub mod api_handler;
pub mod memory;
pub mod reporter;
pub mod socket;
pub mod watch;

pub use api_handler::{claim_report_json, ClaimReport, ClaimStatusEntry};
pub use memory::InMemoryPortOpener;
pub use reporter::{
    PortClaimEvent, RecordingFailureReporter, TracingFailureReporter, PORT_CLAIM_EVENT_REASON,
};
pub use socket::SocketPortOpener;
pub use watch::run_service_watch;
