//! # Portkeeper Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/       # Cross-component reconciliation scenarios
//!     ├── lifecycle.rs   # Add/update/delete round trips
//!     ├── concurrency.rs # Concurrent events against one ledger
//!     └── watch.rs       # Event-channel bridge end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p portkeeper-tests
//! cargo test -p portkeeper-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
