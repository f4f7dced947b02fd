//! Task lifecycle management.
//!
//! Tasks move through a bounded set of statuses under a fixed transition
//! table, are assigned to users by reference, and are swept periodically
//! for overdue marking and deadline reminders. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
