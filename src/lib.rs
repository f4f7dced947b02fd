//! Taskboard: task lifecycle tracking and reporting.
//!
//! This crate tracks work items through a bounded status lifecycle,
//! assigns them to users, sweeps them for overdue marking and deadline
//! reminders, and derives completion statistics from the task collection.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, logging, memory)
//!
//! Every computation that depends on "now" takes an injected
//! [`mockable::Clock`].
//!
//! # Modules
//!
//! - [`task`]: Task entity, transition table, lifecycle and sweep services
//! - [`statistics`]: Aggregate, per-user and per-priority reporting
//! - [`directory`]: User and category references
//! - [`notification`]: Outbound notification port and sinks
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod directory;
pub mod error;
pub mod notification;
pub mod statistics;
pub mod task;
pub mod telemetry;

pub use error::ErrorKind;

#[cfg(test)]
mod test_support;
