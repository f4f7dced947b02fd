//! User and category references for task management.
//!
//! Users and categories are owned elsewhere; tasks only hold weak, by-id
//! references to them. This module supplies the identifier types, the
//! lookup ports used to validate those references at task creation and
//! assignment time, and adapters that back the lookups:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
