//! Derived reporting metrics over task collections.
//!
//! The computations in [`domain`] are pure folds over slices of tasks; the
//! [`services`] layer fetches those slices through the task and directory
//! ports. Scans read whatever the repository returns at the time and make
//! no consistency promise beyond that snapshot.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
