//! Outbound task notifications.
//!
//! The lifecycle and sweep services announce assignments, status changes,
//! approaching deadlines and overdue tasks through [`NotificationSink`]. The
//! calls are one-way; an error returned by a sink is propagated to the
//! caller of the service operation and never retried here.

pub mod adapters;
mod port;

pub use port::{NotificationError, NotificationResult, NotificationSink};

#[cfg(test)]
pub use port::MockNotificationSink;
