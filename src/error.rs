//! Caller-facing classification of service errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad error class a caller can map to a client-visible condition.
///
/// Input-shape problems ([`ErrorKind::ValidationFailed`]) are kept apart
/// from business-rule violations ([`ErrorKind::InvalidTransition`]) so a
/// client can react to each differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A task, user or category identifier did not resolve.
    NotFound,
    /// The request was malformed (empty title, due date in the past).
    ValidationFailed,
    /// The transition table forbids the requested status change.
    InvalidTransition,
    /// A concurrent write to the same task won.
    Conflict,
    /// Storage or notification infrastructure failed.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ValidationFailed => "validation_failed",
            Self::InvalidTransition => "invalid_transition",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
