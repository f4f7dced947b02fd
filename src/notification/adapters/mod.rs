//! Notification sink implementations.

mod recording;
mod tracing_sink;

pub use recording::{Notification, RecordingNotificationSink};
pub use tracing_sink::TracingNotificationSink;
