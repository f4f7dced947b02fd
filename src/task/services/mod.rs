//! Application services for task lifecycle orchestration.

mod lifecycle;
mod sweep;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use sweep::{
    DeadlineSweepService, OverdueSweepReport, ReminderSweepReport, SweepError, SweepResult,
};
