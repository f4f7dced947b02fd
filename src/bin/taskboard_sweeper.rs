//! Runs the overdue sweep and deadline reminders on fixed intervals.
//!
//! Usage:
//!
//! ```text
//! taskboard-sweeper [config-path]
//! ```
//!
//! The configuration path defaults to `$TASKBOARD_CONFIG`, then
//! `taskboard.toml`. A failed run is logged and the next tick proceeds
//! normally; runs are never retried in between ticks. The process exits on
//! Ctrl-C.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use taskboard::{
    config::{ConfigError, TaskboardConfig},
    directory::adapters::PostgresDirectory,
    notification::adapters::TracingNotificationSink,
    task::{adapters::postgres::PostgresTaskRepository, services::DeadlineSweepService},
    telemetry::init_tracing,
};
use thiserror::Error;
use tokio::time::{MissedTickBehavior, interval};

const DEFAULT_CONFIG_PATH: &str = "taskboard.toml";

#[derive(Debug, Error)]
enum SweeperError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database.url must be set")]
    MissingDatabaseUrl,
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
}

type Sweeper = DeadlineSweepService<
    PostgresTaskRepository,
    TracingNotificationSink<PostgresDirectory, DefaultClock>,
    DefaultClock,
>;

fn config_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os("TASKBOARD_CONFIG"))
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

fn build_sweeper(config: &TaskboardConfig) -> Result<Sweeper, SweeperError> {
    if config.database.url.trim().is_empty() {
        return Err(SweeperError::MissingDatabaseUrl);
    }
    let manager = ConnectionManager::<PgConnection>::new(config.database.url.clone());
    let pool = Pool::builder()
        .max_size(config.database.pool_size)
        .build(manager)?;

    let clock = Arc::new(DefaultClock);
    let directory = Arc::new(PostgresDirectory::new(pool.clone()));
    let notifier = Arc::new(TracingNotificationSink::new(directory, Arc::clone(&clock)));
    Ok(DeadlineSweepService::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        notifier,
        clock,
    ))
}

async fn run(config: TaskboardConfig) -> Result<(), SweeperError> {
    let sweeper = build_sweeper(&config)?;
    let window_days = config.sweep.reminder_window_days;

    let mut overdue_ticks = interval(config.sweep.overdue_interval());
    overdue_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut reminder_ticks = interval(config.sweep.reminder_interval());
    reminder_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        overdue_interval_secs = config.sweep.overdue_interval_secs,
        reminder_interval_secs = config.sweep.reminder_interval_secs,
        window_days,
        "sweeper started"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = overdue_ticks.tick() => {
                if let Err(err) = sweeper.run_overdue_sweep().await {
                    tracing::error!(error = %err, kind = %err.kind(), "overdue sweep failed");
                }
            }
            _ = reminder_ticks.tick() => {
                if let Err(err) = sweeper.run_deadline_reminders(window_days).await {
                    tracing::error!(error = %err, kind = %err.kind(), "deadline reminders failed");
                }
            }
            signal = &mut shutdown => {
                signal?;
                tracing::info!("shutdown requested, sweeper stopping");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), SweeperError> {
    let path = config_path();
    let config = TaskboardConfig::load(&path)?;
    init_tracing(&config.logging.filter);
    tracing::info!(config = %path.display(), "loaded configuration");

    let result = run(config).await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "sweeper exited with an error");
    }
    result
}
