//! Service flows running against the `PostgreSQL` adapters.

use crate::postgres::helpers::{CleanupGuard, TestStore, db_name, ensure_template, setup_store};
use crate::test_helpers::{SteppedClock, runtime};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use taskboard::ErrorKind;
use taskboard::directory::adapters::PostgresDirectory;
use taskboard::notification::adapters::{Notification, RecordingNotificationSink};
use taskboard::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::TaskStatus,
    ports::TaskRepository,
    services::{CreateTaskRequest, DeadlineSweepService, TaskLifecycleError, TaskLifecycleService},
};
use tokio::runtime::Runtime;

type Lifecycle = TaskLifecycleService<
    PostgresTaskRepository,
    PostgresDirectory,
    RecordingNotificationSink,
    SteppedClock,
>;

struct Services {
    lifecycle: Lifecycle,
    sweeper: DeadlineSweepService<PostgresTaskRepository, RecordingNotificationSink, SteppedClock>,
    repository: Arc<PostgresTaskRepository>,
    notifier: Arc<RecordingNotificationSink>,
    clock: Arc<SteppedClock>,
}

fn services(store: TestStore) -> Services {
    let repository = Arc::new(store.tasks);
    let notifier = Arc::new(RecordingNotificationSink::new());
    let clock = Arc::new(SteppedClock::new());
    Services {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(store.directory),
            Arc::clone(&notifier),
            Arc::clone(&clock),
        ),
        sweeper: DeadlineSweepService::new(
            Arc::clone(&repository),
            Arc::clone(&notifier),
            Arc::clone(&clock),
        ),
        repository,
        notifier,
        clock,
    }
}

#[rstest]
fn transitions_persist_and_stale_copies_conflict(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("lifecycle");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let ana = store.insert_user("Ana").expect("user inserted");
    let backend = store.insert_category("Backend").expect("category inserted");
    let board = services(store);

    let created = rt
        .block_on(
            board.lifecycle.create_task(
                CreateTaskRequest::new("Add index")
                    .with_assignee(ana)
                    .with_category(backend)
                    .with_due_date(board.clock.in_days(2)),
            ),
        )
        .expect("task created");
    let started = rt
        .block_on(board.lifecycle.update_status(created.id(), TaskStatus::InProgress))
        .expect("todo -> in_progress is allowed");

    let stale = rt.block_on(board.repository.update(&started));
    let stored = rt
        .block_on(board.lifecycle.get_task(created.id()))
        .expect("task exists");

    assert!(stale.is_err(), "re-writing a stored version must fail");
    assert_eq!(stored, started);
    assert_eq!(stored.category(), Some(backend));
    assert_eq!(
        board.notifier.recorded(),
        vec![
            Notification::Assigned {
                task_id: created.id(),
                assignee: Some(ana),
            },
            Notification::StatusChanged {
                task_id: created.id(),
                from: TaskStatus::Todo,
                to: TaskStatus::InProgress,
            },
        ]
    );
}

#[rstest]
fn unknown_assignee_is_not_found(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("unknown_user");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let board = services(store);
    let ghost = taskboard::directory::domain::UserId::new();

    let result = rt.block_on(
        board
            .lifecycle
            .create_task(CreateTaskRequest::new("Orphan").with_assignee(ghost)),
    );

    assert!(matches!(result, Err(TaskLifecycleError::UserNotFound(id)) if id == ghost));
    assert!(rt.block_on(board.repository.list_all()).expect("list").is_empty());
}

#[rstest]
fn failed_overdue_notice_is_rolled_back_in_the_database(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("sweep_undo");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let board = services(store);
    let late = rt
        .block_on(
            board
                .lifecycle
                .create_task(CreateTaskRequest::new("Late").with_due_date(board.clock.in_days(1))),
        )
        .expect("task created");
    board.clock.advance_days(2);
    board.notifier.set_failing(true);

    let failed = rt
        .block_on(board.sweeper.run_overdue_sweep())
        .expect_err("sink failure aborts the run");
    let restored = rt
        .block_on(board.lifecycle.get_task(late.id()))
        .expect("task exists");
    board.notifier.set_failing(false);
    let retry = rt
        .block_on(board.sweeper.run_overdue_sweep())
        .expect("second run succeeds");

    assert_eq!(failed.kind(), ErrorKind::Internal);
    assert_eq!(restored.status(), TaskStatus::Todo);
    assert_eq!(restored.version(), 3);
    assert_eq!(retry.marked, 1);
    assert_eq!(
        board.notifier.recorded(),
        vec![Notification::Overdue { task_id: late.id() }]
    );
}
