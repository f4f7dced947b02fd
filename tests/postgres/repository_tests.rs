//! Store contract tests for [`PostgresTaskRepository`].
//!
//! Mirrors the in-memory contract so both adapters agree on version
//! checks and date-window queries.

use crate::postgres::helpers::{
    CleanupGuard, db_name, ensure_template, setup_store, task_due_in,
};
use crate::test_helpers::{SteppedClock, runtime};
use chrono::TimeDelta;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::{fixture, rstest};
use std::io;
use taskboard::task::{
    domain::{NewTask, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use tokio::runtime::Runtime;

#[fixture]
fn clock() -> SteppedClock {
    SteppedClock::new()
}

/// Creates tasks a minute apart so `created_at` ordering is deterministic.
fn tasks_in_order(specs: &[(&str, Option<u64>)], clock: &SteppedClock) -> Vec<Task> {
    specs
        .iter()
        .map(|(title, days)| {
            clock.advance(TimeDelta::minutes(1));
            task_due_in(title, *days, clock)
        })
        .collect()
}

#[rstest]
fn stored_task_round_trips_every_field(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("round_trip");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let owner = store.insert_user("Ana").expect("user inserted");

    let mut task = Task::create(
        NewTask::new(TaskTitle::new("Ship report").expect("valid title"))
            .with_description("Quarterly numbers")
            .with_priority(TaskPriority::Urgent)
            .with_due_date(clock.in_days(4))
            .with_estimated_hours(6)
            .with_assignee(owner),
        &clock,
    )
    .expect("task created");
    task.transition_to(TaskStatus::InProgress, &clock)
        .expect("todo -> in_progress is allowed");
    clock.advance(TimeDelta::hours(5));
    task.transition_to(TaskStatus::Done, &clock)
        .expect("in_progress -> done is allowed");
    rt.block_on(store.tasks.store(&task)).expect("store");

    let restored = rt
        .block_on(store.tasks.find_by_id(task.id()))
        .expect("lookup")
        .expect("task exists");

    assert_eq!(restored, task);
    assert_eq!(restored.status(), TaskStatus::Done);
    assert!(restored.completed_at().is_some());
    assert_eq!(restored.version(), 3);
}

#[rstest]
fn duplicate_task_id_rejected(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("duplicate");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let task = task_due_in("Once only", None, &clock);

    rt.block_on(store.tasks.store(&task)).expect("first store");
    let result = rt.block_on(store.tasks.store(&task));

    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "Should reject duplicate task ID: {result:?}"
    );
}

#[rstest]
fn update_separates_conflicts_from_missing_rows(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("versioning");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let mut task = task_due_in("Versioned", None, &clock);
    rt.block_on(store.tasks.store(&task)).expect("store");

    let unchanged = rt.block_on(store.tasks.update(&task));
    assert!(
        matches!(
            unchanged,
            Err(TaskRepositoryError::VersionConflict {
                expected: 0,
                found: 1,
                ..
            })
        ),
        "An untouched copy must not overwrite the stored version: {unchanged:?}"
    );

    let mut never_stored = task_due_in("Never stored", None, &clock);
    never_stored
        .transition_to(TaskStatus::InProgress, &clock)
        .expect("todo -> in_progress is allowed");
    assert!(matches!(
        rt.block_on(store.tasks.update(&never_stored)),
        Err(TaskRepositoryError::NotFound(id)) if id == never_stored.id()
    ));

    task.transition_to(TaskStatus::InProgress, &clock)
        .expect("todo -> in_progress is allowed");
    rt.block_on(store.tasks.update(&task))
        .expect("next version accepted");

    let stored = rt
        .block_on(store.tasks.find_by_id(task.id()))
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored, task);
    assert_eq!(stored.version(), 2);
}

#[rstest]
fn list_all_orders_by_creation_and_delete_removes(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("listing");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let tasks = tasks_in_order(&[("First", None), ("Second", None), ("Third", None)], &clock);
    for task in tasks.iter().rev() {
        rt.block_on(store.tasks.store(task)).expect("store");
    }
    let second = tasks.get(1).expect("second task");

    rt.block_on(store.tasks.delete_by_id(second.id()))
        .expect("delete");
    let missing = TaskId::new();
    let repeated = rt.block_on(store.tasks.delete_by_id(missing));
    let listed = rt.block_on(store.tasks.list_all()).expect("list");

    assert!(matches!(repeated, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    let titles: Vec<&str> = listed.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);
}

#[rstest]
fn due_soon_window_is_inclusive_at_both_ends(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("due_soon");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let today = clock.in_days(0);
    let mut tasks = tasks_in_order(
        &[
            ("Due +0", Some(0)),
            ("Due +1", Some(1)),
            ("Due +3", Some(3)),
            ("Due +4", Some(4)),
            ("Done +2", Some(2)),
            ("Undated", None),
        ],
        &clock,
    );
    let finished = tasks.get_mut(4).expect("finished task");
    finished
        .transition_to(TaskStatus::InProgress, &clock)
        .expect("todo -> in_progress is allowed");
    finished
        .transition_to(TaskStatus::Done, &clock)
        .expect("in_progress -> done is allowed");
    for task in &tasks {
        rt.block_on(store.tasks.store(task)).expect("store");
    }

    let window = rt
        .block_on(store.tasks.find_due_soon(3, today))
        .expect("lookup");

    let titles: Vec<&str> = window.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, vec!["Due +0", "Due +1", "Due +3"]);
}

#[rstest]
fn find_overdue_excludes_terminal_statuses(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("overdue");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let mut tasks = tasks_in_order(
        &[
            ("Marked", Some(1)),
            ("Open", Some(1)),
            ("Cancelled", Some(1)),
            ("Due today", Some(2)),
            ("Undated", None),
        ],
        &clock,
    );
    tasks
        .get_mut(2)
        .expect("cancelled task")
        .transition_to(TaskStatus::Cancelled, &clock)
        .expect("todo -> cancelled is allowed");
    clock.advance_days(2);
    tasks.get_mut(0).expect("marked task").mark_overdue(&clock);
    for task in &tasks {
        rt.block_on(store.tasks.store(task)).expect("store");
    }

    let overdue = rt
        .block_on(store.tasks.find_overdue(clock.in_days(0)))
        .expect("lookup");

    let titles: Vec<&str> = overdue.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, vec!["Marked", "Open"]);
}

#[rstest]
fn find_by_assignee_matches_reference(
    shared_test_cluster: &'static TestCluster,
    runtime: io::Result<Runtime>,
    clock: SteppedClock,
) {
    ensure_template(shared_test_cluster).expect("template setup");
    let name = db_name("assignee");
    let _guard = CleanupGuard::new(shared_test_cluster, name.clone());
    let store = setup_store(shared_test_cluster, &name).expect("store setup");
    let rt = runtime.expect("runtime creation");
    let owner = store.insert_user("Ana").expect("user inserted");
    let other = store.insert_user("Ben").expect("user inserted");
    let owned = Task::create(
        NewTask::new(TaskTitle::new("Owned").expect("valid title")).with_assignee(owner),
        &clock,
    )
    .expect("task created");
    clock.advance(TimeDelta::minutes(1));
    let foreign = Task::create(
        NewTask::new(TaskTitle::new("Foreign").expect("valid title")).with_assignee(other),
        &clock,
    )
    .expect("task created");
    for task in [&owned, &foreign] {
        rt.block_on(store.tasks.store(task)).expect("store");
    }
    rt.block_on(store.tasks.store(&task_due_in("Unowned", None, &clock)))
        .expect("store");

    let found = rt
        .block_on(store.tasks.find_by_assignee(owner))
        .expect("lookup");

    assert_eq!(found, vec![owned]);
}
