//! End-to-end task flows through [`TaskLifecycleService`].
//!
//! [`TaskLifecycleService`]: taskboard::task::services::TaskLifecycleService

use crate::in_memory::helpers::{Board, board, runtime};
use rstest::rstest;
use std::io;
use taskboard::ErrorKind;
use taskboard::notification::adapters::Notification;
use taskboard::task::{
    domain::{TaskFilter, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::CreateTaskRequest,
};
use tokio::runtime::Runtime;

/// Walks one task from creation to completion and reopens it.
#[rstest]
fn task_round_trip_through_every_open_status(runtime: io::Result<Runtime>, board: Board) {
    let rt = runtime.expect("runtime creation");
    let alice = board.add_user("Alice");
    let created = rt
        .block_on(
            board.lifecycle.create_task(
                CreateTaskRequest::new("Write release notes")
                    .with_priority(TaskPriority::High)
                    .with_due_date(board.clock.in_days(2))
                    .with_assignee(alice),
            ),
        )
        .expect("create");
    let id = created.id();

    for target in [
        TaskStatus::InProgress,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ] {
        rt.block_on(board.lifecycle.update_status(id, target))
            .expect("transition allowed by the table");
    }
    let first_completion = rt
        .block_on(board.lifecycle.get_task(id))
        .expect("get")
        .completed_at();
    board.clock.advance_days(1);
    rt.block_on(board.lifecycle.update_status(id, TaskStatus::Todo))
        .expect("done -> todo reopens");

    let reopened = rt.block_on(board.lifecycle.get_task(id)).expect("get");
    assert_eq!(reopened.status(), TaskStatus::Todo);
    assert_eq!(reopened.completed_at(), first_completion);
    assert_eq!(reopened.version(), 6);

    let status_changes = board
        .notifier
        .recorded()
        .into_iter()
        .filter(|notification| matches!(notification, Notification::StatusChanged { .. }))
        .count();
    assert_eq!(status_changes, 5);
}

/// A rejected transition leaves no trace.
#[rstest]
fn rejected_transition_changes_nothing(runtime: io::Result<Runtime>, board: Board) {
    let rt = runtime.expect("runtime creation");
    let created = rt
        .block_on(board.lifecycle.create_task(CreateTaskRequest::new("Stay put")))
        .expect("create");
    rt.block_on(board.lifecycle.update_status(created.id(), TaskStatus::Cancelled))
        .expect("todo -> cancelled");

    let result = rt.block_on(board.lifecycle.update_status(created.id(), TaskStatus::Done));

    let err = result.expect_err("cancelled -> done is not in the table");
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    let stored = rt
        .block_on(board.lifecycle.get_task(created.id()))
        .expect("get");
    assert_eq!(stored.status(), TaskStatus::Cancelled);
    assert_eq!(stored.version(), 2);
}

/// Listing filters combine on a populated board.
#[rstest]
fn listing_filters_combine(runtime: io::Result<Runtime>, board: Board) {
    let rt = runtime.expect("runtime creation");
    let alice = board.add_user("Alice");
    let bob = board.add_user("Bob");
    for (title, priority, assignee) in [
        ("Alice urgent", TaskPriority::Urgent, alice),
        ("Alice low", TaskPriority::Low, alice),
        ("Bob urgent", TaskPriority::Urgent, bob),
    ] {
        rt.block_on(
            board.lifecycle.create_task(
                CreateTaskRequest::new(title)
                    .with_priority(priority)
                    .with_assignee(assignee),
            ),
        )
        .expect("create");
    }

    let urgent_for_alice = rt
        .block_on(board.lifecycle.list_tasks(
            &TaskFilter::new()
                .with_priority(TaskPriority::Urgent)
                .with_assignee(alice),
        ))
        .expect("list");

    let titles: Vec<&str> = urgent_for_alice
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(titles, vec!["Alice urgent"]);
}

/// Deleting a task removes it from every query.
#[rstest]
fn deleted_task_disappears_from_listings(runtime: io::Result<Runtime>, board: Board) {
    let rt = runtime.expect("runtime creation");
    let created = rt
        .block_on(
            board.lifecycle.create_task(
                CreateTaskRequest::new("Temporary").with_due_date(board.clock.in_days(1)),
            ),
        )
        .expect("create");

    rt.block_on(board.lifecycle.delete_task(created.id()))
        .expect("delete");

    let err = rt
        .block_on(board.lifecycle.get_task(created.id()))
        .expect_err("task is gone");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(
        rt.block_on(board.lifecycle.tasks_due_soon(7))
            .expect("due soon")
            .is_empty()
    );
    assert!(rt.block_on(board.repository.list_all()).expect("list").is_empty());
}
