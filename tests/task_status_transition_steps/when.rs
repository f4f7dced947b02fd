//! When steps for task status transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::TaskStatus;

#[when(r#"the task is moved to "{status}""#)]
fn move_task(world: &mut TaskTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.current_task()?.id();

    let result = run_async(world.service.update_status(task_id, target));
    if let Ok(ref updated) = result {
        world.last_task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
