//! When steps for notification flow BDD scenarios.

use super::world::{NotificationFlowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskpulse::task::domain::TaskStatus;

#[when(r#""{owner}" assigns "{assignee}" to the task"#)]
fn owner_assigns_user(
    world: &mut NotificationFlowWorld,
    owner: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?.id();
    let assignee_id = world.user(&assignee)?.id();
    let task_id = world.task()?.id();
    run_async(
        world
            .service
            .assign_users(task_id, owner_id, &[assignee_id]),
    )
    .wrap_err("assign scenario user")?;
    Ok(())
}

#[when(r#""{name}" marks the task as "{status}""#)]
fn user_marks_task_status(
    world: &mut NotificationFlowWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let requested = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let user_id = world.user(&name)?.id();
    let task_id = world.task()?.id();
    let updated = run_async(world.service.update_task_status(task_id, user_id, requested))
        .wrap_err("change scenario task status")?;
    world.task = Some(updated);
    Ok(())
}

#[when(r#""{name}" fetches their notifications"#)]
fn user_fetches_notifications(
    world: &mut NotificationFlowWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user(&name)?.id();
    let messages = run_async(world.inbox.fetch_and_mark_read(user_id))
        .wrap_err("fetch scenario notifications")?;
    world.last_fetch = Some(messages);
    Ok(())
}
