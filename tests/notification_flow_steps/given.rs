//! Given steps for notification flow BDD scenarios.

use super::world::{NotificationFlowWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskpulse::task::services::CreateTaskRequest;
use taskpulse::user::{
    domain::{User, Username},
    ports::UserRepository,
};

#[given(r#"a registered user named "{name}""#)]
fn registered_user(world: &mut NotificationFlowWorld, name: String) -> Result<(), eyre::Report> {
    let username = Username::new(name.as_str()).wrap_err("invalid scenario username")?;
    let user = User::new(username, &DefaultClock);
    run_async(world.users.store(&user)).wrap_err("register scenario user")?;
    world.known_users.insert(name, user);
    Ok(())
}

#[given(r#""{owner}" has created a task titled "{title}""#)]
fn owner_has_created_task(
    world: &mut NotificationFlowWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?.id();
    let created = run_async(
        world
            .service
            .create_task(owner_id, CreateTaskRequest::new(title, "")),
    )
    .wrap_err("create scenario task")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#""{owner}" has assigned "{assignee}" to the task"#)]
fn owner_has_assigned_user(
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
    .wrap_err("assign scenario user in setup")?;
    Ok(())
}
