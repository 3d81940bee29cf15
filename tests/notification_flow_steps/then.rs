//! Then steps for notification flow BDD scenarios.

use super::world::{NotificationFlowWorld, run_async};
use rstest_bdd_macros::then;

#[then(r#""{name}" receives a message containing "{text}""#)]
fn user_receives_message_containing(
    world: &NotificationFlowWorld,
    name: String,
    text: String,
) -> Result<(), eyre::Report> {
    let messages = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no fetch has happened for {name}"))?;
    if !messages.iter().any(|message| message.contains(&text)) {
        return Err(eyre::eyre!(
            "no fetched message contains {text:?}; fetched: {messages:?}"
        ));
    }
    Ok(())
}

#[then(r#"the fetch returns {count:usize} message"#)]
fn fetch_returns_count(
    world: &NotificationFlowWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let messages = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no fetch has happened"))?;
    if messages.len() != count {
        return Err(eyre::eyre!(
            "expected {count} fetched messages, found {}",
            messages.len()
        ));
    }
    Ok(())
}

#[then("the fetch returns no messages")]
fn fetch_returns_nothing(world: &NotificationFlowWorld) -> Result<(), eyre::Report> {
    let messages = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no fetch has happened"))?;
    if !messages.is_empty() {
        return Err(eyre::eyre!("expected an empty fetch, found {messages:?}"));
    }
    Ok(())
}

#[then(r#""{name}" has no unread notifications"#)]
fn user_has_no_unread(world: &NotificationFlowWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = world.user(&name)?.id();
    let count = run_async(world.inbox.unread_count(user_id))
        .map_err(|err| eyre::eyre!("count scenario notifications: {err}"))?;
    if count != 0 {
        return Err(eyre::eyre!("expected no unread notifications, found {count}"));
    }
    Ok(())
}

#[then(r#""{name}" has {count:usize} unread notification"#)]
fn user_has_unread_count(
    world: &NotificationFlowWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let user_id = world.user(&name)?.id();
    let unread = run_async(world.inbox.unread_count(user_id))
        .map_err(|err| eyre::eyre!("count scenario notifications: {err}"))?;
    if unread != count {
        return Err(eyre::eyre!(
            "expected {count} unread notifications, found {unread}"
        ));
    }
    Ok(())
}
