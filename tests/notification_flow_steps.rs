//! Behaviour tests for notification delivery during task collaboration.

#[path = "notification_flow_steps/mod.rs"]
mod notification_flow_steps_defs;

use notification_flow_steps_defs::world::{NotificationFlowWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/notification_flow.feature",
    name = "Assigning a user notifies the assignee only"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_notifies_assignee_only(world: NotificationFlowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/notification_flow.feature",
    name = "A status change notifies the other participants"
)]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_notifies_other_participants(world: NotificationFlowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/notification_flow.feature",
    name = "Fetching notifications marks them read"
)]
#[tokio::test(flavor = "multi_thread")]
async fn fetching_marks_notifications_read(world: NotificationFlowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/notification_flow.feature",
    name = "Writing the current status notifies nobody"
)]
#[tokio::test(flavor = "multi_thread")]
async fn noop_status_write_notifies_nobody(world: NotificationFlowWorld) {
    let _ = world;
}
