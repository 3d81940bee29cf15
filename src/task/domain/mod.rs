//! Domain model for task lifecycle and task events.
//!
//! The task domain models owned tasks, soft-deleted assignment records, and
//! write-once task events while keeping all infrastructure concerns outside
//! of the domain boundary.

mod assignment;
mod error;
mod event;
mod ids;
mod status;
mod task;

pub use assignment::{PersistedAssignmentData, TaskAssignment};
pub use error::{ParseTaskEventKindError, ParseTaskStatusError, TaskDomainError};
pub use event::{PersistedTaskEventData, TaskEvent, TaskEventBody, TaskEventKind};
pub use ids::{AssignmentId, TaskEventId, TaskId};
pub use status::{StatusTransition, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskChanges};
