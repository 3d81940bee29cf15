//! Application services for task access control and lifecycle
//! orchestration.

mod access;
mod lifecycle;

pub use access::{TaskAccess, TaskAccessError, TaskAccessResult};
pub use lifecycle::{
    CreateTaskRequest, TaskDetail, TaskListing, TaskService, TaskServiceError, TaskServiceResult,
};
