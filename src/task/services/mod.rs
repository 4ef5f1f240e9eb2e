//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    RegisterTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskPages,
};
