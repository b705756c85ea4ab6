//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    DashboardOverview, TaskDetails, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
