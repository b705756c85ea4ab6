//! Domain model for task lifecycle management.
//!
//! The task domain owns the status rules, the derived completion timestamp,
//! and the activity entries each mutation produces. Storage and transport
//! concerns stay outside this boundary.

mod activity;
mod error;
mod fields;
mod ids;
mod listing;
mod status;
mod task;
pub mod views;

pub use activity::{ActivityPayload, PersistedActivityData, TaskActivityLogEntry, TaskEventType};
pub use error::{
    ParseTaskEventTypeError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use fields::{EstimateHours, TaskLabels};
pub use ids::{ActivityLogEntryId, ProjectId, TaskId};
pub use listing::{ProjectSummary, TaskListing, UNKNOWN_PROJECT_NAME};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskUpdate};
