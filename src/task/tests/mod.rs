//! Unit tests for the task bounded context.

mod domain_tests;

use crate::task::domain::{
    PersistedTaskData, ProjectId, TaskId, TaskLabels, TaskPriority, TaskStatus,
};
use chrono::{DateTime, TimeZone, Utc};

/// Builds a UTC timestamp for test fixtures.
pub(super) fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a persisted task with controllable timestamps.
pub(super) fn stored_task(project_id: ProjectId, title: &str, status: TaskStatus) -> PersistedTaskData {
    let created_at = at(2024, 6, 1, 9);
    PersistedTaskData {
        id: TaskId::new(),
        project_id,
        title: title.to_owned(),
        description: None,
        status,
        priority: TaskPriority::Medium,
        labels: TaskLabels::default(),
        due_date: None,
        completed_at: (status == TaskStatus::Done).then_some(created_at),
        blocked_reason: None,
        estimate_hours: None,
        created_at,
        updated_at: created_at,
    }
}
