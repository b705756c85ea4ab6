//! Unit tests for task field validation, parsing and creation.

use crate::task::domain::{
    ActivityPayload, EstimateHours, NewTask, ParseTaskStatusError, ProjectId, Task,
    TaskDomainError, TaskEventType, TaskLabels, TaskPriority, TaskStatus,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn project_id() -> ProjectId {
    ProjectId::new()
}

#[rstest]
#[case("BACKLOG", TaskStatus::Backlog)]
#[case("todo", TaskStatus::Todo)]
#[case(" In_Progress ", TaskStatus::InProgress)]
#[case("BLOCKED", TaskStatus::Blocked)]
#[case("DONE", TaskStatus::Done)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_values() {
    assert_eq!(
        TaskStatus::try_from("ARCHIVED"),
        Err(ParseTaskStatusError("ARCHIVED".to_owned()))
    );
}

#[rstest]
fn status_round_trips_through_storage_text() {
    for status in TaskStatus::ALL {
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
fn only_done_is_closed() {
    let open: Vec<TaskStatus> = TaskStatus::ALL
        .into_iter()
        .filter(|status| status.is_open())
        .collect();
    assert_eq!(open.len(), 4);
    assert!(!TaskStatus::Done.is_open());
}

#[rstest]
fn priority_rank_puts_critical_first() {
    let mut priorities = [
        TaskPriority::Low,
        TaskPriority::Critical,
        TaskPriority::Medium,
        TaskPriority::High,
    ];
    priorities.sort_by_key(|priority| priority.rank());
    assert_eq!(
        priorities,
        [
            TaskPriority::Critical,
            TaskPriority::High,
            TaskPriority::Medium,
            TaskPriority::Low,
        ]
    );
}

#[rstest]
fn labels_are_trimmed_and_deduplicated() {
    let labels = TaskLabels::new(
        ["  ui ", "backend", "ui", "", "Backend"]
            .into_iter()
            .map(str::to_owned),
    );
    assert_eq!(labels.as_slice(), ["ui", "backend", "Backend"]);
}

#[rstest]
fn labels_encode_as_json_text_at_storage_boundary() {
    let labels = TaskLabels::new(["ui".to_owned(), "urgent".to_owned()]);
    let stored = labels.to_storage_text();

    assert_eq!(stored.as_deref(), Some(r#"["ui","urgent"]"#));
    assert_eq!(TaskLabels::from_storage_text(stored.as_deref()), labels);
    assert_eq!(TaskLabels::default().to_storage_text(), None);
}

#[rstest]
#[case(None)]
#[case(Some("not json"))]
#[case(Some(r#"{"label":"ui"}"#))]
fn unreadable_stored_labels_yield_empty_set(#[case] stored: Option<&str>) {
    assert!(TaskLabels::from_storage_text(stored).is_empty());
}

#[rstest]
#[case(0.0)]
#[case(2.5)]
fn estimate_accepts_non_negative_values(#[case] hours: f64) {
    assert_eq!(EstimateHours::new(hours).map(f64::from), Ok(hours));
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn estimate_rejects_invalid_values(#[case] hours: f64) {
    assert!(matches!(
        EstimateHours::new(hours),
        Err(TaskDomainError::InvalidEstimateHours(_))
    ));
}

#[rstest]
fn create_applies_defaults_and_logs_creation(project_id: ProjectId) {
    let clock = DefaultClock;
    let (task, entry) =
        Task::create(NewTask::new(project_id, "  Write docs  "), &clock).expect("valid task");

    assert_eq!(task.title(), "Write docs");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(entry.event_type(), TaskEventType::TaskCreated);
    assert_eq!(entry.task_id(), task.id());
    assert_eq!(entry.timestamp(), task.created_at());
    assert_eq!(
        entry.payload(),
        Some(&ActivityPayload::Created {
            title: "Write docs".to_owned(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
        })
    );
}

#[rstest]
fn create_as_done_sets_completion_timestamp(project_id: ProjectId) {
    let new_task = NewTask::new(project_id, "Already shipped").with_status(TaskStatus::Done);
    let (task, _) = Task::create(new_task, &DefaultClock).expect("valid task");

    assert_eq!(task.completed_at(), Some(task.created_at()));
}

#[rstest]
#[case("")]
#[case("   ")]
fn create_rejects_blank_title(project_id: ProjectId, #[case] title: &str) {
    assert_eq!(
        Task::create(NewTask::new(project_id, title), &DefaultClock),
        Err(TaskDomainError::EmptyTitle)
    );
}

#[rstest]
fn create_rejects_negative_estimate(project_id: ProjectId) {
    let new_task = NewTask::new(project_id, "Estimate me").with_estimate_hours(-3.0);
    assert!(matches!(
        Task::create(new_task, &DefaultClock),
        Err(TaskDomainError::InvalidEstimateHours(_))
    ));
}

#[rstest]
#[case("", None)]
#[case("   ", None)]
#[case(" Details ", Some(" Details "))]
fn create_normalizes_blank_descriptions(
    project_id: ProjectId,
    #[case] description: &str,
    #[case] expected: Option<&str>,
) {
    let new_task = NewTask::new(project_id, "Describe me").with_description(description);
    let (task, _) = Task::create(new_task, &DefaultClock).expect("valid task");
    assert_eq!(task.description(), expected);
}
