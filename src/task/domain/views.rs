//! Pure read-side views over task collections.
//!
//! Nothing here touches storage. Every function accepts any slice of items
//! that can be viewed as a [`Task`], so the same views work over bare tasks
//! and over [`TaskListing`] rows.

use super::{ProjectId, Task, TaskListing, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of entries shown in the dashboard urgent list.
pub const URGENT_TASK_LIMIT: usize = 5;

/// Number of entries shown in the dashboard recent list.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Number of projects shown in the dashboard workload list.
pub const WORKLOAD_LIMIT: usize = 5;

/// Returns tasks whose status is not [`TaskStatus::Done`].
#[must_use]
pub fn open_tasks<T: AsRef<Task>>(tasks: &[T]) -> Vec<&T> {
    tasks
        .iter()
        .filter(|item| item.as_ref().status().is_open())
        .collect()
}

/// Returns open tasks whose due date has passed.
#[must_use]
pub fn overdue_tasks<T: AsRef<Task>>(tasks: &[T], now: DateTime<Utc>) -> Vec<&T> {
    tasks
        .iter()
        .filter(|item| item.as_ref().is_overdue(now))
        .collect()
}

/// Returns open tasks due now or later, soonest first.
///
/// A task due exactly at `now` is upcoming rather than overdue.
#[must_use]
pub fn upcoming_deadlines<T: AsRef<Task>>(tasks: &[T], now: DateTime<Utc>) -> Vec<&T> {
    let mut upcoming: Vec<&T> = tasks
        .iter()
        .filter(|item| {
            let task = item.as_ref();
            task.status().is_open() && task.due_date().is_some_and(|due| due >= now)
        })
        .collect();
    upcoming.sort_by_key(|item| item.as_ref().due_date());
    upcoming
}

/// Selects blocked and overdue tasks for the dashboard.
///
/// Blocked tasks come first; the relative order of the input is otherwise
/// kept. The result holds at most [`URGENT_TASK_LIMIT`] tasks.
#[must_use]
pub fn urgent_tasks<T: AsRef<Task>>(tasks: &[T], now: DateTime<Utc>) -> Vec<&T> {
    let mut urgent: Vec<&T> = tasks
        .iter()
        .filter(|item| {
            let task = item.as_ref();
            task.status() == TaskStatus::Blocked || task.is_overdue(now)
        })
        .collect();
    urgent.sort_by_key(|item| item.as_ref().status() != TaskStatus::Blocked);
    urgent.truncate(URGENT_TASK_LIMIT);
    urgent
}

/// Returns the most recently updated open tasks, newest first.
#[must_use]
pub fn recent_open_tasks<T: AsRef<Task>>(tasks: &[T]) -> Vec<&T> {
    let mut recent = open_tasks(tasks);
    recent.sort_by(|left, right| right.as_ref().updated_at().cmp(&left.as_ref().updated_at()));
    recent.truncate(RECENT_TASK_LIMIT);
    recent
}

/// Tasks sharing a project name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup<'a> {
    /// Project name, or the unknown-project sentinel.
    pub name: &'a str,
    /// Tasks in input order.
    pub tasks: Vec<&'a TaskListing>,
}

/// Partitions listings by project name, keeping the order groups first
/// appear in.
#[must_use]
pub fn group_by_project(listings: &[TaskListing]) -> Vec<ProjectGroup<'_>> {
    let mut groups: Vec<ProjectGroup<'_>> = Vec::new();
    for listing in listings {
        let name = listing.project_name();
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.tasks.push(listing),
            None => groups.push(ProjectGroup {
                name,
                tasks: vec![listing],
            }),
        }
    }
    groups
}

/// Buckets tasks into board columns, one per status in [`TaskStatus::ALL`]
/// order. Empty columns are included.
#[must_use]
pub fn group_by_status<T: AsRef<Task>>(tasks: &[T]) -> Vec<(TaskStatus, Vec<&T>)> {
    TaskStatus::ALL
        .iter()
        .map(|status| {
            let column = tasks
                .iter()
                .filter(|item| item.as_ref().status() == *status)
                .collect();
            (*status, column)
        })
        .collect()
}

/// Field a task list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Priority rank, most urgent first when ascending.
    Priority,
    /// Due date, tasks without one last when ascending.
    DueDate,
    /// Creation time.
    #[default]
    CreatedAt,
    /// Latest update time.
    UpdatedAt,
    /// Title, case-insensitive.
    Title,
}

/// Direction a sort is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sort order for task lists. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TaskSort {
    /// Field to order by.
    pub field: SortField,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort order.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Creates an ascending sort on `field`.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Creates a descending sort on `field`.
    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Selects `field`: flips the direction when it is already the sort
    /// field, otherwise switches to it ascending.
    #[must_use]
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::ascending(field)
        }
    }

    /// Compares two tasks under this order.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::Priority => left.priority().rank().cmp(&right.priority().rank()),
            SortField::DueDate => compare_due_dates(left.due_date(), right.due_date()),
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            SortField::Title => compare_titles(left.title(), right.title()),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn compare_due_dates(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> Ordering {
    match (left, right) {
        (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_titles(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Stable in-place sort.
pub fn sort_tasks<T: AsRef<Task>>(tasks: &mut [T], sort: TaskSort) {
    tasks.sort_by(|left, right| sort.compare(left.as_ref(), right.as_ref()));
}

/// Optional constraints narrowing a task list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Keep only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Keep only tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Keep only tasks with a label containing this text, ignoring case.
    pub label: Option<String>,
    /// Keep only tasks whose title or description contains this text,
    /// ignoring case.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Returns `true` when `task` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .label
                .as_deref()
                .is_none_or(|label| task.labels().any_contains_ignore_case(label))
            && self
                .search
                .as_deref()
                .is_none_or(|text| text_matches(task, text, false))
    }

    /// Returns the matching tasks in input order.
    #[must_use]
    pub fn apply<'a, T: AsRef<Task>>(&self, tasks: &'a [T]) -> Vec<&'a T> {
        tasks
            .iter()
            .filter(|item| self.matches(item.as_ref()))
            .collect()
    }
}

/// Case-insensitive search over title, description and labels.
#[must_use]
pub fn matches_search(task: &Task, query: &str) -> bool {
    text_matches(task, query, true)
}

fn text_matches(task: &Task, query: &str, include_labels: bool) -> bool {
    let needle = query.to_lowercase();
    task.title().to_lowercase().contains(&needle)
        || task
            .description()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
        || (include_labels && task.labels().any_contains_ignore_case(query))
}

/// Headline task counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// Tasks not done.
    pub open: usize,
    /// Tasks in backlog or todo.
    pub not_started: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Tasks blocked.
    pub blocked: usize,
    /// Open tasks past their due date.
    pub overdue: usize,
    /// Tasks done.
    pub done: usize,
}

impl TaskStats {
    /// Counts tasks as of `now`.
    #[must_use]
    pub fn collect<T: AsRef<Task>>(tasks: &[T], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, item| {
            stats.record(item.as_ref(), now);
            stats
        })
    }

    fn record(&mut self, task: &Task, now: DateTime<Utc>) {
        let status = task.status();
        if status.is_open() {
            self.open += 1;
        } else {
            self.done += 1;
        }
        if status.is_not_started() {
            self.not_started += 1;
        }
        match status {
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Blocked => self.blocked += 1,
            TaskStatus::Backlog | TaskStatus::Todo | TaskStatus::Done => {}
        }
        if task.is_overdue(now) {
            self.overdue += 1;
        }
    }
}

/// Task counts for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWorkload {
    /// Project identifier.
    pub project_id: ProjectId,
    /// Project name, or the unknown-project sentinel.
    pub name: String,
    /// All tasks in the project.
    pub total: usize,
    /// Tasks not done.
    pub open: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Tasks blocked.
    pub blocked: usize,
    /// Open tasks past their due date.
    pub overdue: usize,
}

/// Counts tasks per project, busiest (most open tasks) first.
///
/// Projects without open tasks are left out and at most [`WORKLOAD_LIMIT`]
/// rows are returned.
#[must_use]
pub fn project_workloads(listings: &[TaskListing], now: DateTime<Utc>) -> Vec<ProjectWorkload> {
    let mut workloads: Vec<ProjectWorkload> = Vec::new();
    for listing in listings {
        let task = &listing.task;
        let index = workloads
            .iter()
            .position(|workload| workload.project_id == task.project_id())
            .unwrap_or_else(|| {
                workloads.push(ProjectWorkload {
                    project_id: task.project_id(),
                    name: listing.project_name().to_owned(),
                    total: 0,
                    open: 0,
                    in_progress: 0,
                    blocked: 0,
                    overdue: 0,
                });
                workloads.len() - 1
            });
        let Some(workload) = workloads.get_mut(index) else {
            continue;
        };
        workload.total += 1;
        if task.status().is_open() {
            workload.open += 1;
        }
        match task.status() {
            TaskStatus::InProgress => workload.in_progress += 1,
            TaskStatus::Blocked => workload.blocked += 1,
            TaskStatus::Backlog | TaskStatus::Todo | TaskStatus::Done => {}
        }
        if task.is_overdue(now) {
            workload.overdue += 1;
        }
    }
    workloads.retain(|workload| workload.open > 0);
    workloads.sort_by(|left, right| right.open.cmp(&left.open));
    workloads.truncate(WORKLOAD_LIMIT);
    workloads
}
