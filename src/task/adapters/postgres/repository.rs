//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{
        ActivityRow, NewActivityRow, NewTaskRow, ProjectRow, TaskChangeset, TaskRow,
    },
    schema::{projects, task_activity_log, tasks},
};
use crate::task::{
    domain::{
        ActivityLogEntryId, ActivityPayload, EstimateHours, PersistedActivityData,
        PersistedTaskData, ProjectId, ProjectSummary, Task, TaskActivityLogEntry, TaskEventType,
        TaskId, TaskLabels, TaskListing, TaskPriority, TaskStatus, views::sort_tasks,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Task rows and their activity entries are written inside one database
/// transaction.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(
        &self,
        task: &Task,
        created: &TaskActivityLogEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = to_new_row(task);
        let activity_row = to_activity_row(created)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let project_exists = projects::table
                    .find(project_id.into_inner())
                    .select(projects::id)
                    .first::<uuid::Uuid>(tx)
                    .optional()?
                    .is_some();
                if !project_exists {
                    return Err(TaskRepositoryError::UnknownProject(project_id));
                }

                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(task_activity_log::table)
                    .values(&activity_row)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        activity: &[TaskActivityLogEntry],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);
        let activity_rows = activity
            .iter()
            .map(to_activity_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                    .set(&changeset)
                    .execute(tx)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }
                if !activity_rows.is_empty() {
                    diesel::insert_into(task_activity_log::table)
                        .values(&activity_rows)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::delete(
                    task_activity_log::table.filter(task_activity_log::task_id.eq(id.into_inner())),
                )
                .execute(tx)?;
                let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(tx)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskListing>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .left_join(projects::table)
                .filter(tasks::id.eq(id.into_inner()))
                .select((TaskRow::as_select(), Option::<ProjectRow>::as_select()))
                .first::<(TaskRow, Option<ProjectRow>)>(connection)
                .optional()?;
            row.map(row_to_listing).transpose()
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>> {
        let criteria = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .left_join(projects::table)
                .select((TaskRow::as_select(), Option::<ProjectRow>::as_select()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .into_boxed();
            if let Some(project_id) = criteria.project_id {
                statement = statement.filter(tasks::project_id.eq(project_id.into_inner()));
            }
            if let Some(status) = criteria.filter.status {
                statement = statement.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = criteria.filter.priority {
                statement = statement.filter(tasks::priority.eq(priority.as_str()));
            }

            let rows = statement.load::<(TaskRow, Option<ProjectRow>)>(connection)?;
            let mut listings = Vec::with_capacity(rows.len());
            for row in rows {
                let listing = row_to_listing(row)?;
                // Text and label criteria are evaluated in the domain.
                if criteria.matches(&listing.task) {
                    listings.push(listing);
                }
            }
            sort_tasks(&mut listings, criteria.sort);
            Ok(listings)
        })
        .await
    }

    async fn activity_log(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskActivityLogEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_activity_log::table
                .filter(task_activity_log::task_id.eq(id.into_inner()))
                .order((
                    task_activity_log::occurred_at.desc(),
                    task_activity_log::seq.desc(),
                ))
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> TaskRepositoryResult<Option<ProjectSummary>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(row_to_project))
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        labels: task.labels().to_storage_text(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        blocked_reason: task.blocked_reason().map(str::to_owned),
        estimate_hours: task.estimate_hours().map(EstimateHours::value),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        labels: task.labels().to_storage_text(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        blocked_reason: task.blocked_reason().map(str::to_owned),
        estimate_hours: task.estimate_hours().map(EstimateHours::value),
        updated_at: task.updated_at(),
    }
}

fn to_activity_row(entry: &TaskActivityLogEntry) -> TaskRepositoryResult<NewActivityRow> {
    let payload = entry
        .payload()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    Ok(NewActivityRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        event_type: entry.event_type().as_str().to_owned(),
        payload,
        occurred_at: entry.timestamp(),
    })
}

fn row_to_project(row: ProjectRow) -> ProjectSummary {
    ProjectSummary::new(ProjectId::from_uuid(row.id), row.name)
}

fn row_to_listing(
    (task_row, project_row): (TaskRow, Option<ProjectRow>),
) -> TaskRepositoryResult<TaskListing> {
    Ok(TaskListing::new(
        row_to_task(task_row)?,
        project_row.map(row_to_project),
    ))
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let estimate_hours = row
        .estimate_hours
        .map(EstimateHours::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: row.title,
        description: row.description,
        status,
        priority,
        labels: TaskLabels::from_storage_text(row.labels.as_deref()),
        due_date: row.due_date,
        completed_at: row.completed_at,
        blocked_reason: row.blocked_reason,
        estimate_hours,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_activity(row: ActivityRow) -> TaskRepositoryResult<TaskActivityLogEntry> {
    let event_type =
        TaskEventType::try_from(row.event_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let payload = row
        .payload
        .map(serde_json::from_value::<ActivityPayload>)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskActivityLogEntry::from_persisted(PersistedActivityData {
        id: ActivityLogEntryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        event_type,
        payload,
        timestamp: row.occurred_at,
    }))
}
