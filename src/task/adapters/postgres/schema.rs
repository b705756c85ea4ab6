//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Projects that own tasks.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project display name.
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Labels encoded as a JSON text array.
        labels -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Completion timestamp while the task is done.
        completed_at -> Nullable<Timestamptz>,
        /// Optional blocked reason.
        blocked_reason -> Nullable<Text>,
        /// Optional estimate in hours.
        estimate_hours -> Nullable<Float8>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task activity entries.
    task_activity_log (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Insertion sequence used to order entries sharing a timestamp.
        seq -> Int8,
        /// Owning task.
        task_id -> Uuid,
        /// Event type.
        #[max_length = 50]
        event_type -> Varchar,
        /// Optional structured payload.
        payload -> Nullable<Jsonb>,
        /// Event timestamp.
        occurred_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(task_activity_log -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks, task_activity_log);
