//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Timestamp of the most recent completion.
        completed_at -> Nullable<Timestamptz>,
        /// Estimated effort in hours.
        estimated_hours -> Nullable<Int4>,
        /// Actual effort in hours.
        actual_hours -> Nullable<Int4>,
        /// Assigned user, if any.
        assignee_id -> Nullable<Uuid>,
        /// Category, if any.
        category_id -> Nullable<Uuid>,
        /// Optimistic concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
