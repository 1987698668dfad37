//! Diesel schema for task workflow persistence.

diesel::table! {
    /// Users that tasks can be assigned to.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique contact address.
        #[max_length = 255]
        email -> Varchar,
    }
}

diesel::table! {
    /// Task records with workflow position and custom fields.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task type tag.
        #[max_length = 50]
        task_type -> Varchar,
        /// One-based workflow status.
        status -> Int4,
        /// Open or closed.
        #[max_length = 20]
        lifecycle_state -> Varchar,
        /// Assigned user.
        assignee_id -> Uuid,
        /// Custom field payload.
        custom_fields -> Jsonb,
        /// Optimistic concurrency revision.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (assignee_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
