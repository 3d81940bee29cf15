//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records with soft-delete tombstones.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        #[max_length = 255]
        description -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Collaborative status.
        #[max_length = 50]
        status -> Varchar,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Tombstone timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Assignment join records with revocation tombstones.
    task_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Assigned task identifier.
        task_id -> Uuid,
        /// Assignee user identifier.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Tombstone timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only task event records.
    task_events (id) {
        /// Event identifier.
        id -> Uuid,
        /// Task the event belongs to.
        task_id -> Uuid,
        /// Acting user identifier.
        actor_id -> Uuid,
        /// Event kind discriminant.
        #[max_length = 50]
        event_type -> Varchar,
        /// Structured event payload.
        payload -> Jsonb,
        /// Precomputed human-readable message.
        message -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignments);
