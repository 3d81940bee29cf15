//! Diesel schema for notification persistence.

diesel::table! {
    /// Notification records with one-way read marking.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Addressee user identifier.
        user_id -> Uuid,
        /// Causing task event identifier.
        task_event_id -> Uuid,
        /// Copied event message.
        message -> Text,
        /// Read timestamp; null while unread.
        read_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
