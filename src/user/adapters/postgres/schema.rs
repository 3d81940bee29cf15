//! Diesel schema for user account persistence.

diesel::table! {
    /// User account records.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique account username.
        #[max_length = 255]
        username -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Tombstone timestamp for retired accounts.
        deleted_at -> Nullable<Timestamptz>,
    }
}
