//! Diesel schema for the user and category directory.

diesel::table! {
    /// Users that tasks can be assigned to.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Notification address.
        #[max_length = 255]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Whether the user still receives notifications.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Name-only task categories.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Category name.
        #[max_length = 255]
        name -> Varchar,
    }
}
