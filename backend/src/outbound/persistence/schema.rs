//! Diesel table definitions.
//!
//! Must match the DDL applied by [`super::bootstrap`].

diesel::table! {
    /// To-do items.
    todolist (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Title, 3 to 100 characters.
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// `pending` or `completed`.
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
    }
}

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Argon2 PHC hash of the password.
        password -> Text,
    }
}
