//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the DDL in [`super::bootstrap`]. `diesel print-schema` against a
//! bootstrapped database regenerates this file.

diesel::table! {
    /// Todo items.
    ///
    /// `id` is a store-generated `BIGSERIAL`; both timestamps default to
    /// `now()` at insert time.
    todos (id) {
        /// Primary key assigned by the sequence.
        id -> Int8,
        /// Short name (max 50 characters).
        #[max_length = 50]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion flag.
        done -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
