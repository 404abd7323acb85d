//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Consultation requests, one row per accepted submission.
    contacts (id) {
        /// `SERIAL` surrogate key; increases with insertion order.
        id -> Int4,
        full_name -> Varchar,
        email -> Varchar,
        company -> Varchar,
        /// Canonical interest value, e.g. `penetration-testing`.
        interest -> Varchar,
        message -> Nullable<Text>,
        /// Defaults to `now()` on insert.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        /// Unique login name.
        username -> Varchar,
        password -> Text,
    }
}
