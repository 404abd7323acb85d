//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{contacts, users};

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub interest: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new contact records; key and timestamp are
/// assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub company: &'a str,
    pub interest: &'a str,
    pub message: Option<&'a str>,
}

/// Row struct for reading from the users table.
#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
