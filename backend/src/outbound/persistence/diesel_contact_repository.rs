//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! The database assigns both the key (`SERIAL`) and the timestamp
//! (`DEFAULT now()`); inserts read them back with `RETURNING`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{ContactId, ContactSubmission, InterestArea, StoredContact};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ContactPersistenceError {
    map_pool_error(error, ContactPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ContactPersistenceError {
    map_diesel_error(
        error,
        ContactPersistenceError::query,
        ContactPersistenceError::connection,
    )
}

fn row_to_contact(row: ContactRow) -> Result<StoredContact, ContactPersistenceError> {
    let interest: InterestArea = row.interest.parse().map_err(|_| {
        ContactPersistenceError::query(format!("unknown interest in database: {}", row.interest))
    })?;
    Ok(StoredContact {
        id: ContactId::new(row.id),
        submission: ContactSubmission::from_trusted(
            row.full_name,
            row.email,
            row.company,
            interest,
            row.message,
        ),
        created_at: row.created_at,
    })
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn create(
        &self,
        submission: &ContactSubmission,
    ) -> Result<StoredContact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewContactRow {
            full_name: submission.full_name(),
            email: submission.email(),
            company: submission.company(),
            interest: submission.interest().as_str(),
            message: submission.message(),
        };

        let inserted: ContactRow = diesel::insert_into(contacts::table)
            .values(&row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_contact(inserted)
    }

    async fn find_by_id(
        &self,
        id: ContactId,
    ) -> Result<Option<StoredContact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id.get())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn list(&self) -> Result<Vec<StoredContact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::id.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn row(interest: &str) -> ContactRow {
        ContactRow {
            id: 7,
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            company: "Acme".into(),
            interest: interest.into(),
            message: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[rstest]
    fn rows_convert_to_stored_contacts() {
        let contact = row_to_contact(row("rag-llm")).expect("valid row");

        assert_eq!(contact.id, ContactId::new(7));
        assert_eq!(contact.submission.interest(), InterestArea::RagLlm);
        assert_eq!(contact.submission.message(), None);
    }

    #[rstest]
    fn unknown_stored_interest_is_a_query_error() {
        let err = row_to_contact(row("astrology")).expect_err("bad row");

        assert_eq!(
            err,
            ContactPersistenceError::query("unknown interest in database: astrology")
        );
    }
}
