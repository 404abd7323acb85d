//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Credential, NewUser, User, UserId, Username};

use super::diesel_error_mapping::{log_diesel_error, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn insert_error(error: DieselError, username: &Username) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        log_diesel_error(&error);
        return UserPersistenceError::duplicate_username(username.as_ref());
    }
    diesel_error(error)
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("invalid username in database: {err}")))?;
    Ok(User {
        id: UserId::new(row.id),
        username,
        credential: Credential::new(row.password),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewUserRow {
            username: user.username.as_ref(),
            password: user.credential.expose(),
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| insert_error(err, &user.username))?;

        row_to_user(inserted)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn username() -> Username {
        Username::new("ada").expect("valid username")
    }

    #[rstest]
    fn unique_violation_names_the_taken_username() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        assert_eq!(
            insert_error(error, &username()),
            UserPersistenceError::duplicate_username("ada")
        );
    }

    #[rstest]
    fn other_insert_failures_map_to_query_errors() {
        assert_eq!(
            insert_error(DieselError::NotFound, &username()),
            UserPersistenceError::query("record not found")
        );
    }

    #[rstest]
    fn rows_convert_to_users() {
        let user = row_to_user(UserRow {
            id: 3,
            username: "ada".into(),
            password: "hash".into(),
        })
        .expect("valid row");

        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.username, username());
        assert_eq!(user.credential.expose(), "hash");
    }
}
