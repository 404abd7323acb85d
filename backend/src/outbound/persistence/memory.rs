//! Process-local storage used when no database is configured.
//!
//! One mutex guards every table, so key assignment and append are a single
//! critical section: concurrent inserts never share a key and keys have no
//! gaps. Contents are lost when the process exits.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    ContactPersistenceError, ContactRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    ContactId, ContactSubmission, NewUser, StoredContact, User, UserId, Username,
};

#[derive(Default)]
struct Tables {
    contacts: Vec<StoredContact>,
    users: Vec<User>,
    next_contact_id: i32,
    next_user_id: i32,
}

struct StoreFull;

impl Tables {
    fn allocate(counter: &mut i32) -> Result<i32, StoreFull> {
        let id = counter.checked_add(1).ok_or(StoreFull)?;
        *counter = id;
        Ok(id)
    }
}

/// In-memory implementation of both storage ports.
///
/// Cloning shares the underlying tables.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    // Every mutation is a single push, so a poisoned lock still guards
    // consistent tables.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ContactRepository for InMemoryStore {
    async fn create(
        &self,
        submission: &ContactSubmission,
    ) -> Result<StoredContact, ContactPersistenceError> {
        let created_at = self.clock.utc();
        let mut tables = self.lock();
        let id = Tables::allocate(&mut tables.next_contact_id)
            .map_err(|StoreFull| ContactPersistenceError::query("contact key space exhausted"))?;
        let stored = StoredContact {
            id: ContactId::new(id),
            submission: submission.clone(),
            created_at,
        };
        tables.contacts.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: ContactId,
    ) -> Result<Option<StoredContact>, ContactPersistenceError> {
        Ok(self
            .lock()
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StoredContact>, ContactPersistenceError> {
        Ok(self.lock().contacts.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock();
        if tables
            .users
            .iter()
            .any(|existing| existing.username == user.username)
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        let id = Tables::allocate(&mut tables.next_user_id)
            .map_err(|StoreFull| UserPersistenceError::query("user key space exhausted"))?;
        let stored = User {
            id: UserId::new(id),
            username: user.username.clone(),
            credential: user.credential.clone(),
        };
        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| &user.username == username)
            .cloned())
    }
}
