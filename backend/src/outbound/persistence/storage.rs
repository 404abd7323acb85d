//! Selection of the storage variant at process start.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{ContactRepository, UserRepository};

use super::memory::InMemoryStore;
use super::migrations::{MigrationError, run_pending_migrations};
use super::pool::{DbPool, PoolConfig, PoolError};
use super::{DieselContactRepository, DieselUserRepository};

/// Which storage variant is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    InMemory,
}

/// Errors raised while opening durable storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// The repositories for the selected variant, shared by every request.
#[derive(Clone)]
pub struct Storage {
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
    kind: StorageKind,
}

impl Storage {
    /// Process-local storage; contents are lost on restart.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store = InMemoryStore::new(clock);
        Self {
            contacts: Arc::new(store.clone()),
            users: Arc::new(store),
            kind: StorageKind::InMemory,
        }
    }

    /// Migrate the database and open a pool against it.
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be reached or migrated. Callers should
    /// treat this as fatal rather than fall back to memory.
    pub async fn postgres(config: PoolConfig) -> Result<Self, StorageError> {
        run_pending_migrations(config.database_url()).await?;
        let pool = DbPool::new(config).await?;
        Ok(Self {
            contacts: Arc::new(DieselContactRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool)),
            kind: StorageKind::Postgres,
        })
    }

    /// Open PostgreSQL when configured, otherwise in-memory storage.
    pub async fn connect(
        database: Option<PoolConfig>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        match database {
            Some(config) => {
                let storage = Self::postgres(config).await?;
                info!("using PostgreSQL contact storage");
                Ok(storage)
            }
            None => {
                warn!("DATABASE_URL not set; contacts are kept in memory and lost on restart");
                Ok(Self::in_memory(clock))
            }
        }
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }
}
