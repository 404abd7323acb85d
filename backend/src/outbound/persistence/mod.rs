//! Storage adapters for the contact and user ports.
//!
//! Two interchangeable variants are offered:
//!
//! - **PostgreSQL** via Diesel with async support from `diesel-async` and
//!   `bb8` pooling. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay internal to this module.
//! - **In-memory** for deployments without a database.
//!
//! [`Storage::connect`] picks one at startup.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{PoolConfig, Storage};
//!
//! let storage = Storage::connect(Some(PoolConfig::new(url)), clock).await?;
//! let stored = storage.contacts.create(&submission).await?;
//! ```

mod diesel_contact_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod memory;
mod migrations;
mod models;
mod pool;
mod schema;
mod storage;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::InMemoryStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use storage::{Storage, StorageError, StorageKind};
