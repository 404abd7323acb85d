//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM, plus the
//!   in-memory fallback
//! - **mail**: SMTP delivery through `lettre`
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod persistence;
