//! HTTP inbound adapter exposing REST endpoints.

pub mod contact;
pub mod error;
pub mod state;

pub use error::{ContactRejection, ContactResponse};
