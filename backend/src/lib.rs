//! Consultation request backend for the vSecureBytes website.
//!
//! The crate is laid out as ports and adapters: [`domain`] holds the
//! submission pipeline, [`inbound`] exposes it over HTTP and [`outbound`]
//! provides PostgreSQL, in-memory and SMTP adapters. [`settings`] loads the
//! environment configuration consumed by the binary.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
