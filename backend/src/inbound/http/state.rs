//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ContactSubmissionCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contact: Arc<dyn ContactSubmissionCommand>,
}

impl HttpState {
    pub fn new(contact: Arc<dyn ContactSubmissionCommand>) -> Self {
        Self { contact }
    }
}
