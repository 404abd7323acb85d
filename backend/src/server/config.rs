//! HTTP server configuration object and helpers.

use std::sync::Arc;

use backend::domain::ports::ContactSubmissionCommand;

/// Largest request body accepted by the API, in bytes.
pub const DEFAULT_PAYLOAD_LIMIT: usize = 64 * 1024;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) contact: Arc<dyn ContactSubmissionCommand>,
    pub(crate) payload_limit: usize,
}

impl ServerConfig {
    /// Construct a server configuration bound to `host:port`.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        contact: Arc<dyn ContactSubmissionCommand>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            contact,
            payload_limit: DEFAULT_PAYLOAD_LIMIT,
        }
    }

    /// Override the request body limit.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server tests only")
    )]
    #[must_use]
    pub fn with_payload_limit(mut self, bytes: usize) -> Self {
        self.payload_limit = bytes;
        self
    }
}
