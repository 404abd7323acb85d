//! Backend entry-point: loads configuration, selects storage and mail
//! adapters, and serves the consultation API.

mod server;

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::mail::{SmtpMailTransport, SmtpSetupError};
use backend::outbound::persistence::{Storage, StorageError};
use backend::settings::{AppConfig, ConfigError, DatabaseConfig};

use server::{ServerConfig, build_contact_command, create_server};

/// Failures that stop the process before it starts serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),
    #[error("mail transport setup failed: {0}")]
    Mail(#[from] SmtpSetupError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    run().await.inspect_err(|err| {
        error!(error = %err, "backend stopped");
    })
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.log_summary();

    let storage = Storage::connect(
        config.database.as_ref().map(DatabaseConfig::pool_config),
        Arc::new(DefaultClock),
    )
    .await?;
    let transport = Arc::new(SmtpMailTransport::new(&config.mail)?);
    let contact = build_contact_command(&storage, transport, config.notifications.clone());

    let server = create_server(ServerConfig::new(config.host.as_str(), config.port, contact))?;
    server.await?;
    Ok(())
}
