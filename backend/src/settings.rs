//! Runtime configuration loaded from the environment via OrthoConfig.
//!
//! Each variable prefix has its own settings struct. [`AppConfig::load`]
//! reads them all once at startup and validates them into a single value that
//! the adapters borrow. Blank variables are treated as unset.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use email_address::EmailAddress;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::info;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{DEFAULT_NOTIFICATION_TIMEOUT, NotificationSettings};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CONTACT_ADDRESS: &str = "contact@vsecurebytes.com";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Listener settings (`SERVER_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Mail relay settings (`SMTP_*`).
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SMTP")]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Per-command socket timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Older credential names (`EMAIL_USER`, `EMAIL_PASS`), consulted when the
/// `SMTP_*` equivalents are unset.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMAIL")]
pub struct LegacyEmailSettings {
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// Contact notification settings (`CONTACT_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACT")]
pub struct ContactSettings {
    /// Operator inbox for new consultation requests.
    pub email: Option<String>,
    /// From address on both notifications.
    pub sender: Option<String>,
    /// Overall deadline for both notification sends.
    pub notify_timeout_ms: Option<u64>,
}

/// Durable storage settings (`DATABASE_*`).
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

macro_rules! redacted_debug {
    ($ty:ident { $($field:ident),* } secret { $($secret:ident),* }) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    $(.field(stringify!($field), &self.$field))*
                    $(.field(
                        stringify!($secret),
                        &self.$secret.as_ref().map(|_| "<redacted>"),
                    ))*
                    .finish()
            }
        }
    };
}

redacted_debug!(SmtpSettings { host, port, user, timeout_secs } secret { pass });
redacted_debug!(LegacyEmailSettings { user } secret { pass });
redacted_debug!(DatabaseSettings { max_connections } secret { url });

/// Every settings section, as read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub smtp: SmtpSettings,
    pub legacy_email: LegacyEmailSettings,
    pub contact: ContactSettings,
    pub database: DatabaseSettings,
}

// OrthoConfig merges an empty environment layer to `null`, which no section
// struct deserialises from.
fn section_is_unset(section: &str) -> bool {
    let prefix = format!("{section}_");
    !env::vars_os().any(|(name, _)| {
        name.to_str()
            .is_some_and(|name| name.to_ascii_uppercase().starts_with(&prefix))
    })
}

fn load_section<T: OrthoConfig + Default>(section: &'static str) -> Result<T, ConfigError> {
    if section_is_unset(section) {
        return Ok(T::default());
    }
    T::load_from_iter([OsString::from("backend")]).map_err(|err| ConfigError::Load {
        section,
        message: err.to_string(),
    })
}

impl Settings {
    /// Read every section from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            server: load_section("SERVER")?,
            smtp: load_section("SMTP")?,
            legacy_email: load_section("EMAIL")?,
            contact: load_section("CONTACT")?,
            database: load_section("DATABASE")?,
        })
    }
}

/// Invalid or unreadable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load {section} settings: {message}")]
    Load {
        section: &'static str,
        message: String,
    },
    #[error("{variable} must be greater than zero")]
    Zero { variable: &'static str },
    #[error("{variable} is not a valid email address: {value}")]
    InvalidAddress {
        variable: &'static str,
        value: String,
    },
    #[error("{present} is set but {missing} is not")]
    IncompleteCredentials {
        present: &'static str,
        missing: &'static str,
    },
    #[error("DATABASE_URL is not a valid URL: {message}")]
    InvalidDatabaseUrl { message: String },
    #[error("DATABASE_URL must use postgres:// or postgresql://, got {scheme}://")]
    UnsupportedDatabaseScheme { scheme: String },
}

/// SMTP login. The password is wiped from memory on drop.
#[derive(Clone)]
pub struct SmtpCredentials {
    pub user: String,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated mail relay configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Option<SmtpCredentials>,
    pub timeout: Duration,
}

impl MailConfig {
    /// Port 465 speaks TLS from the first byte; every other port upgrades
    /// with STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

/// Validated PostgreSQL configuration.
#[derive(Clone)]
pub struct DatabaseConfig {
    url: Url,
    max_connections: u32,
}

impl DatabaseConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// The URL with any user name and password removed, suitable for logs.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        // Both setters only fail for URLs that cannot carry credentials.
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.to_string()
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.url.as_str()).with_max_size(self.max_connections)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mail: MailConfig,
    pub notifications: NotificationSettings,
    /// `None` selects in-memory storage.
    pub database: Option<DatabaseConfig>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn non_zero<T: Default + PartialEq>(value: T, variable: &'static str) -> Result<T, ConfigError> {
    if value == T::default() {
        return Err(ConfigError::Zero { variable });
    }
    Ok(value)
}

fn address(value: String, variable: &'static str) -> Result<String, ConfigError> {
    if EmailAddress::is_valid(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidAddress { variable, value })
    }
}

fn credentials(
    smtp: &SmtpSettings,
    legacy: &LegacyEmailSettings,
) -> Result<Option<SmtpCredentials>, ConfigError> {
    let user = present(smtp.user.clone())
        .map(|user| ("SMTP_USER", user))
        .or_else(|| present(legacy.user.clone()).map(|user| ("EMAIL_USER", user)));
    let password = present(smtp.pass.clone())
        .map(|pass| ("SMTP_PASS", pass))
        .or_else(|| present(legacy.pass.clone()).map(|pass| ("EMAIL_PASS", pass)));

    match (user, password) {
        (Some((_, user)), Some((_, password))) => Ok(Some(SmtpCredentials {
            user,
            password: Zeroizing::new(password),
        })),
        (None, None) => Ok(None),
        (Some((set, _)), None) => Err(ConfigError::IncompleteCredentials {
            present: set,
            missing: "SMTP_PASS",
        }),
        (None, Some((set, _))) => Err(ConfigError::IncompleteCredentials {
            present: set,
            missing: "SMTP_USER",
        }),
    }
}

fn database(settings: DatabaseSettings) -> Result<Option<DatabaseConfig>, ConfigError> {
    let Some(raw) = present(settings.url) else {
        return Ok(None);
    };
    let url = Url::parse(&raw).map_err(|err| ConfigError::InvalidDatabaseUrl {
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(ConfigError::UnsupportedDatabaseScheme {
            scheme: url.scheme().to_owned(),
        });
    }
    let max_connections = non_zero(
        settings.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        "DATABASE_MAX_CONNECTIONS",
    )?;
    Ok(Some(DatabaseConfig {
        url,
        max_connections,
    }))
}

impl AppConfig {
    /// Load and validate configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_settings(Settings::load()?)
    }

    /// Validate raw settings, applying defaults for unset values.
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let Settings {
            server,
            smtp,
            legacy_email,
            contact,
            database: database_settings,
        } = settings;

        let credentials = credentials(&smtp, &legacy_email)?;
        let mail = MailConfig {
            host: present(smtp.host).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned()),
            port: non_zero(smtp.port.unwrap_or(DEFAULT_SMTP_PORT), "SMTP_PORT")?,
            timeout: Duration::from_secs(non_zero(
                smtp.timeout_secs.unwrap_or(DEFAULT_SMTP_TIMEOUT_SECS),
                "SMTP_TIMEOUT_SECS",
            )?),
            credentials,
        };

        let operator_address = address(
            present(contact.email).unwrap_or_else(|| DEFAULT_CONTACT_ADDRESS.to_owned()),
            "CONTACT_EMAIL",
        )?;
        let sender_address = match present(contact.sender) {
            Some(sender) => address(sender, "CONTACT_SENDER")?,
            None => mail
                .credentials
                .as_ref()
                .map(|login| login.user.clone())
                .filter(|user| EmailAddress::is_valid(user))
                .unwrap_or_else(|| DEFAULT_CONTACT_ADDRESS.to_owned()),
        };
        let timeout = match contact.notify_timeout_ms {
            Some(ms) => Duration::from_millis(non_zero(ms, "CONTACT_NOTIFY_TIMEOUT_MS")?),
            None => DEFAULT_NOTIFICATION_TIMEOUT,
        };

        Ok(Self {
            host: present(server.host).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: non_zero(server.port.unwrap_or(DEFAULT_PORT), "SERVER_PORT")?,
            mail,
            notifications: NotificationSettings {
                operator_address,
                sender_address,
                timeout,
            },
            database: database(database_settings)?,
        })
    }

    /// Log the effective configuration without secrets.
    pub fn log_summary(&self) {
        let database = self
            .database
            .as_ref()
            .map_or_else(|| "in-memory".to_owned(), DatabaseConfig::redacted_url);
        info!(
            host = %self.host,
            port = self.port,
            smtp_host = %self.mail.host,
            smtp_port = self.mail.port,
            smtp_user = self.mail.credentials.as_ref().map(|login| login.user.as_str()),
            has_password = self.mail.credentials.is_some(),
            operator_address = %self.notifications.operator_address,
            sender_address = %self.notifications.sender_address,
            notify_timeout = ?self.notifications.timeout,
            %database,
            "configuration loaded"
        );
    }
}
