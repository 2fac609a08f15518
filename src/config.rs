use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be a valid number")]
    InvalidNumber(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub sign_key: String,
    pub password_recovery_key: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
}

/// Front-end pages the mailed links point at.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub confirmation_email_url: String,
    pub password_recovery_url: String,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub tokens: TokenConfig,
    pub admin_secret: String,
    pub smtp: SmtpConfig,
    pub client: ClientConfig,
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let number = |key: &'static str, default: &str| {
            or_default(key, default)
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber(key))
        };

        Ok(Self {
            server: ServerConfig {
                host: or_default("HOST", "0.0.0.0"),
                port: number("PORT", "8080")?,
            },
            database_url: required("DATABASE_URL")?,
            tokens: TokenConfig {
                sign_key: required("TOKENS_SIGN_KEY")?,
                password_recovery_key: required("TOKEN_PASSWORD_RECOVERY_KEY")?,
            },
            admin_secret: required("ADMIN_SECRET")?,
            smtp: SmtpConfig {
                server: required("SMTP_SERVER")?,
                port: number("SMTP_PORT", "587")?,
                sender: required("SMTP_SENDER")?,
                password: required("SMTP_PASSWORD")?,
            },
            client: ClientConfig {
                confirmation_email_url: required("CLIENT_CONFIRMATION_EMAIL_URL")?,
                password_recovery_url: required("CLIENT_PASSWORD_RECOVERY_URL")?,
            },
            media: MediaConfig {
                root: PathBuf::from(or_default("MEDIA_ROOT", "./media")),
                base_url: or_default("MEDIA_BASE_URL", "http://localhost:8080/media"),
            },
        })
    }
}
