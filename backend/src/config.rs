use ::config::{Config, Environment, File};
#[cfg(test)]
use ::config::FileFormat;
use serde::Deserialize;

use crate::application::discussion::NotificationSettings;

pub const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub enrollment: EnrollmentSettings,
    pub comments: CommentsSettings,
    pub notifications: NotificationsConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentSettings {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    pub enabled: bool,
    pub default_language: String,
    pub site_name: String,
    pub platform_name: String,
    pub from_address: String,
    /// Email is only logged when unset
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub queue_capacity: usize,
}

impl NotificationsConfig {
    pub fn handler_settings(&self) -> NotificationSettings {
        NotificationSettings {
            enabled: self.enabled,
            default_language: self.default_language.clone(),
            site_name: self.site_name.clone(),
            platform_name: self.platform_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Settings {
    /// Defaults, then `config/default.toml`, then the file named by
    /// `ENTITLEMENTS_CONFIG`, then `ENTITLEMENTS__SECTION__KEY` variables.
    pub fn load() -> anyhow::Result<Self> {
        let mut builder = Self::defaults()?.add_source(File::with_name("config/default").required(false));
        if let Ok(path) = std::env::var("ENTITLEMENTS_CONFIG") {
            builder = builder.add_source(File::with_name(&path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("ENTITLEMENTS").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Defaults overlaid with an inline TOML document
    #[cfg(test)]
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults() -> anyhow::Result<::config::ConfigBuilder<::config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:8080")?
            .set_default("database.url", "sqlite://entitlements.db")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("enrollment.base_url", "http://localhost:8000")?
            .set_default("enrollment.timeout_secs", 10)?
            .set_default("comments.base_url", "http://localhost:4567")?
            .set_default("comments.timeout_secs", 5)?
            .set_default("notifications.enabled", true)?
            .set_default("notifications.default_language", "en")?
            .set_default("notifications.site_name", "localhost")?
            .set_default("notifications.platform_name", "Open edX")?
            .set_default("notifications.from_address", "no-reply@example.com")?
            .set_default("notifications.smtp_port", 25)?
            .set_default("notifications.queue_capacity", 1024)?
            .set_default("logging.filter", "info,sqlx=warn")?)
    }
}
