//! Centralized configuration (environment variables + defaults).

use crate::infra::mail::SmtpSettings;
use anyhow::{anyhow, Context};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// Production site origins allowed to call the API with credentials.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://globaljpkp20caresurgisals746jj.firebaseapp.com",
    "https://globaljpkp20caresurgisals746jj.web.app",
    "https://globalcaresurgical.in",
    "https://secureapi-b8p3vzk19x.globalcaresurgical.in",
    "https://global-care-surgicals-user-app.firebaseapp.com",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL, or `memory://` for the in-process store.
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
    pub smtp: SmtpSettings,
    /// `From` header of every outgoing message.
    pub mail_from: String,
    /// Overrides the site URL printed in mail footers.
    pub site_url: Option<String>,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).ok_or_else(|| anyhow!("{} must be set", key));

        let smtp_username = required("SMTP_USERNAME")?;
        let smtp = SmtpSettings {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: parse_or("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            password: required("SMTP_PASSWORD")?,
            username: smtp_username.clone(),
        };

        let cors_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(list) => parse_origins(&list),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5u32)?.max(1),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string())),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", get("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)?,
            cors_origins,
            mail_from: get("MAIL_FROM").unwrap_or_else(|| format!("Global Care Surgicals <{}>", smtp_username)),
            site_url: get("SITE_URL"),
            smtp,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", key, v)),
        None => Ok(default),
    }
}

/// Splits a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("DATABASE_URL", "memory://"),
        ("SMTP_USERNAME", "noreply@example.com"),
        ("SMTP_PASSWORD", "secret"),
    ];

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(MINIMAL)).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
        assert_eq!(config.mail_from, "Global Care Surgicals <noreply@example.com>");
        assert!(config.site_url.is_none());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&MINIMAL[1..])).unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
    }

    #[test]
    fn bad_port_is_reported() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("PORT", "http"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().starts_with("PORT has an invalid value"));
    }

    #[test]
    fn origins_are_normalised() {
        assert_eq!(
            parse_origins(" https://a.example/ ,, http://localhost:5173"),
            vec!["https://a.example", "http://localhost:5173"]
        );
    }
}
