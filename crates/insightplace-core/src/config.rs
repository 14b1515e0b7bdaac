//! Runtime configuration read from environment variables.
//!
//! Loading `.env` files is the binary's job; this module only reads
//! variables that are already set.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8001;

/// Default access token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@insightplace.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_SENDER_EMAIL: &str = "contacto@insight-place.com";
pub const DEFAULT_PORTAL_URL: &str = "http://localhost:3000";

const INSECURE_SECRET_KEY: &str = "your-secret-key-change-this-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Mail delivery settings.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// `None` disables outgoing mail.
    pub api_key: Option<SecretString>,
    pub sender_email: String,
    /// Base URL used for links in emails.
    pub portal_url: String,
}

/// Credentials of the bootstrap administrator and demo seeding switch.
#[derive(Debug, Clone)]
pub struct SeedSettings {
    pub admin_email: String,
    pub admin_password: SecretString,
    pub demo_data: bool,
}

/// Complete portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    pub secret_key: SecretString,
    pub token_ttl_hours: i64,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub seed: SeedSettings,
    pub mail: MailSettings,
}

impl PortalConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret_key = get("SECRET_KEY").unwrap_or_else(|| {
            tracing::warn!("SECRET_KEY not set; using an insecure development key");
            INSECURE_SECRET_KEY.to_string()
        });

        let token_ttl_hours = match get("ACCESS_TOKEN_EXPIRE_HOURS") {
            Some(raw) => parse_positive("ACCESS_TOKEN_EXPIRE_HOURS", &raw)?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let demo_data = match get("SEED_DEMO_DATA") {
            Some(raw) => parse_bool("SEED_DEMO_DATA", &raw)?,
            None => false,
        };

        Ok(Self {
            database_path: get("DATABASE_PATH")
                .map_or_else(|| PathBuf::from("./data/insightplace.db"), PathBuf::from),
            upload_dir: get("UPLOAD_DIR").map_or_else(|| PathBuf::from("./uploads"), PathBuf::from),
            secret_key: SecretString::from(secret_key),
            token_ttl_hours,
            cors_origins: parse_origins(get("CORS_ORIGINS").as_deref().unwrap_or("*")),
            port,
            seed: SeedSettings {
                admin_email: get("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
                admin_password: SecretString::from(
                    get("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
                ),
                demo_data,
            },
            mail: MailSettings {
                api_key: get("RESEND_API_KEY").map(SecretString::from),
                sender_email: get("SENDER_EMAIL")
                    .unwrap_or_else(|| DEFAULT_SENDER_EMAIL.to_string()),
                portal_url: get("PORTAL_URL")
                    .map_or_else(|| DEFAULT_PORTAL_URL.to_string(), |u| u.trim_end_matches('/').to_string()),
            },
        })
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

/// Split a comma-separated origin list. `*` anywhere means any origin.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<i64, ConfigError> {
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be positive".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PortalConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        PortalConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.port, 8001);
        assert_eq!(cfg.token_ttl_hours, 24);
        assert!(cfg.cors_origins.is_empty());
        assert_eq!(cfg.seed.admin_email, "admin@insightplace.com");
        assert_eq!(cfg.seed.admin_password.expose_secret(), "admin123");
        assert!(!cfg.seed.demo_data);
        assert!(cfg.mail.api_key.is_none());
        assert_eq!(cfg.mail.sender_email, "contacto@insight-place.com");
        assert_eq!(cfg.upload_dir, PathBuf::from("./uploads"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(&[
            ("PORT", "9000"),
            ("ACCESS_TOKEN_EXPIRE_HOURS", "2"),
            ("CORS_ORIGINS", "https://a.io, https://b.io"),
            ("SEED_DEMO_DATA", "TRUE"),
            ("RESEND_API_KEY", "re_123"),
            ("PORTAL_URL", "https://portal.example/"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.token_ttl(), chrono::Duration::hours(2));
        assert_eq!(cfg.cors_origins, vec!["https://a.io", "https://b.io"]);
        assert!(cfg.seed.demo_data);
        assert!(cfg.mail.api_key.is_some());
        assert_eq!(cfg.mail.portal_url, "https://portal.example");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = load(&[("RESEND_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert!(cfg.mail.api_key.is_none());
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("ACCESS_TOKEN_EXPIRE_HOURS", "0")]).is_err());
        assert!(load(&[("SEED_DEMO_DATA", "maybe")]).is_err());
    }

    #[test]
    fn wildcard_origin_means_any() {
        assert!(parse_origins("https://a.io,*").is_empty());
        assert!(parse_origins("").is_empty());
    }
}
