use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::IpAddr;

/// Credentials for the admin account created on first boot
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Public base URL of this deployment (used in the SPA shell)
    pub public_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Secret the site credential key is derived from
    pub encryption_key: String,
    pub allowed_origins: Vec<String>,
    pub enabled_modules: Vec<String>,
    pub mail_webhook_url: Option<String>,
    pub mail_from: String,
    pub admin_seed: Option<AdminSeed>,
    /// Per-IP request budget for the whole API; off unless configured
    pub rate_limit_per_second: Option<u64>,
    /// Reverse proxies whose `X-Forwarded-For`/`X-Real-IP` headers are believed
    pub trusted_proxies: Vec<IpAddr>,
}

pub const DEFAULT_MODULES: &[&str] = &["dashboard", "sites", "leads", "tasks", "financial"];

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let admin_seed = match env::var("ADMIN_PASSWORD") {
            Ok(password) if !password.is_empty() => Some(AdminSeed {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@company.com".to_string()),
                password,
            }),
            _ => None,
        };

        let rate_limit_per_second = match env::var("RATE_LIMIT_PER_SECOND") {
            Ok(value) if value == "0" || value.eq_ignore_ascii_case("off") => None,
            Ok(value) => Some(
                value
                    .parse()
                    .context("RATE_LIMIT_PER_SECOND must be a number or 'off'")?,
            ),
            Err(_) => None,
        };

        let trusted_proxies = parse_ip_list(env::var("TRUSTED_PROXIES").ok())?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port,
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "company-hub".to_string()),
            encryption_key: env::var("ENCRYPTION_KEY").context("ENCRYPTION_KEY must be set")?,
            allowed_origins: split_list(env::var("ALLOWED_ORIGINS").ok()),
            enabled_modules: env::var("ENABLED_MODULES")
                .ok()
                .map(|v| split_list(Some(v)))
                .filter(|modules| !modules.is_empty())
                .unwrap_or_else(|| DEFAULT_MODULES.iter().map(|m| m.to_string()).collect()),
            mail_webhook_url: env::var("MAIL_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Company Hub <noreply@localhost>".to_string()),
            admin_seed,
            rate_limit_per_second,
            trusted_proxies,
        })
    }
}

/// Split a comma-separated env value, dropping blanks
fn split_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_ip_list(value: Option<String>) -> Result<Vec<IpAddr>> {
    split_list(value)
        .iter()
        .map(|entry| {
            entry
                .parse::<IpAddr>()
                .with_context(|| format!("TRUSTED_PROXIES entry '{}' is not an IP address", entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        let parsed = split_list(Some(" https://a.example , ,https://b.example".to_string()));
        assert_eq!(parsed, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn split_list_handles_missing_value() {
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn trusted_proxies_parse_and_reject_garbage() {
        let parsed = parse_ip_list(Some("10.0.0.1, ::1".to_string())).unwrap();
        assert_eq!(parsed, vec!["10.0.0.1".parse::<IpAddr>().unwrap(), "::1".parse().unwrap()]);
        assert!(parse_ip_list(None).unwrap().is_empty());
        assert!(parse_ip_list(Some("10.0.0.1,proxy.local".to_string())).is_err());
    }
}
