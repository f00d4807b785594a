use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

const DEV_JWT_SECRET: &str = "homeservices-dev-secret-change-me";

/// One minute up to a full day
const ETA_OFFSET_RANGE: std::ops::RangeInclusive<i64> = 1..=1440;

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Demo auth
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub token_ttl_seconds: i64,
    pub demo_password: String,
    pub admin_email: String,

    // Data
    pub seed_demo_data: bool,

    // Quote engine
    pub eta_offset_minutes: i64,
    pub display_utc_offset_hours: i32,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Demo auth
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if env.is_prod() => bail!("JWT_SECRET must be set in prod"),
            _ => DEV_JWT_SECRET.to_string(),
        };
        let jwt_issuer =
            env::var("JWT_ISSUER").unwrap_or_else(|_| "homeservices-backend".to_string());
        let token_ttl_seconds = parsed_or("TOKEN_TTL_SECONDS", 86400); // 24 hours default
        let demo_password = env::var("DEMO_PASSWORD").unwrap_or_else(|_| "senha123".to_string());
        let admin_email = env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@teste.com".to_string())
            .trim()
            .to_lowercase();

        // Data
        let seed_demo_data = parsed_or("SEED_DEMO_DATA", true);

        // Quote engine
        let eta_offset_minutes = parsed_or("ETA_OFFSET_MINUTES", 25);
        let display_utc_offset_hours = parsed_or("DISPLAY_UTC_OFFSET_HOURS", -3);

        let settings = Settings {
            env,
            server_addr,
            cors_allow_origins,
            jwt_secret,
            jwt_issuer,
            token_ttl_seconds,
            demo_password,
            admin_email,
            seed_demo_data,
            eta_offset_minutes,
            display_utc_offset_hours,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Range checks for values the quote engine does arithmetic with
    pub fn validate(&self) -> Result<()> {
        if !ETA_OFFSET_RANGE.contains(&self.eta_offset_minutes) {
            bail!(
                "ETA_OFFSET_MINUTES must be between {} and {}",
                ETA_OFFSET_RANGE.start(),
                ETA_OFFSET_RANGE.end()
            );
        }
        if !(-23..=23).contains(&self.display_utc_offset_hours) {
            bail!("DISPLAY_UTC_OFFSET_HOURS must be between -23 and 23");
        }
        Ok(())
    }

    /// Settings for tests and embedding, no environment lookups
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_issuer: "homeservices-backend".to_string(),
            token_ttl_seconds: 3600,
            demo_password: "senha123".to_string(),
            admin_email: "admin@teste.com".to_string(),
            seed_demo_data: false,
            eta_offset_minutes: 25,
            display_utc_offset_hours: -3,
        }
    }
}
