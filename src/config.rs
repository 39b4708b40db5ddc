// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Token secrets and upstream credentials are read once at startup. A `.env`
//! file is honored for local development.

use std::env;

/// Which storage backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Firestore,
    Memory,
}

/// TransportAPI endpoints and credentials.
#[derive(Clone)]
pub struct TapiConfig {
    pub app_id: String,
    pub app_key: String,
    /// Place search endpoint (`.../places.json`)
    pub places_url: String,
    /// Public journey planner base URL (`.../public/journey`)
    pub public_journey_url: String,
    /// Journey planner `service` region parameter
    pub service_name: String,
    pub timeout_secs: u64,
}

/// SMTP relay used for contact-us mail.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    pub database_backend: DatabaseBackend,

    /// HMAC key for access tokens (raw bytes)
    pub access_token_secret: Vec<u8>,
    /// HMAC key for refresh tokens, never equal to the access key
    pub refresh_token_secret: Vec<u8>,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
    pub bcrypt_cost: u32,

    pub tapi: TapiConfig,
    /// `None` disables outbound mail.
    pub smtp: Option<SmtpConfig>,
}

const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_TAPI_PLACES_URL: &str = "https://transportapi.com/v3/uk/places.json";
const DEFAULT_TAPI_JOURNEY_URL: &str = "https://transportapi.com/v3/uk/public/journey";
const DEFAULT_TAPI_SERVICE: &str = "southeast";

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let access_token_secret = required("AT_SECRET_KEY")?.into_bytes();
        let refresh_token_secret = required("RT_SECRET_KEY")?.into_bytes();
        if access_token_secret == refresh_token_secret {
            return Err(ConfigError::Invalid(
                "RT_SECRET_KEY",
                "must differ from AT_SECRET_KEY".to_string(),
            ));
        }

        let bcrypt_cost = parsed("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "BCRYPT_COST",
                format!("{} is outside 4..=31", bcrypt_cost),
            ));
        }

        let access_token_ttl_secs = parsed("AT_EXPIRES_IN", DEFAULT_ACCESS_TTL_SECS)?;
        let refresh_token_ttl_secs = parsed("RT_EXPIRES_IN", DEFAULT_REFRESH_TTL_SECS)?;
        if access_token_ttl_secs <= 0 || refresh_token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid(
                "AT_EXPIRES_IN",
                "token lifetimes must be positive".to_string(),
            ));
        }

        let database_backend = match env::var("DATABASE_BACKEND").as_deref() {
            Ok("memory") => DatabaseBackend::Memory,
            Ok("firestore") | Err(_) => DatabaseBackend::Firestore,
            Ok(other) => {
                return Err(ConfigError::Invalid(
                    "DATABASE_BACKEND",
                    format!("unknown backend '{}'", other),
                ))
            }
        };

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) if !host.trim().is_empty() => Some(SmtpConfig {
                host: host.trim().to_string(),
                port: parsed("SMTP_PORT", 587)?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }),
            _ => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            database_backend,
            access_token_secret,
            refresh_token_secret,
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            bcrypt_cost,
            tapi: TapiConfig {
                app_id: required("TAPI_APP_ID")?,
                app_key: required("TAPI_APP_KEY")?,
                places_url: env::var("TAPI_PLACES_URL")
                    .unwrap_or_else(|_| DEFAULT_TAPI_PLACES_URL.to_string()),
                public_journey_url: env::var("TAPI_PUBLIC_JOURNEY_URL")
                    .unwrap_or_else(|_| DEFAULT_TAPI_JOURNEY_URL.to_string()),
                service_name: env::var("TAPI_SERVICE_NAME")
                    .unwrap_or_else(|_| DEFAULT_TAPI_SERVICE.to_string()),
                timeout_secs: parsed("HTTP_TIMEOUT_SECS", 10)?,
            },
            smtp,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            database_backend: DatabaseBackend::Memory,
            access_token_secret: b"test_access_secret_32_bytes_min!".to_vec(),
            refresh_token_secret: b"test_refresh_secret_32_bytes_mn!".to_vec(),
            access_token_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            // Minimum cost keeps hashing fast in tests.
            bcrypt_cost: 4,
            tapi: TapiConfig {
                app_id: "test_app_id".to_string(),
                app_key: "test_app_key".to_string(),
                places_url: "http://127.0.0.1:9/places.json".to_string(),
                public_journey_url: "http://127.0.0.1:9/public/journey".to_string(),
                service_name: DEFAULT_TAPI_SERVICE.to_string(),
                timeout_secs: 5,
            },
            smtp: None,
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, format!("cannot parse '{}'", raw))),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
