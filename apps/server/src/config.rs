//! Server configuration read from `PF_`-prefixed environment variables.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use rust_decimal::Decimal;

use paperfolio_core::constants::DEFAULT_STARTING_CASH;

/// Runtime configuration, read once at startup. Unset variables fall back
/// to development defaults.
pub struct Config {
    /// Socket address the HTTP listener binds to (`PF_LISTEN_ADDR`).
    pub listen_addr: String,
    /// Path of the SQLite database file (`PF_DB_PATH`).
    pub db_path: String,
    /// Directory with the built front-end assets (`PF_STATIC_DIR`).
    pub static_dir: String,
    /// Allowed CORS origins (`PF_CORS_ALLOW_ORIGINS`, comma-separated).
    /// Empty means any origin.
    pub cors_allow_origins: Vec<String>,
    /// Per-request timeout in seconds (`PF_REQUEST_TIMEOUT_SECS`).
    pub request_timeout_secs: u64,
    /// Cash balance granted to new users (`PF_STARTING_CASH`).
    pub starting_cash: Decimal,
    /// Override for the quote provider base URL (`PF_QUOTE_BASE_URL`).
    pub quote_base_url: Option<String>,
    pub auth: AuthConfig,
}

pub struct AuthConfig {
    /// HS256 signing key bytes (`PF_JWT_SECRET`, base64).
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime in seconds (`PF_TOKEN_TTL_SECS`).
    pub token_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr = env_or("PF_LISTEN_ADDR", "0.0.0.0:8400");
        let db_path = env_or("PF_DB_PATH", "./data/paperfolio.db");
        let static_dir = env_or("PF_STATIC_DIR", "./dist");
        let cors_allow_origins = std::env::var("PF_CORS_ALLOW_ORIGINS")
            .map(|raw| parse_origin_list(&raw))
            .unwrap_or_default();
        let request_timeout_secs = parse_env("PF_REQUEST_TIMEOUT_SECS", 30);
        let starting_cash = std::env::var("PF_STARTING_CASH")
            .ok()
            .and_then(|raw| raw.trim().parse::<Decimal>().ok())
            .unwrap_or(DEFAULT_STARTING_CASH);
        let quote_base_url = std::env::var("PF_QUOTE_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            listen_addr,
            db_path,
            static_dir,
            cors_allow_origins,
            request_timeout_secs,
            starting_cash,
            quote_base_url,
            auth: AuthConfig::from_env(),
        }
    }
}

impl AuthConfig {
    fn from_env() -> Self {
        let jwt_secret = match std::env::var("PF_JWT_SECRET") {
            Ok(encoded) => match BASE64.decode(encoded.trim()) {
                Ok(bytes) if bytes.len() >= 32 => bytes,
                Ok(_) => {
                    tracing::warn!(
                        "PF_JWT_SECRET is shorter than 32 bytes; generating an ephemeral key"
                    );
                    random_secret()
                }
                Err(e) => {
                    tracing::warn!(
                        "PF_JWT_SECRET is not valid base64 ({}); generating an ephemeral key",
                        e
                    );
                    random_secret()
                }
            },
            Err(_) => {
                tracing::warn!(
                    "PF_JWT_SECRET not set; using an ephemeral key, sessions will not survive a restart"
                );
                random_secret()
            }
        };
        let token_ttl_secs = parse_env("PF_TOKEN_TTL_SECS", 86_400);

        Self {
            jwt_secret,
            token_ttl_secs,
        }
    }
}

/// Splits a comma-separated origin list. `*` (or an empty value) yields an
/// empty list, which the CORS layer treats as "any origin".
fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty() && origin != "*")
        .collect()
}

fn random_secret() -> Vec<u8> {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.to_vec()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
