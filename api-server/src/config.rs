//! Server configuration read from the environment (and `.env`).

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4001";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_RANDOM_DENSITY: f64 = 0.4;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("HOTEL_RANDOM_DENSITY must be within 0.0..=1.0, got {0}")]
    DensityOutOfRange(f64),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (env: HOTEL_BIND_ADDR)
    pub bind_addr: SocketAddr,
    /// Origin allowed by CORS, normally the UI dev server (env: HOTEL_CORS_ORIGIN)
    pub cors_origin: HeaderValue,
    /// Share of rooms occupied by `/api/random` (env: HOTEL_RANDOM_DENSITY)
    pub random_density: f64,
    /// Start with random occupancy instead of an empty hotel (env: HOTEL_START_RANDOM)
    pub start_random: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_or(&lookup, "HOTEL_BIND_ADDR", DEFAULT_BIND_ADDR, |v| {
            v.parse::<SocketAddr>().ok()
        })?;
        let cors_origin = parse_or(&lookup, "HOTEL_CORS_ORIGIN", DEFAULT_CORS_ORIGIN, |v| {
            v.parse::<HeaderValue>().ok()
        })?;
        let random_density = match lookup("HOTEL_RANDOM_DENSITY") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::Invalid {
                    key: "HOTEL_RANDOM_DENSITY",
                    value,
                })?,
            None => DEFAULT_RANDOM_DENSITY,
        };
        if !(0.0..=1.0).contains(&random_density) {
            return Err(ConfigError::DensityOutOfRange(random_density));
        }
        let start_random = parse_or(&lookup, "HOTEL_START_RANDOM", "false", parse_bool)?;

        Ok(Self {
            bind_addr,
            cors_origin,
            random_density,
            start_random,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    parse(value.trim()).ok_or(ConfigError::Invalid { key, value })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
