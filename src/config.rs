use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    /// Base URL of the service exposing `/api/pedidos`, `/api/ufs` and `/api/frete`.
    pub api_base_url: String,
    pub http_timeout: Duration,

    pub orders_poll_interval: Duration,
    pub default_status: String,
}

pub const DEFAULT_STATUS: &str = "Em aberto";

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: "http://127.0.0.1:5050".to_string(),
            http_timeout: Duration::from_secs(15),
            orders_poll_interval: Duration::from_secs(20),
            default_status: DEFAULT_STATUS.to_string(),
        }
    }
}

fn secs_var(name: &str, fallback: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let host = env::var("HOST").unwrap_or(defaults.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let api_base_url = env::var("ORDERS_API_BASE_URL")
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or(defaults.api_base_url);

    let default_status = env::var("DEFAULT_STATUS")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(defaults.default_status);

    Settings {
        host,
        port,
        api_base_url,
        http_timeout: secs_var("HTTP_TIMEOUT_SECS", defaults.http_timeout),
        orders_poll_interval: secs_var("ORDERS_POLL_SECS", defaults.orders_poll_interval),
        default_status,
    }
}
