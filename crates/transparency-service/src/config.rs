use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::AppError;

const DEFAULT_PORT: u16 = 5001;

/// Listener configuration loaded from environment variables.
///
/// The text-generation backend is configured separately through
/// `OpenAiClientConfig::from_env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind. Defaults to all interfaces.
    pub host: IpAddr,
    /// Listening port. Defaults to 5001.
    pub port: u16,
}

impl Config {
    /// Optional:
    /// - `HOST`: bind address (default `0.0.0.0`)
    /// - `PORT`: listening port (default `5001`)
    pub fn from_env() -> Result<Self, AppError> {
        let host = match std::env::var("HOST") {
            Ok(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| AppError::Config(format!("HOST={raw:?} is not an IP address: {e}")))?,
            Err(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16, AppError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("PORT={raw:?} is not a valid port: {e}")))
}
