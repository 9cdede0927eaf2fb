use std::net::{IpAddr, SocketAddr};

use clap::ValueEnum;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: IpAddr, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::InvalidPort(port));
        }
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_filter_strings_match_value_names() {
        for level in LogLevel::value_variants() {
            let name = level
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .expect("every level has a name");
            assert_eq!(level.as_filter_str(), name);
        }
    }

    #[test]
    fn server_config_rejects_port_zero() {
        let host = IpAddr::from([127, 0, 0, 1]);
        assert_eq!(ServerConfig::new(host, 0), Err(ConfigError::InvalidPort(0)));

        let config = ServerConfig::new(host, 9000).expect("valid config");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
    }
}
