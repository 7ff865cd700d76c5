use chrono_tz::Tz;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, std::string::String),
}

#[derive(Debug, Clone)]
pub struct Config {
    bind_addr: IpAddr,
    server_port: u16,
    ping_message: String,
    mock_seed: Option<u64>,
    timezone: Tz,
    static_dir: Option<PathBuf>,
    trace_stdout: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: 8080,
            ping_message: "ping".to_owned(),
            mock_seed: None,
            timezone: Tz::UTC,
            static_dir: None,
            trace_stdout: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key-value source, unset keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let timezone = match lookup("TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("TIMEZONE", name))?,
            None => defaults.timezone,
        };

        Ok(Config {
            bind_addr: parse_var(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            server_port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port),
            ping_message: lookup("PING_MESSAGE").unwrap_or(defaults.ping_message),
            mock_seed: parse_var(&lookup, "MOCK_SEED")?,
            timezone,
            static_dir: lookup("STATIC_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            trace_stdout: parse_var(&lookup, "TRACE_STDOUT")?.unwrap_or(defaults.trace_stdout),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.server_port)
    }

    pub fn ping_message(&self) -> &str {
        &self.ping_message
    }

    pub fn mock_seed(&self) -> Option<u64> {
        self.mock_seed
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }

    pub fn trace_stdout(&self) -> bool {
        self.trace_stdout
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key, value)),
        None => Ok(None),
    }
}
