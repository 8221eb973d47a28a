use crate::domain::{GameRules, RulesError};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::{env, fmt, fs, io, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub const EVENT_BROADCAST_CAPACITY: usize = 256;
pub const STORE_WRITE_CAPACITY: usize = 1024;

pub fn http_port() -> u16 {
    env::var("GAME_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(9990)
}

pub fn http_host() -> IpAddr {
    env::var("GAME_SERVER_HOST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

// Unset means the process runs on the in-memory store.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn db_connect_attempts() -> u32 {
    env::var("DB_CONNECT_ATTEMPTS")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|attempts| *attempts > 0)
        .unwrap_or(5)
}

pub fn db_connect_backoff() -> Duration {
    let millis = env::var("DB_CONNECT_BACKOFF_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(500);
    Duration::from_millis(millis)
}

pub fn rng_seed() -> Option<u64> {
    env::var("GAME_RNG_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
}

pub fn rules_path() -> Option<PathBuf> {
    env::var_os("GAME_RULES_PATH").map(PathBuf::from)
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Invalid(RulesError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read rules file {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "failed to parse rules: {err}"),
            ConfigError::Invalid(err) => write!(f, "invalid rules: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rules from `GAME_RULES_PATH`, or the defaults when it is unset.
pub fn load_rules() -> Result<GameRules, ConfigError> {
    match rules_path() {
        Some(path) => read_rules(&path),
        None => GameRules::default().validate().map_err(ConfigError::Invalid),
    }
}

pub fn read_rules(path: &Path) -> Result<GameRules, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&text)
}

// Missing keys keep their defaults; unknown keys are rejected.
pub fn parse_rules(text: &str) -> Result<GameRules, ConfigError> {
    let rules: GameRules = toml::from_str(text).map_err(ConfigError::Parse)?;
    rules.validate().map_err(ConfigError::Invalid)
}
