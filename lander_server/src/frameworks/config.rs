use crate::domain::GameTuning;
use crate::use_cases::GameSettings;
use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

// Runtime constants (not gameplay tuning).

// Bounded wait for each task on shutdown before it is aborted.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub fn remote_port() -> u16 {
    env::var("LANDER_REMOTE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8888)
}

pub fn tick_interval() -> Duration {
    positive_millis(env::var("LANDER_TICK_MS").ok().as_deref(), 10)
}

pub fn read_timeout() -> Duration {
    positive_millis(env::var("LANDER_READ_TIMEOUT_MS").ok().as_deref(), 2000)
}

// Zero or unparsable values fall back to the default.
fn positive_millis(value: Option<&str>, default: u64) -> Duration {
    let millis = value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(default);
    Duration::from_millis(millis)
}

pub fn clear_latch_on_restart() -> bool {
    env::var("LANDER_CLEAR_LATCH_ON_RESTART")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(false)
}

// Headless presenter logs one frame out of this many.
pub fn trace_every() -> u64 {
    env::var("LANDER_TRACE_EVERY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100)
}

pub fn tuning_file() -> Option<PathBuf> {
    env::var_os("LANDER_TUNING_FILE").map(PathBuf::from)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read tuning file {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "cannot parse tuning file {}: {source}", path.display())
            }
            ConfigError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Loads tuning from a TOML file, or the defaults when no file is given.
pub fn load_tuning(path: Option<&Path>) -> Result<GameTuning, ConfigError> {
    let tuning = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str::<GameTuning>(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => GameTuning::default(),
    };
    tuning.validate().map_err(ConfigError::Invalid)?;
    Ok(tuning)
}

pub fn game_settings() -> Result<GameSettings, ConfigError> {
    Ok(GameSettings {
        tick_interval: tick_interval(),
        tuning: load_tuning(tuning_file().as_deref())?,
        clear_latch_on_restart: clear_latch_on_restart(),
    })
}
