pub mod models;

pub use models::{Config, RegistrarConfig};

use std::{fs::File, io::Read, path::PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const CONFIG_ENV_VAR: &str = "SUBREG_DDNS_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Picks the config file: explicit argument, then `$SUBREG_DDNS_CONFIG`,
/// then `config.yaml` in the working directory.
pub fn config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
        .into()
}

pub fn load_config(path: impl Into<PathBuf>) -> Result<Config, ConfigError> {
    let path = path.into();
    let mut contents = String::new();
    File::open(&path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

    parse_config(&contents).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
        other => other,
    })
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}
