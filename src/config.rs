use serde::Deserialize;
use std::env;
use std::fs;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use crate::error::*;
use crate::expectancy::LifeExpectancy;
use crate::weeks::StartMode;

const CONFIG_PATH_ENV_VAR: &str = "NOD_CONFIG_FILE";
const DEFAULT_PROMPT_ATTEMPTS: u32 = 3;

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    let home = dirs::home_dir();

    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        locations.push(PathBuf::from_iter(
            [dir, "nod".to_string(), "config.toml".to_string()].iter(),
        ));
    } else if let Some(home) = &home {
        locations.push(PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("nod"),
                Path::new("config.toml"),
            ]
            .iter(),
        ));
    }

    if let Some(home) = &home {
        locations.push(home.join(".nod.toml"));
    }

    locations
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory the PDF is written to.
    pub output_dir: PathBuf,
    /// When unset the user is asked.
    pub start_mode: Option<StartMode>,
    pub prompt_attempts: u32,
    pub life_expectancy: LifeExpectancy,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            output_dir: PathBuf::from("."),
            start_mode: None,
            prompt_attempts: DEFAULT_PROMPT_ATTEMPTS,
            life_expectancy: LifeExpectancy::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;

        if config.prompt_attempts == 0 {
            return Err(Error::new(
                ErrorKind::Config,
                "prompt_attempts must be at least 1",
            ));
        }

        config.life_expectancy.validate()?;

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorKind::Config,
                &format!("Could not read '{}': {}", path.display(), err),
            )
        })?;

        Config::from_toml(&content).map_err(|err| {
            let msg = format!("{} (in '{}')", err.message.as_deref().unwrap_or(""), path.display());
            err.with_msg(&msg)
        })
    }
}

/// Loads `path` if given, otherwise the first config file found in the usual
/// locations. Without any config file the defaults are used.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from '{}'", path.display());
        return Config::from_path(path);
    }

    match find_configfile_locations().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Loading config from '{}'", path.display());
            Config::from_path(&path)
        }
        None => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
