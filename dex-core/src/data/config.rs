use std::{
    env::{self, VarError},
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::{error::Error, util::NET_TIMEOUT};

const APP_NAME: &str = "Dex";
const CONFIG_FILENAME: &str = "config.json";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Number of entries the list view loads.
    pub list_limit: usize,
    /// Number of entries the gallery view loads and enriches.
    pub gallery_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: NET_TIMEOUT.as_secs(),
            list_limit: 300,
            gallery_limit: 60,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Result<Option<Config>, Error> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no config directory available, using defaults");
                Ok(None)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Config>, Error> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        log::info!("loading config: {:?}", path);
        let config: Config = serde_json::from_reader(file)
            .map_err(|err| Error::ConfigError(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(Some(config))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.timeout_secs == 0 {
            return Err(Error::ConfigError("timeout_secs must be positive".into()));
        }
        url::Url::parse(&self.base_url)
            .map_err(|err| Error::ConfigError(format!("invalid base_url: {err}")))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn proxy() -> Option<String> {
        env::var(PROXY_ENV_VAR).map_or_else(
            |err| match err {
                VarError::NotPresent => None,
                VarError::NotUnicode(_) => {
                    log::error!("proxy URL is not a valid unicode");
                    None
                }
            },
            Some,
        )
    }
}
