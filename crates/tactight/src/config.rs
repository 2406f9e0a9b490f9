//! Layered configuration: built-in defaults, then a TOML file, then
//! `TACTIGHT_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tactight_archive::CompanionFile;
use tactight_fetch::ClientSetting;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "tactight.toml";
pub const ENV_PREFIX: &str = "TACTIGHT_";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanionEntry {
    pub path: String,
    pub name: String,
}

impl From<CompanionEntry> for CompanionFile {
    fn from(entry: CompanionEntry) -> Self { CompanionFile::new(entry.path, entry.name) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base of the generation API, `generate-stl/` is resolved against it.
    pub api_url:            String,
    /// Origin serving the companion files.
    pub site_url:           String,
    pub output_dir:         PathBuf,
    pub companions:         Vec<CompanionEntry>,
    pub timeout_secs:       Option<u64>,
    pub proxies:            Vec<String>,
    pub wait_on_rate_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url:            "http://127.0.0.1:3000/api/".to_string(),
            site_url:           "http://127.0.0.1:3000/".to_string(),
            output_dir:         PathBuf::from("."),
            companions:         CompanionFile::defaults()
                .into_iter()
                .map(|c| CompanionEntry {
                    path: c.path,
                    name: c.name,
                })
                .collect(),
            timeout_secs:       None,
            proxies:            Vec::new(),
            wait_on_rate_limit: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `tactight.toml` in the working
    /// directory when no path is given. Only an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match path {
            Some(path) if !path.is_file() => {
                return Err(Error::Config(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                )))));
            }
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        figment.extract().map_err(|e| Error::Config(Box::new(e)))
    }

    pub fn companion_files(&self) -> Vec<CompanionFile> {
        self.companions.iter().cloned().map(CompanionFile::from).collect()
    }

    pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }

    pub fn client_setting(&self) -> Result<ClientSetting> {
        let proxies = self
            .proxies
            .iter()
            .map(|raw| {
                Url::parse(raw).map_err(|e| Error::InvalidProxy {
                    url:    raw.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClientSetting {
            proxies: (!proxies.is_empty()).then_some(proxies),
            timeout: self.timeout(),
        })
    }
}
