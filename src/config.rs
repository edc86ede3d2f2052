use crate::error::ConfigError;
use crate::query::{Filter, Query};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const QUERY_API: &str = "https://data.sagecontinuum.org/api/v1/query";
pub const DEFAULT_START: &str = "-80h";
pub const DEFAULT_VSN: &str = "W017";
pub const DEFAULT_TASK: &str = "imagesampler-bottom";

/// Settings for a single fetch. Every field defaults to the values the tool
/// has always used, so an empty config file changes nothing.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub endpoint: String,
    pub start: String,
    pub vsn: String,
    pub task: String,
    pub output_dir: PathBuf,
    /// Total per-request timeout. `None` leaves the client default in place.
    pub timeout_secs: Option<u64>,
    /// Extra attempts per request after the first one fails.
    pub retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: QUERY_API.to_string(),
            start: DEFAULT_START.to_string(),
            vsn: DEFAULT_VSN.to_string(),
            task: DEFAULT_TASK.to_string(),
            output_dir: PathBuf::from("."),
            timeout_secs: None,
            retries: 0,
        }
    }
}

impl FetchConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Unable to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|source| ConfigError::Endpoint {
            url: self.endpoint.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn query(&self) -> Query {
        Query {
            start: self.start.clone(),
            filter: Filter {
                vsn: self.vsn.clone(),
                task: self.task.clone(),
            },
        }
    }
}
