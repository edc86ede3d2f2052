use crate::config::FetchConfig;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Download the latest image-sampler image for a Sage node.
#[derive(Debug, Parser)]
pub struct Options {
    /// TOML file with fetch settings. Flags given on the command line take
    /// precedence over it.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Query API endpoint.
    #[clap(long)]
    pub endpoint: Option<String>,

    /// Relative start of the query time range, e.g. "-80h".
    #[clap(long, allow_hyphen_values(true))]
    pub start: Option<String>,

    /// Node (VSN) to query.
    #[clap(long)]
    pub vsn: Option<String>,

    /// Task name of the image stream.
    #[clap(long)]
    pub task: Option<String>,

    /// Directory the image is written to.
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Extra attempts per request after a failure.
    #[clap(long)]
    pub retries: Option<u32>,

    /// Sets verbosity level. Can be specified multiple times.
    #[clap(long = "verbose", short, action(clap::ArgAction::Count))]
    pub verbosity: u8,
}

impl Options {
    pub fn fetch_config(&self) -> Result<FetchConfig> {
        let mut config = match &self.config {
            Some(path) => FetchConfig::read(path)?,
            None => FetchConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut FetchConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(start) = &self.start {
            config.start = start.clone();
        }
        if let Some(vsn) = &self.vsn {
            config.vsn = vsn.clone();
        }
        if let Some(task) = &self.task {
            config.task = task.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
    }
}
