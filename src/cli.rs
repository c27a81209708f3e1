// Command-line arguments and their overrides on top of the env config.

use clap::Parser;

use crate::config::{parse_timeout, Config};
use crate::error::ConfigError;

#[derive(Debug, Parser)]
#[command(name = "vkcc", version, about = "Shorten a link with vk.cc and show its click count")]
pub struct Cli {
    /// Link to shorten or a vk.cc link to inspect. Prompted for when omitted.
    pub url: Option<String>,

    /// Request timeout in seconds (overrides VKCC_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<String>,

    /// Keep the statistics of a newly shortened link private.
    #[arg(long)]
    pub private: bool,

    /// Debug logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the environment config.
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(raw) = &self.timeout {
            config.timeout = parse_timeout(raw)?;
        }
        config.private |= self.private;
        Ok(config)
    }
}
