use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "scheduler")]
#[command(about = "Task scheduler HTTP server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database file (overrides config)
    #[arg(long)]
    pub db_file: Option<PathBuf>,

    /// Directory of static web files (overrides config)
    #[arg(long)]
    pub web_dir: Option<PathBuf>,
}

impl Cli {
    /// Loads the configuration file named by `--config` and applies the flags.
    pub fn load_config(&self) -> Result<Config, figment::Error> {
        Config::load(&self.config).map(|config| self.apply(config))
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db_file) = &self.db_file {
            config.db_file = db_file.clone();
        }
        if let Some(web_dir) = &self.web_dir {
            config.web_dir = web_dir.clone();
        }
        config
    }
}
