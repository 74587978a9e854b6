use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File read when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "scheduler.toml";

/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "TODO_";

pub const DEFAULT_PORT: u16 = 7540;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TCP port the HTTP server listens on
    pub port: u16,
    /// Path of the SQLite database file
    #[serde(rename = "dbfile")]
    pub db_file: PathBuf,
    /// Directory of the static web front-end
    #[serde(rename = "webdir")]
    pub web_dir: PathBuf,
    /// Default tracing filter, used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_file: PathBuf::from("scheduler.db"),
            web_dir: PathBuf::from("web"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Layers defaults, the TOML file and `TODO_*` environment variables.
    pub fn load(config_file: &Path) -> Result<Self, figment::Error> {
        Self::figment(config_file).extract()
    }

    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config = Config::load(Path::new("missing.toml"))?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layers() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "scheduler.toml",
                r#"
                port = 8080
                dbfile = "data/tasks.db"
                "#,
            )?;
            jail.clear_env();
            jail.set_env("TODO_PORT", "9090");
            jail.set_env("TODO_WEBDIR", "public");

            let config = Config::load(Path::new("scheduler.toml"))?;
            assert_eq!(config.port, 9090);
            assert_eq!(config.db_file, PathBuf::from("data/tasks.db"));
            assert_eq!(config.web_dir, PathBuf::from("public"));
            assert_eq!(config.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("TODO_PORT", "not-a-port");
            assert!(Config::load(Path::new("missing.toml")).is_err());
            Ok(())
        });
    }
}
