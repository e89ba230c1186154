//! Handles settings for the application. Optional configuration is read
//! from `spesa.toml` in the working directory.
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Database connection string. `--database-url` and `DATABASE_URL`
    /// take precedence.
    pub database: Option<String>,
    /// Log level filter for diagnostics (`error`, `warn`, `info`, `debug`).
    pub log: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("spesa").required(false))
            .build()?;

        settings.try_deserialize()
    }
}
